//! JSON documents exchanged with the operator CLI.
//!
//! * [`WeightManifest`]: new funding, per-account power and unclaimed
//!   carry for one asset.
//! * [`ClaimManifest`]: the claims to commit to under one root id.
//! * [`RootBundle`]: the root to publish plus every claim's leaf and proof,
//!   hex encoded, ready to hand to claimants.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::claim::{parse_address, Claim, ClaimKind};
use crate::distribution;
use crate::error::OperatorError;
use crate::tree::{self, ClaimTree, Node};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, OperatorError> {
    let raw = fs::read(path).map_err(|source| OperatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&raw)?)
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), OperatorError> {
    let raw = serde_json::to_vec_pretty(value)?;
    fs::write(path, raw).map_err(|source| OperatorError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_node(encoded: &str) -> Result<Node, OperatorError> {
    let bytes = hex::decode(encoded).map_err(|_| OperatorError::InvalidHash(encoded.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| OperatorError::InvalidHash(encoded.to_string()))
}

/// The contract pays at most one leaf per account and root, so every account
/// may appear once. Addresses are compared after parsing.
fn ensure_unique<'a>(accounts: impl Iterator<Item = &'a str>) -> Result<(), OperatorError> {
    let mut seen = BTreeSet::new();
    for account in accounts {
        if !seen.insert(parse_address(account)?) {
            return Err(OperatorError::DuplicateAccount {
                account: account.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Weights
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWeight {
    pub account: String,
    /// Power the account's eligible items gained over the closing cycle.
    pub power: u128,
    /// Amount the account left unclaimed under the previous reward root.
    #[serde(default)]
    pub carried: i128,
}

/// Input to a fungible split: funding added since the previous reward root,
/// and per-account power and carry. Accounts with only a carry are listed
/// with zero power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightManifest {
    pub asset: String,
    pub root_id: u64,
    pub pool: i128,
    pub weights: Vec<AccountWeight>,
}

impl WeightManifest {
    pub fn load(path: &Path) -> Result<Self, OperatorError> {
        load_json(path)
    }

    /// Split the new funding by power and add each account's carry to its
    /// share. Accounts left with nothing are dropped from the tree.
    pub fn allocate(&self) -> Result<ClaimManifest, OperatorError> {
        ensure_unique(self.weights.iter().map(|weight| weight.account.as_str()))?;
        let weights: Vec<(String, u128)> = self
            .weights
            .iter()
            .map(|weight| (weight.account.clone(), weight.power))
            .collect();
        let shares = distribution::proportional(self.pool, &weights)?;

        let mut claims = Vec::with_capacity(shares.len());
        let mut carried_total = 0i128;
        for (weight, (account, share)) in self.weights.iter().zip(shares) {
            if weight.carried < 0 {
                return Err(OperatorError::NegativeCarry {
                    account,
                    amount: weight.carried,
                });
            }
            let amount = share
                .checked_add(weight.carried)
                .ok_or(OperatorError::Overflow)?;
            carried_total = carried_total
                .checked_add(weight.carried)
                .ok_or(OperatorError::Overflow)?;
            if amount > 0 {
                claims.push(ManifestClaim {
                    account,
                    kind: ClaimKind::Fungible,
                    item_ids: Vec::new(),
                    amounts: vec![amount],
                });
            }
        }

        tracing::debug!(
            root_id = self.root_id,
            funding = self.pool,
            carried = carried_total,
            claims = claims.len(),
            "allocated reward root"
        );
        Ok(ClaimManifest {
            asset: self.asset.clone(),
            root_id: self.root_id,
            claims,
        })
    }
}

// =============================================================================
// Claims
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestClaim {
    pub account: String,
    pub kind: ClaimKind,
    #[serde(default)]
    pub item_ids: Vec<u32>,
    #[serde(default)]
    pub amounts: Vec<i128>,
}

/// Claims for a single asset under the root id the pool will assign next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimManifest {
    pub asset: String,
    pub root_id: u64,
    pub claims: Vec<ManifestClaim>,
}

impl ClaimManifest {
    pub fn load(path: &Path) -> Result<Self, OperatorError> {
        load_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), OperatorError> {
        save_json(self, path)
    }

    /// Parsed claims, in manifest order. Fails on a repeated account.
    pub fn claims(&self) -> Result<Vec<Claim>, OperatorError> {
        ensure_unique(self.claims.iter().map(|claim| claim.account.as_str()))?;
        let asset = parse_address(&self.asset)?;
        self.claims
            .iter()
            .map(|claim| {
                Ok(Claim {
                    account: parse_address(&claim.account)?,
                    asset: asset.clone(),
                    kind: claim.kind,
                    item_ids: claim.item_ids.clone(),
                    amounts: claim.amounts.clone(),
                })
            })
            .collect()
    }

    pub fn bundle(&self) -> Result<RootBundle, OperatorError> {
        let tree = ClaimTree::build(&self.claims()?, self.root_id)?;
        let claims = self
            .claims
            .iter()
            .enumerate()
            .map(|(index, claim)| {
                let leaf = tree
                    .leaf(index)
                    .ok_or(OperatorError::LeafOutOfRange { index, len: tree.len() })?;
                Ok(BundledClaim {
                    account: claim.account.clone(),
                    kind: claim.kind,
                    item_ids: claim.item_ids.clone(),
                    amounts: claim.amounts.clone(),
                    leaf: hex::encode(leaf),
                    proof: tree.proof(index)?.iter().map(hex::encode).collect(),
                })
            })
            .collect::<Result<Vec<_>, OperatorError>>()?;

        let root = hex::encode(tree.root());
        tracing::info!(
            asset = %self.asset,
            root_id = self.root_id,
            claims = claims.len(),
            root = %root,
            "claim root ready"
        );
        Ok(RootBundle {
            asset: self.asset.clone(),
            root_id: self.root_id,
            root,
            claims,
        })
    }
}

// =============================================================================
// Bundles
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundledClaim {
    pub account: String,
    pub kind: ClaimKind,
    pub item_ids: Vec<u32>,
    pub amounts: Vec<i128>,
    pub leaf: String,
    pub proof: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootBundle {
    pub asset: String,
    pub root_id: u64,
    pub root: String,
    pub claims: Vec<BundledClaim>,
}

impl RootBundle {
    pub fn load(path: &Path) -> Result<Self, OperatorError> {
        load_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), OperatorError> {
        save_json(self, path)
    }

    /// Re-derive every leaf from its payload and check its proof against
    /// the bundled root.
    pub fn verify(&self) -> Result<(), OperatorError> {
        let root = decode_node(&self.root)?;
        let asset = parse_address(&self.asset)?;
        for (index, bundled) in self.claims.iter().enumerate() {
            let claim = Claim {
                account: parse_address(&bundled.account)?,
                asset: asset.clone(),
                kind: bundled.kind,
                item_ids: bundled.item_ids.clone(),
                amounts: bundled.amounts.clone(),
            };
            let leaf = claim.leaf(self.root_id)?;
            if hex::encode(leaf) != bundled.leaf.to_lowercase() {
                tracing::warn!(index, account = %bundled.account, "leaf does not match payload");
                return Err(OperatorError::ProofMismatch { index });
            }
            let proof = bundled
                .proof
                .iter()
                .map(String::as_str)
                .map(decode_node)
                .collect::<Result<Vec<_>, _>>()?;
            if !tree::verify(&proof, &root, leaf) {
                tracing::warn!(index, account = %bundled.account, "proof does not reach root");
                return Err(OperatorError::ProofMismatch { index });
            }
        }
        Ok(())
    }
}
