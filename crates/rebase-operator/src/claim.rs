//! Claim entitlements and their leaf encoding.
//!
//! A leaf is `sha256` over:
//!
//! ```text
//! xdr(ScVal::Address(account)) || xdr(ScVal::Address(asset)) || kind:u32be
//!     || item_ids:u32be* || amounts:i128be* || root_id:u64be
//! ```
//!
//! which is what `Address::to_xdr` produces on-chain for the two addresses.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::OperatorError;
use crate::xdr::{Limits, ScAddress, ScVal, WriteXdr};

/// Asset class of a claim. Discriminants match the contract's `RewardKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ClaimKind {
    Fungible = 0,
    NonFungible = 1,
    SemiFungible = 2,
}

/// One claimable entitlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub account: ScAddress,
    pub asset: ScAddress,
    pub kind: ClaimKind,
    pub item_ids: Vec<u32>,
    pub amounts: Vec<i128>,
}

impl Claim {
    pub fn fungible(account: ScAddress, asset: ScAddress, amount: i128) -> Self {
        Self {
            account,
            asset,
            kind: ClaimKind::Fungible,
            item_ids: Vec::new(),
            amounts: vec![amount],
        }
    }

    pub fn non_fungible(account: ScAddress, asset: ScAddress, item_ids: Vec<u32>) -> Self {
        Self {
            account,
            asset,
            kind: ClaimKind::NonFungible,
            item_ids,
            amounts: Vec::new(),
        }
    }

    pub fn semi_fungible(
        account: ScAddress,
        asset: ScAddress,
        item_ids: Vec<u32>,
        amounts: Vec<i128>,
    ) -> Self {
        Self {
            account,
            asset,
            kind: ClaimKind::SemiFungible,
            item_ids,
            amounts,
        }
    }

    /// The payload-shape rules the contract enforces before verifying a
    /// proof. A claim failing them could never be paid out.
    pub fn check_shape(&self) -> Result<(), &'static str> {
        match self.kind {
            ClaimKind::Fungible if !self.item_ids.is_empty() || self.amounts.len() != 1 => {
                return Err("fungible claims carry exactly one amount and no item ids");
            }
            ClaimKind::NonFungible if !self.amounts.is_empty() || self.item_ids.is_empty() => {
                return Err("non-fungible claims carry item ids and no amounts");
            }
            ClaimKind::SemiFungible
                if self.item_ids.is_empty() || self.item_ids.len() != self.amounts.len() =>
            {
                return Err("semi-fungible claims pair every item id with an amount");
            }
            _ => {}
        }
        if self.amounts.iter().any(|amount| *amount <= 0) {
            return Err("amounts must be positive");
        }
        Ok(())
    }

    /// Leaf hash of this claim under `root_id`.
    pub fn leaf(&self, root_id: u64) -> Result<[u8; 32], OperatorError> {
        let mut hasher = Sha256::new();
        hasher.update(encode_address(&self.account)?);
        hasher.update(encode_address(&self.asset)?);
        hasher.update((self.kind as u32).to_be_bytes());
        for id in &self.item_ids {
            hasher.update(id.to_be_bytes());
        }
        for amount in &self.amounts {
            hasher.update(amount.to_be_bytes());
        }
        hasher.update(root_id.to_be_bytes());
        Ok(hasher.finalize().into())
    }
}

/// Parse a `G...` account or `C...` contract strkey.
pub fn parse_address(address: &str) -> Result<ScAddress, OperatorError> {
    address
        .parse::<ScAddress>()
        .map_err(|source| OperatorError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

fn encode_address(address: &ScAddress) -> Result<Vec<u8>, OperatorError> {
    Ok(ScVal::Address(address.clone()).to_xdr(Limits::none())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{ContractId, Hash};

    fn contract(seed: u8) -> ScAddress {
        ScAddress::Contract(ContractId(Hash([seed; 32])))
    }

    #[test]
    fn test_address_encoding_is_scval() {
        let encoded = encode_address(&contract(1)).unwrap();
        // ScVal::Address discriminant, then ScAddress::Contract discriminant.
        assert_eq!(&encoded[..4], &18u32.to_be_bytes());
        assert_eq!(&encoded[4..8], &1u32.to_be_bytes());
        assert_eq!(&encoded[8..], &[1; 32]);
    }

    #[test]
    fn test_leaf_depends_on_every_field() {
        let base = Claim::semi_fungible(contract(1), contract(2), vec![5], vec![10]);
        let root_id = 4;
        let leaf = base.leaf(root_id).unwrap();

        let variants = [
            Claim { account: contract(9), ..base.clone() },
            Claim { asset: contract(9), ..base.clone() },
            Claim { kind: ClaimKind::NonFungible, ..base.clone() },
            Claim { item_ids: vec![6], ..base.clone() },
            Claim { amounts: vec![11], ..base.clone() },
        ];
        for variant in variants {
            assert_ne!(variant.leaf(root_id).unwrap(), leaf);
        }
        assert_ne!(base.leaf(root_id + 1).unwrap(), leaf);
    }

    #[test]
    fn test_shape_rules() {
        let account = contract(1);
        let asset = contract(2);
        assert!(Claim::fungible(account.clone(), asset.clone(), 5).check_shape().is_ok());
        assert!(Claim::fungible(account.clone(), asset.clone(), 0).check_shape().is_err());
        assert!(Claim::non_fungible(account.clone(), asset.clone(), vec![]).check_shape().is_err());
        assert!(Claim::non_fungible(account.clone(), asset.clone(), vec![1, 2]).check_shape().is_ok());
        assert!(Claim::semi_fungible(account.clone(), asset.clone(), vec![1, 2], vec![3])
            .check_shape()
            .is_err());
        assert!(Claim::semi_fungible(account, asset, vec![1], vec![3]).check_shape().is_ok());
    }

    #[test]
    fn test_parse_address_rejects_garbage() {
        assert!(matches!(
            parse_address("not-a-strkey"),
            Err(OperatorError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ClaimKind::SemiFungible).unwrap();
        assert_eq!(json, "\"semi_fungible\"");
    }
}
