use std::fs;

use rebase_operator::manifest::{AccountWeight, ManifestClaim};
use rebase_operator::tree;
use rebase_operator::xdr::{AccountId, ContractId, Hash, PublicKey, ScAddress, Uint256};
use rebase_operator::{ClaimKind, ClaimManifest, OperatorError, RootBundle, WeightManifest};
use testresult::TestResult;

fn account(seed: u8) -> String {
    ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256([seed; 32])))).to_string()
}

fn contract(seed: u8) -> String {
    ScAddress::Contract(ContractId(Hash([seed; 32]))).to_string()
}

fn weights() -> WeightManifest {
    WeightManifest {
        asset: contract(200),
        root_id: 3,
        pool: 1_001,
        weights: vec![
            AccountWeight { account: account(1), power: 300, carried: 0 },
            AccountWeight { account: account(2), power: 700, carried: 0 },
            AccountWeight { account: account(3), power: 0, carried: 0 },
        ],
    }
}

#[test]
fn allocate_build_verify_through_files() -> TestResult {
    let dir = tempfile::tempdir()?;
    let weights_path = dir.path().join("weights.json");
    let manifest_path = dir.path().join("manifest.json");
    let bundle_path = dir.path().join("bundle.json");

    fs::write(&weights_path, serde_json::to_vec(&weights())?)?;

    let manifest = WeightManifest::load(&weights_path)?.allocate()?;
    // The zero-power account is left out.
    assert_eq!(manifest.claims.len(), 2);
    assert_eq!(manifest.claims[0].amounts, vec![300]);
    assert_eq!(manifest.claims[1].amounts, vec![700]);
    manifest.save(&manifest_path)?;

    let bundle = ClaimManifest::load(&manifest_path)?.bundle()?;
    bundle.save(&bundle_path)?;

    let reloaded = RootBundle::load(&bundle_path)?;
    assert_eq!(reloaded, bundle);
    reloaded.verify()?;
    assert_eq!(reloaded.root.len(), 64);
    Ok(())
}

#[test]
fn unclaimed_amounts_are_added_to_the_next_split() -> TestResult {
    let mut next = weights();
    next.root_id = 5;
    next.pool = 1_000;
    next.weights[1].carried = 700;
    next.weights[2].carried = 45;

    let manifest = next.allocate()?;
    let amounts: Vec<(String, i128)> = manifest
        .claims
        .iter()
        .map(|claim| (claim.account.clone(), claim.amounts[0]))
        .collect();
    assert_eq!(
        amounts,
        vec![(account(1), 300), (account(2), 1_400), (account(3), 45)]
    );
    // Only the new funding is split; the carry is owed on top of it.
    let total: i128 = amounts.iter().map(|(_, amount)| amount).sum();
    assert_eq!(total, next.pool + 745);
    manifest.bundle()?.verify()?;
    Ok(())
}

#[test]
fn carry_defaults_to_zero_in_json() -> TestResult {
    let raw = format!(
        r#"{{"asset":"{}","root_id":1,"pool":10,"weights":[{{"account":"{}","power":1}}]}}"#,
        contract(200),
        account(1)
    );
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("weights.json");
    fs::write(&path, raw)?;
    let loaded = WeightManifest::load(&path)?;
    assert_eq!(loaded.weights[0].carried, 0);
    assert_eq!(loaded.allocate()?.claims[0].amounts, vec![10]);
    Ok(())
}

#[test]
fn repeated_account_is_rejected() {
    let mut doubled = weights();
    doubled.weights[2].account = account(1);
    assert!(matches!(
        doubled.allocate(),
        Err(OperatorError::DuplicateAccount { account: repeated }) if repeated == account(1)
    ));

    let manifest = ClaimManifest {
        asset: contract(9),
        root_id: 0,
        claims: vec![
            ManifestClaim {
                account: account(4),
                kind: ClaimKind::NonFungible,
                item_ids: vec![1],
                amounts: vec![],
            },
            ManifestClaim {
                account: account(4),
                kind: ClaimKind::SemiFungible,
                item_ids: vec![2],
                amounts: vec![3],
            },
        ],
    };
    assert!(matches!(
        manifest.bundle(),
        Err(OperatorError::DuplicateAccount { .. })
    ));
}

#[test]
fn negative_carry_is_rejected() {
    let mut next = weights();
    next.weights[0].carried = -1;
    assert!(matches!(
        next.allocate(),
        Err(OperatorError::NegativeCarry { amount: -1, .. })
    ));
}

#[test]
fn bundle_proofs_match_tree() -> TestResult {
    let manifest = ClaimManifest {
        asset: contract(9),
        root_id: 0,
        claims: vec![
            ManifestClaim {
                account: account(1),
                kind: ClaimKind::NonFungible,
                item_ids: vec![10, 11],
                amounts: vec![],
            },
            ManifestClaim {
                account: account(2),
                kind: ClaimKind::SemiFungible,
                item_ids: vec![4],
                amounts: vec![25],
            },
            ManifestClaim {
                account: contract(3),
                kind: ClaimKind::NonFungible,
                item_ids: vec![12],
                amounts: vec![],
            },
        ],
    };
    let bundle = manifest.bundle()?;
    let root: [u8; 32] = hex::decode(&bundle.root)?.as_slice().try_into()?;
    for (claim, bundled) in manifest.claims()?.iter().zip(&bundle.claims) {
        let leaf = claim.leaf(0)?;
        assert_eq!(hex::encode(leaf), bundled.leaf);
        let proof = bundled
            .proof
            .iter()
            .map(|node| Ok(hex::decode(node)?.as_slice().try_into()?))
            .collect::<Result<Vec<[u8; 32]>, Box<dyn std::error::Error>>>()?;
        assert!(tree::verify(&proof, &root, leaf));
    }
    Ok(())
}

#[test]
fn tampered_bundle_fails_verification() -> TestResult {
    let mut bundle = weights().allocate()?.bundle()?;
    bundle.claims[1].amounts = vec![701];
    assert!(matches!(
        bundle.verify(),
        Err(OperatorError::ProofMismatch { index: 1 })
    ));
    Ok(())
}

#[test]
fn bundle_under_other_root_id_fails() -> TestResult {
    let mut bundle = weights().allocate()?.bundle()?;
    bundle.root_id += 1;
    assert!(matches!(
        bundle.verify(),
        Err(OperatorError::ProofMismatch { index: 0 })
    ));
    Ok(())
}

#[test]
fn malformed_claim_is_rejected() {
    let manifest = ClaimManifest {
        asset: contract(9),
        root_id: 0,
        claims: vec![ManifestClaim {
            account: account(1),
            kind: ClaimKind::Fungible,
            item_ids: vec![1],
            amounts: vec![5],
        }],
    };
    assert!(matches!(
        manifest.bundle(),
        Err(OperatorError::MalformedClaim { index: 0, .. })
    ));
}

#[test]
fn missing_file_reports_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("absent.json");
    let err = ClaimManifest::load(&missing).err().ok_or("load should fail")?;
    assert!(matches!(err, OperatorError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
    Ok(())
}
