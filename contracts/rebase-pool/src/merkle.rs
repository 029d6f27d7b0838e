//! Claim leaf encoding and sorted-pair Merkle proof verification.
//!
//! Leaf preimage layout:
//!
//! ```text
//! xdr(account) || xdr(asset) || kind:u32be || item_ids:u32be* || amounts:i128be* || root_id:u64be
//! ```
//!
//! Interior nodes hash the lexicographically smaller child first, so proofs
//! carry no left/right flags.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::types::RewardKind;

pub fn leaf_hash(
    env: &Env,
    account: &Address,
    asset: &Address,
    kind: RewardKind,
    item_ids: &Vec<u32>,
    amounts: &Vec<i128>,
    root_id: u64,
) -> BytesN<32> {
    let mut preimage = Bytes::new(env);
    preimage.append(&account.clone().to_xdr(env));
    preimage.append(&asset.clone().to_xdr(env));
    preimage.extend_from_array(&(kind as u32).to_be_bytes());
    for id in item_ids.iter() {
        preimage.extend_from_array(&id.to_be_bytes());
    }
    for amount in amounts.iter() {
        preimage.extend_from_array(&amount.to_be_bytes());
    }
    preimage.extend_from_array(&root_id.to_be_bytes());
    env.crypto().sha256(&preimage).to_bytes()
}

pub fn hash_pair(env: &Env, a: &BytesN<32>, b: &BytesN<32>) -> BytesN<32> {
    let (a, b) = (a.to_array(), b.to_array());
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mut preimage = Bytes::from_array(env, &low);
    preimage.extend_from_array(&high);
    env.crypto().sha256(&preimage).to_bytes()
}

/// Fold `proof` over `leaf` and compare against `root`.
pub fn verify(env: &Env, proof: &Vec<BytesN<32>>, root: &BytesN<32>, leaf: BytesN<32>) -> bool {
    let mut node = leaf;
    for sibling in proof.iter() {
        node = hash_pair(env, &node, &sibling);
    }
    node == *root
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, vec};

    #[test]
    fn test_pair_hash_is_order_independent() {
        let env = Env::default();
        let a = BytesN::from_array(&env, &[1; 32]);
        let b = BytesN::from_array(&env, &[2; 32]);
        assert_eq!(hash_pair(&env, &a, &b), hash_pair(&env, &b, &a));
    }

    #[test]
    fn test_single_leaf_tree_verifies_with_empty_proof() {
        let env = Env::default();
        let account = Address::generate(&env);
        let asset = Address::generate(&env);
        let leaf = leaf_hash(
            &env,
            &account,
            &asset,
            RewardKind::Fungible,
            &Vec::new(&env),
            &vec![&env, 500_i128],
            0,
        );
        assert!(verify(&env, &Vec::new(&env), &leaf.clone(), leaf));
    }

    #[test]
    fn test_leaf_binds_every_field() {
        let env = Env::default();
        let account = Address::generate(&env);
        let other = Address::generate(&env);
        let asset = Address::generate(&env);
        let ids = vec![&env, 7_u32];
        let amounts = vec![&env, 10_i128];
        let base = leaf_hash(&env, &account, &asset, RewardKind::SemiFungible, &ids, &amounts, 3);

        assert_ne!(
            base,
            leaf_hash(&env, &other, &asset, RewardKind::SemiFungible, &ids, &amounts, 3)
        );
        assert_ne!(
            base,
            leaf_hash(&env, &account, &other, RewardKind::SemiFungible, &ids, &amounts, 3)
        );
        assert_ne!(
            base,
            leaf_hash(&env, &account, &asset, RewardKind::NonFungible, &ids, &amounts, 3)
        );
        assert_ne!(
            base,
            leaf_hash(&env, &account, &asset, RewardKind::SemiFungible, &vec![&env, 8_u32], &amounts, 3)
        );
        assert_ne!(
            base,
            leaf_hash(&env, &account, &asset, RewardKind::SemiFungible, &ids, &vec![&env, 11_i128], 3)
        );
        assert_ne!(
            base,
            leaf_hash(&env, &account, &asset, RewardKind::SemiFungible, &ids, &amounts, 4)
        );
    }

    #[test]
    fn test_two_leaf_proof() {
        let env = Env::default();
        let a = BytesN::from_array(&env, &[9; 32]);
        let b = BytesN::from_array(&env, &[3; 32]);
        let root = hash_pair(&env, &a, &b);
        assert!(verify(&env, &vec![&env, b.clone()], &root, a.clone()));
        assert!(verify(&env, &vec![&env, a.clone()], &root, b.clone()));
        assert!(!verify(&env, &vec![&env, a.clone()], &root, a));
    }
}
