//! Claim verifier: shape checks, proof verification, replay guard, payout.

use soroban_sdk::{log, token, Address, BytesN, Env, Vec};

use crate::access;
use crate::error::Error;
use crate::events;
use crate::interfaces::{CollectionClient, MultiTokenClient};
use crate::merkle;
use crate::storage;
use crate::types::RewardKind;

/// Reject payloads whose shape does not match `kind`.
///
/// * Fungible: no item ids, exactly one amount.
/// * NonFungible: no amounts, at least one item id.
/// * SemiFungible: equal, non-zero lengths.
pub fn validate_shape(kind: RewardKind, item_ids: &Vec<u32>, amounts: &Vec<i128>) -> Result<(), Error> {
    let well_formed = match kind {
        RewardKind::Fungible => item_ids.is_empty() && amounts.len() == 1,
        RewardKind::NonFungible => amounts.is_empty() && !item_ids.is_empty(),
        RewardKind::SemiFungible => !item_ids.is_empty() && item_ids.len() == amounts.len(),
    };
    if !well_formed {
        return Err(Error::ArrayLengthMismatch);
    }
    if amounts.iter().any(|amount| amount <= 0) {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn claim(
    env: &Env,
    caller: &Address,
    kind: RewardKind,
    asset: &Address,
    root_id: u64,
    item_ids: &Vec<u32>,
    amounts: &Vec<i128>,
    proof: &Vec<BytesN<32>>,
) -> Result<(), Error> {
    caller.require_auth();
    storage::get_config(env)?;
    access::require_not_paused(env)?;
    validate_shape(kind, item_ids, amounts)?;

    let root = storage::get_root(env, asset, root_id).ok_or(Error::UnknownRoot)?;
    if storage::reward_root(env, asset).is_some_and(|latest| root_id < latest) {
        return Err(Error::RootSuperseded);
    }
    let leaf = merkle::leaf_hash(env, caller, asset, kind, item_ids, amounts, root_id);
    if !merkle::verify(env, proof, &root, leaf) {
        return Err(Error::InvalidProof);
    }
    if storage::is_claimed(env, caller, &root) {
        return Err(Error::AlreadyClaimed);
    }
    storage::set_claimed(env, caller, &root);

    let pool = env.current_contract_address();
    match kind {
        RewardKind::Fungible => {
            if let Some(amount) = amounts.first() {
                token::Client::new(env, asset).transfer(&pool, caller, &amount);
            }
        }
        RewardKind::NonFungible => {
            let client = CollectionClient::new(env, asset);
            for token_id in item_ids.iter() {
                client.transfer(&pool, caller, &token_id);
            }
        }
        RewardKind::SemiFungible => {
            let client = MultiTokenClient::new(env, asset);
            for (token_id, amount) in item_ids.iter().zip(amounts.iter()) {
                client.transfer(&pool, caller, &token_id, &amount);
            }
        }
    }

    log!(env, "claim paid", caller.clone(), root_id);
    events::claimed(env, caller, kind, asset, root_id);
    Ok(())
}
