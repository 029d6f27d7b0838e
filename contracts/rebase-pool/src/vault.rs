//! Reward vault: pulls reward assets into escrow.
//!
//! No internal balances are kept. Payout sizes come entirely from the
//! published claim trees.

use soroban_sdk::{token, Address, Env, Vec};

use crate::error::Error;
use crate::events;
use crate::interfaces::{CollectionClient, MultiTokenClient};
use crate::storage;

pub fn provide_fungible(env: &Env, caller: &Address, asset: &Address, amount: i128) -> Result<(), Error> {
    caller.require_auth();
    storage::get_config(env)?;
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    token::Client::new(env, asset).transfer(caller, &env.current_contract_address(), &amount);
    events::fungible_reward(env, asset, amount);
    Ok(())
}

pub fn provide_non_fungible(
    env: &Env,
    caller: &Address,
    asset: &Address,
    token_ids: &Vec<u32>,
) -> Result<(), Error> {
    caller.require_auth();
    storage::get_config(env)?;
    if token_ids.is_empty() {
        return Err(Error::EmptyItemList);
    }

    let client = CollectionClient::new(env, asset);
    let pool = env.current_contract_address();
    for token_id in token_ids.iter() {
        client.transfer(caller, &pool, &token_id);
    }
    events::non_fungible_reward(env, asset, token_ids);
    Ok(())
}

pub fn provide_semi_fungible(
    env: &Env,
    caller: &Address,
    asset: &Address,
    token_ids: &Vec<u32>,
    amounts: &Vec<i128>,
) -> Result<(), Error> {
    caller.require_auth();
    storage::get_config(env)?;
    if token_ids.len() != amounts.len() {
        return Err(Error::ArrayLengthMismatch);
    }
    if token_ids.is_empty() {
        return Err(Error::EmptyItemList);
    }
    if amounts.iter().any(|amount| amount <= 0) {
        return Err(Error::InvalidAmount);
    }

    let client = MultiTokenClient::new(env, asset);
    let pool = env.current_contract_address();
    for (token_id, amount) in token_ids.iter().zip(amounts.iter()) {
        client.transfer(caller, &pool, &token_id, &amount);
    }
    events::semi_fungible_reward(env, asset, token_ids, amounts);
    Ok(())
}
