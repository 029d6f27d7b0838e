//! Position ledger: custody of escrowed items and their power bookkeeping.

use soroban_sdk::{Address, Env, Vec};

use crate::access;
use crate::error::Error;
use crate::events;
use crate::interfaces::CollectionClient;
use crate::power::{self, Schedule};
use crate::registry;
use crate::storage;
use crate::types::{Custody, Position, TokenInfo, ACCRUAL_PERIOD, BASE_POWER};

fn fresh_position() -> Position {
    Position {
        depositor: None,
        last_deposit_time: 0,
        last_accrual_time: 0,
        accumulated_power: 0,
        cumulative_power: 0,
        remaining_duration: ACCRUAL_PERIOD,
        power: BASE_POWER,
        level: 1,
    }
}

pub fn deposit(env: &Env, caller: &Address, item_ids: &Vec<u32>) -> Result<(), Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    access::require_not_paused(env)?;
    if item_ids.is_empty() {
        return Err(Error::EmptyItemList);
    }

    let collection = CollectionClient::new(env, &config.collection);
    let pool = env.current_contract_address();
    let now = env.ledger().timestamp();

    for item_id in item_ids.iter() {
        let mut position = storage::get_position(env, item_id).unwrap_or_else(fresh_position);
        if position.depositor.is_some() {
            return Err(Error::ItemAlreadyDeposited);
        }
        let owner = match collection.try_owner_of(&item_id) {
            Ok(Ok(owner)) => owner,
            _ => return Err(Error::UnknownItem),
        };
        if owner != *caller {
            return Err(Error::NotItemOwner);
        }

        position.depositor = Some(caller.clone());
        position.last_deposit_time = now;
        position.last_accrual_time = now;
        storage::set_position(env, item_id, &position);
        registry::add_item(env, caller, item_id);

        collection.transfer(caller, &pool, &item_id);
        events::deposited(env, caller, item_id);
    }

    Ok(())
}

pub fn withdraw(env: &Env, caller: &Address, item_ids: &Vec<u32>) -> Result<(), Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    access::require_not_paused(env)?;
    if item_ids.is_empty() {
        return Err(Error::EmptyItemList);
    }

    let collection = CollectionClient::new(env, &config.collection);
    let pool = env.current_contract_address();
    let schedule = Schedule::load(env);
    let now = env.ledger().timestamp();

    for item_id in item_ids.iter() {
        let mut position = storage::get_position(env, item_id).ok_or(Error::NotDepositor)?;
        if position.depositor.as_ref() != Some(caller) {
            return Err(Error::NotDepositor);
        }

        let mut accrual = power::project(&position, &schedule, now);
        position.cumulative_power += accrual.accumulated;
        accrual.accumulated = 0;
        accrual.store_into(&mut position);

        storage::push_custody(
            env,
            item_id,
            &Custody {
                from: position.last_deposit_time,
                to: now,
            },
        );

        position.depositor = None;
        position.last_accrual_time = now;
        storage::set_position(env, item_id, &position);
        registry::remove_item(env, caller, item_id);

        collection.transfer(&pool, caller, &item_id);
        events::withdrawn(env, caller, item_id, position.cumulative_power);
    }

    Ok(())
}

// =============================================================================
// Read views
// =============================================================================

pub fn token_info(env: &Env, item_id: u32) -> TokenInfo {
    let Some(position) = storage::get_position(env, item_id) else {
        return TokenInfo {
            accumulated_power: 0,
            current_power: 0,
            depositor: None,
        };
    };
    let projected = power::project(&position, &Schedule::load(env), env.ledger().timestamp());
    TokenInfo {
        accumulated_power: if position.depositor.is_some() {
            projected.accumulated
        } else {
            0
        },
        current_power: projected.power,
        depositor: position.depositor,
    }
}

pub fn cumulative_power(env: &Env, item_id: u32) -> u128 {
    let Some(position) = storage::get_position(env, item_id) else {
        return 0;
    };
    if position.depositor.is_none() {
        return position.cumulative_power;
    }
    let projected = power::project(&position, &Schedule::load(env), env.ledger().timestamp());
    position.cumulative_power + projected.accumulated
}
