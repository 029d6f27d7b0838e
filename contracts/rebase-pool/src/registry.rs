//! Enumerable index of depositors and the items each of them holds.
//!
//! Both lists are stored as arenas: a slot counter, `slot -> value` entries
//! and a `value -> slot` back index. Removal swaps the last slot into the
//! freed one and truncates, so every operation touches a constant number of
//! entries.

use soroban_sdk::{Address, Env, Vec};

use crate::error::Error;
use crate::storage;
use crate::types::DataKey;

pub fn depositor_count(env: &Env) -> u32 {
    storage::read(env, &DataKey::DepositorCount).unwrap_or(0)
}

pub fn depositor_at(env: &Env, index: u32) -> Result<Address, Error> {
    if index >= depositor_count(env) {
        return Err(Error::IndexOutOfBounds);
    }
    storage::read(env, &DataKey::DepositorAt(index)).ok_or(Error::IndexOutOfBounds)
}

pub fn held_count(env: &Env, account: &Address) -> u32 {
    storage::read(env, &DataKey::HeldCount(account.clone())).unwrap_or(0)
}

pub fn held_item_at(env: &Env, account: &Address, index: u32) -> Result<u32, Error> {
    if index >= held_count(env, account) {
        return Err(Error::IndexOutOfBounds);
    }
    storage::read(env, &DataKey::HeldAt(account.clone(), index)).ok_or(Error::IndexOutOfBounds)
}

pub fn held_items(env: &Env, account: &Address) -> Vec<u32> {
    let mut items = Vec::new(env);
    for index in 0..held_count(env, account) {
        if let Some(item) = storage::read(env, &DataKey::HeldAt(account.clone(), index)) {
            items.push_back(item);
        }
    }
    items
}

/// Record `item_id` as held by `account`, enrolling the account as a
/// depositor when this is its first held item.
pub fn add_item(env: &Env, account: &Address, item_id: u32) {
    let count = held_count(env, account);
    if count == 0 {
        add_depositor(env, account);
    }
    storage::write(env, &DataKey::HeldAt(account.clone(), count), &item_id);
    storage::write(env, &DataKey::HeldIndex(item_id), &count);
    storage::write(env, &DataKey::HeldCount(account.clone()), &(count + 1));
}

/// Drop `item_id` from `account`'s held list, removing the account from the
/// depositor set once nothing is left.
pub fn remove_item(env: &Env, account: &Address, item_id: u32) {
    let count = held_count(env, account);
    let Some(index) = storage::read::<u32>(env, &DataKey::HeldIndex(item_id)) else {
        return;
    };
    if count == 0 {
        return;
    }
    let last = count - 1;
    if index != last {
        let moved: u32 = storage::read(env, &DataKey::HeldAt(account.clone(), last))
            .unwrap_or(item_id);
        storage::write(env, &DataKey::HeldAt(account.clone(), index), &moved);
        storage::write(env, &DataKey::HeldIndex(moved), &index);
    }
    storage::remove(env, &DataKey::HeldAt(account.clone(), last));
    storage::remove(env, &DataKey::HeldIndex(item_id));

    if last == 0 {
        storage::remove(env, &DataKey::HeldCount(account.clone()));
        remove_depositor(env, account);
    } else {
        storage::write(env, &DataKey::HeldCount(account.clone()), &last);
    }
}

fn add_depositor(env: &Env, account: &Address) {
    let count = depositor_count(env);
    storage::write(env, &DataKey::DepositorAt(count), account);
    storage::write(env, &DataKey::DepositorIndex(account.clone()), &count);
    storage::write(env, &DataKey::DepositorCount, &(count + 1));
}

fn remove_depositor(env: &Env, account: &Address) {
    let Some(index) = storage::read::<u32>(env, &DataKey::DepositorIndex(account.clone())) else {
        return;
    };
    let count = depositor_count(env);
    if count == 0 {
        return;
    }
    let last = count - 1;
    if index != last {
        if let Some(moved) = storage::read::<Address>(env, &DataKey::DepositorAt(last)) {
            storage::write(env, &DataKey::DepositorAt(index), &moved);
            storage::write(env, &DataKey::DepositorIndex(moved), &index);
        }
    }
    storage::remove(env, &DataKey::DepositorAt(last));
    storage::remove(env, &DataKey::DepositorIndex(account.clone()));
    storage::write(env, &DataKey::DepositorCount, &last);
}
