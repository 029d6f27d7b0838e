use soroban_sdk::{Address, BytesN, Env, IntoVal, TryFromVal, Val, Vec};

use crate::error::Error;
use crate::types::{Config, Custody, DataKey, Position, ScheduleEpoch};

/// Bump amount for persistent storage entries (roughly 30 days in ledgers).
const LEDGER_BUMP: u32 = 518_400;
/// Threshold for bumping (roughly 15 days).
const LEDGER_THRESHOLD: u32 = 259_200;

// =============================================================================
// Generic helpers
// =============================================================================

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD, LEDGER_BUMP);
}

pub fn read<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
    }
    value
}

pub fn write<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, LEDGER_THRESHOLD, LEDGER_BUMP);
}

pub fn remove(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}

fn instance_get<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    env.storage().instance().get(key)
}

fn instance_set<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().instance().set(key, value);
}

// =============================================================================
// Lifecycle flags
// =============================================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    instance_set(env, &DataKey::Initialized, &true);
}

pub fn is_launched(env: &Env) -> bool {
    instance_get(env, &DataKey::Launched).unwrap_or(false)
}

pub fn set_launched(env: &Env) {
    instance_set(env, &DataKey::Launched, &true);
}

pub fn is_paused(env: &Env) -> bool {
    instance_get(env, &DataKey::Paused).unwrap_or(true)
}

pub fn set_paused(env: &Env, paused: bool) {
    instance_set(env, &DataKey::Paused, &paused);
}

// =============================================================================
// Config
// =============================================================================

pub fn get_config(env: &Env) -> Result<Config, Error> {
    let config = instance_get(env, &DataKey::Config).ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &Config) {
    instance_set(env, &DataKey::Config, config);
    bump_instance(env);
}

// =============================================================================
// Cycle and root counters
// =============================================================================

pub fn cycle_id(env: &Env) -> u32 {
    instance_get(env, &DataKey::CycleId).unwrap_or(0)
}

pub fn set_cycle_id(env: &Env, id: u32) {
    instance_set(env, &DataKey::CycleId, &id);
}

/// Start of the open cycle, or 0 before launch.
pub fn cycle_start(env: &Env) -> u64 {
    cycle_start_of(env, cycle_id(env)).unwrap_or(0)
}

pub fn cycle_start_of(env: &Env, cycle_id: u32) -> Option<u64> {
    read(env, &DataKey::CycleStart(cycle_id))
}

pub fn set_cycle_start(env: &Env, cycle_id: u32, start: u64) {
    write(env, &DataKey::CycleStart(cycle_id), &start);
}

pub fn next_root_id(env: &Env) -> u64 {
    instance_get(env, &DataKey::NextRootId).unwrap_or(0)
}

pub fn set_next_root_id(env: &Env, id: u64) {
    instance_set(env, &DataKey::NextRootId, &id);
}

pub fn last_reward_root_id(env: &Env) -> Option<u64> {
    instance_get(env, &DataKey::LastRewardRootId)
}

pub fn set_last_reward_root_id(env: &Env, id: u64) {
    instance_set(env, &DataKey::LastRewardRootId, &id);
}

// =============================================================================
// Levelling schedule
// =============================================================================

pub fn schedule(env: &Env) -> Vec<ScheduleEpoch> {
    instance_get(env, &DataKey::Schedule).unwrap_or_else(|| Vec::new(env))
}

pub fn set_schedule(env: &Env, epochs: &Vec<ScheduleEpoch>) {
    instance_set(env, &DataKey::Schedule, epochs);
}

// =============================================================================
// Positions
// =============================================================================

pub fn get_position(env: &Env, item_id: u32) -> Option<Position> {
    read(env, &DataKey::Position(item_id))
}

pub fn set_position(env: &Env, item_id: u32, position: &Position) {
    write(env, &DataKey::Position(item_id), position);
}

pub fn custody_count(env: &Env, item_id: u32) -> u32 {
    read(env, &DataKey::CustodyCount(item_id)).unwrap_or(0)
}

pub fn custody_at(env: &Env, item_id: u32, index: u32) -> Option<Custody> {
    read(env, &DataKey::Custody(item_id, index))
}

/// Append a finished custody session to the item's history.
pub fn push_custody(env: &Env, item_id: u32, custody: &Custody) {
    let count = custody_count(env, item_id);
    write(env, &DataKey::Custody(item_id, count), custody);
    write(env, &DataKey::CustodyCount(item_id), &(count + 1));
}

// =============================================================================
// Roots and claims
// =============================================================================

pub fn get_root(env: &Env, asset: &Address, root_id: u64) -> Option<BytesN<32>> {
    read(env, &DataKey::Root(asset.clone(), root_id))
}

pub fn set_root(env: &Env, asset: &Address, root_id: u64, root: &BytesN<32>) {
    write(env, &DataKey::Root(asset.clone(), root_id), root);
}

pub fn reward_root(env: &Env, asset: &Address) -> Option<u64> {
    read(env, &DataKey::RewardRoot(asset.clone()))
}

pub fn set_reward_root(env: &Env, asset: &Address, root_id: u64) {
    write(env, &DataKey::RewardRoot(asset.clone()), &root_id);
}

pub fn is_claimed(env: &Env, account: &Address, root: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Claimed(account.clone(), root.clone()))
}

pub fn set_claimed(env: &Env, account: &Address, root: &BytesN<32>) {
    write(env, &DataKey::Claimed(account.clone(), root.clone()), &true);
}
