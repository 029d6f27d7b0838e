use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol, Vec};

use crate::types::RewardKind;

pub fn initialized(env: &Env, admin: &Address, authority: &Address) {
    env.events()
        .publish((symbol_short!("INIT"),), (admin.clone(), authority.clone()));
}

pub fn launched(env: &Env, start: u64) {
    env.events().publish((symbol_short!("LAUNCH"),), start);
}

pub fn paused(env: &Env, authority: &Address) {
    env.events()
        .publish((symbol_short!("PAUSE"),), authority.clone());
}

pub fn unpaused(env: &Env, authority: &Address) {
    env.events()
        .publish((symbol_short!("UNPAUSE"),), authority.clone());
}

pub fn deposited(env: &Env, depositor: &Address, item_id: u32) {
    env.events()
        .publish((symbol_short!("DEPOSIT"), depositor.clone()), item_id);
}

pub fn withdrawn(env: &Env, depositor: &Address, item_id: u32, cumulative_power: u128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), depositor.clone()),
        (item_id, cumulative_power),
    );
}

pub fn root_published(env: &Env, asset: &Address, root_id: u64, root: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("ROOT"), asset.clone()), (root_id, root.clone()));
}

pub fn cycle_advanced(env: &Env, cycle_id: u32, start: u64) {
    env.events()
        .publish((symbol_short!("CYCLE"),), (cycle_id, start));
}

pub fn fungible_reward(env: &Env, asset: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("RWD_FT"), asset.clone()), amount);
}

pub fn non_fungible_reward(env: &Env, asset: &Address, token_ids: &Vec<u32>) {
    env.events()
        .publish((symbol_short!("RWD_NFT"), asset.clone()), token_ids.clone());
}

pub fn semi_fungible_reward(env: &Env, asset: &Address, token_ids: &Vec<u32>, amounts: &Vec<i128>) {
    env.events().publish(
        (symbol_short!("RWD_SFT"), asset.clone()),
        (token_ids.clone(), amounts.clone()),
    );
}

pub fn claimed(env: &Env, account: &Address, kind: RewardKind, asset: &Address, root_id: u64) {
    env.events().publish(
        (symbol_short!("CLAIM"), account.clone()),
        (kind, asset.clone(), root_id),
    );
}

pub fn schedule_updated(env: &Env, year: u32, increase_factor: u32, base_factor: u32) {
    env.events().publish(
        (symbol_short!("SCHEDULE"),),
        (year, increase_factor, base_factor),
    );
}

pub fn config_updated(env: &Env, field: Symbol, value: &Address) {
    env.events()
        .publish((symbol_short!("CONFIG"), field), value.clone());
}
