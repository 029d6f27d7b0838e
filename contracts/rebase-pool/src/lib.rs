#![no_std]

mod access;
mod admin;
mod claim;
mod cycle;
mod error;
mod events;
mod interfaces;
mod ledger;
mod merkle;
mod power;
mod registry;
mod storage;
mod types;
mod vault;


use soroban_sdk::{contract, contractimpl, vec, Address, BytesN, Env, Vec};

pub use error::{Error, ErrorKind};
pub use interfaces::{CollectionClient, CollectionInterface, MultiTokenClient, MultiTokenInterface};
pub use types::{
    Config, Custody, Position, RewardKind, ScheduleEpoch, TokenInfo, ACCRUAL_PERIOD, BASE_POINTS, BASE_POWER,
    BASE_POWER_INCREASE, PERIODS_PER_YEAR,
};

#[contract]
pub struct RebasePool;

#[contractimpl]
impl RebasePool {
    /// Initialize the pool. The pool stays paused until `launch`.
    ///
    /// A second call fails with `AlreadyInitialized` and changes nothing.
    pub fn initialize(
        env: Env,
        admin: Address,
        authority: Address,
        collection: Address,
        reward_asset: Address,
        treasury: Address,
    ) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        storage::set_config(
            &env,
            &Config {
                admin: admin.clone(),
                authority: authority.clone(),
                collection,
                reward_asset,
                treasury,
            },
        );
        storage::set_schedule(
            &env,
            &vec![&env, admin::default_schedule(&env, env.ledger().timestamp())],
        );
        storage::set_paused(&env, true);
        storage::set_cycle_id(&env, 0);
        storage::set_next_root_id(&env, 0);
        storage::set_initialized(&env);

        events::initialized(&env, &admin, &authority);
        Ok(())
    }

    // =========================================================================
    // Cycle manager
    // =========================================================================

    /// Start cycle 0 and open the pool. Admin-only, once.
    pub fn launch(env: Env, caller: Address) -> Result<(), Error> {
        cycle::launch(&env, &caller)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        cycle::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        cycle::unpause(&env, &caller)
    }

    /// Publish a claim root for `asset`. Authority-only, while paused.
    ///
    /// Returns the root id the root was stored under. Publishing for the
    /// reward asset also advances the cycle.
    pub fn publish_root(
        env: Env,
        caller: Address,
        asset: Address,
        root: BytesN<32>,
    ) -> Result<u64, Error> {
        cycle::publish_root(&env, &caller, &asset, &root)
    }

    // =========================================================================
    // Position ledger
    // =========================================================================

    /// Move items from `caller` into escrow.
    pub fn deposit(env: Env, caller: Address, item_ids: Vec<u32>) -> Result<(), Error> {
        ledger::deposit(&env, &caller, &item_ids)
    }

    /// Release escrowed items back to their depositor, folding the session's
    /// accrued power into the lifetime total.
    pub fn withdraw(env: Env, caller: Address, item_ids: Vec<u32>) -> Result<(), Error> {
        ledger::withdraw(&env, &caller, &item_ids)
    }

    // =========================================================================
    // Reward vault
    // =========================================================================

    pub fn provide_fungible_reward(
        env: Env,
        caller: Address,
        asset: Address,
        amount: i128,
    ) -> Result<(), Error> {
        vault::provide_fungible(&env, &caller, &asset, amount)
    }

    pub fn provide_non_fungible_reward(
        env: Env,
        caller: Address,
        asset: Address,
        token_ids: Vec<u32>,
    ) -> Result<(), Error> {
        vault::provide_non_fungible(&env, &caller, &asset, &token_ids)
    }

    pub fn provide_semi_fungible_reward(
        env: Env,
        caller: Address,
        asset: Address,
        token_ids: Vec<u32>,
        amounts: Vec<i128>,
    ) -> Result<(), Error> {
        vault::provide_semi_fungible(&env, &caller, &asset, &token_ids, &amounts)
    }

    // =========================================================================
    // Claim verifier
    // =========================================================================

    /// Claim an entitlement committed to by the root stored under
    /// (`asset`, `root_id`). Each (caller, root) pair pays out once.
    #[allow(clippy::too_many_arguments)]
    pub fn claim(
        env: Env,
        caller: Address,
        kind: RewardKind,
        asset: Address,
        root_id: u64,
        item_ids: Vec<u32>,
        amounts: Vec<i128>,
        proof: Vec<BytesN<32>>,
    ) -> Result<(), Error> {
        claim::claim(&env, &caller, kind, &asset, root_id, &item_ids, &amounts, &proof)
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub fn set_increase_factor(env: Env, caller: Address, year: u32, factor: u32) -> Result<(), Error> {
        admin::set_increase_factor(&env, &caller, year, factor)
    }

    pub fn set_base_factor(env: Env, caller: Address, year: u32, factor: u32) -> Result<(), Error> {
        admin::set_base_factor(&env, &caller, year, factor)
    }

    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        admin::set_admin(&env, &caller, &new_admin)
    }

    pub fn set_authority(env: Env, caller: Address, authority: Address) -> Result<(), Error> {
        admin::set_authority(&env, &caller, &authority)
    }

    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), Error> {
        admin::set_treasury(&env, &caller, &treasury)
    }

    pub fn set_reward_asset(env: Env, caller: Address, asset: Address) -> Result<(), Error> {
        admin::set_reward_asset(&env, &caller, &asset)
    }

    // =========================================================================
    // Read views
    // =========================================================================

    pub fn config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn is_launched(env: Env) -> bool {
        storage::is_launched(&env)
    }

    pub fn current_cycle_id(env: Env) -> u32 {
        storage::cycle_id(&env)
    }

    pub fn current_cycle_start(env: Env) -> u64 {
        storage::cycle_start(&env)
    }

    pub fn cycle_start(env: Env, cycle_id: u32) -> Option<u64> {
        storage::cycle_start_of(&env, cycle_id)
    }

    pub fn next_root_id(env: Env) -> u64 {
        storage::next_root_id(&env)
    }

    pub fn last_reward_root_id(env: Env) -> Option<u64> {
        storage::last_reward_root_id(&env)
    }

    pub fn root(env: Env, asset: Address, root_id: u64) -> Option<BytesN<32>> {
        storage::get_root(&env, &asset, root_id)
    }

    /// Latest root id published for `asset` while it was the reward asset.
    /// Older roots of that asset no longer pay out.
    pub fn reward_root(env: Env, asset: Address) -> Option<u64> {
        storage::reward_root(&env, &asset)
    }

    pub fn is_claimed(env: Env, account: Address, root: BytesN<32>) -> bool {
        storage::is_claimed(&env, &account, &root)
    }

    pub fn increase_factor(env: Env, year: u32) -> u32 {
        power::Schedule::load(&env).increase_factor(year)
    }

    pub fn base_factor(env: Env, year: u32) -> u32 {
        power::Schedule::load(&env).base_factor(year)
    }

    /// Every schedule version, oldest first.
    pub fn schedule(env: Env) -> Vec<ScheduleEpoch> {
        storage::schedule(&env)
    }

    /// Live accumulated power, projected rate and depositor of an item.
    pub fn token_info(env: Env, item_id: u32) -> TokenInfo {
        ledger::token_info(&env, item_id)
    }

    /// Lifetime power of an item, including the open custody session.
    pub fn cumulative_power(env: Env, item_id: u32) -> u128 {
        ledger::cumulative_power(&env, item_id)
    }

    pub fn position(env: Env, item_id: u32) -> Option<Position> {
        storage::get_position(&env, item_id)
    }

    /// Whether an item has been in custody for a full accrual period within
    /// the open cycle.
    pub fn is_eligible(env: Env, item_id: u32) -> bool {
        cycle::is_eligible(&env, item_id)
    }

    /// Custody duration an item had at the close of `cycle_id`, counted from
    /// the later of its deposit and the cycle start. 0 unless the item was
    /// eligible then. The open cycle is measured up to now.
    pub fn deposit_duration(env: Env, cycle_id: u32, item_id: u32) -> u64 {
        cycle::deposit_duration(&env, cycle_id, item_id)
    }

    pub fn custody_count(env: Env, item_id: u32) -> u32 {
        storage::custody_count(&env, item_id)
    }

    pub fn custody_at(env: Env, item_id: u32, index: u32) -> Result<Custody, Error> {
        storage::custody_at(&env, item_id, index).ok_or(Error::IndexOutOfBounds)
    }

    pub fn depositor_count(env: Env) -> u32 {
        registry::depositor_count(&env)
    }

    pub fn depositor_at(env: Env, index: u32) -> Result<Address, Error> {
        registry::depositor_at(&env, index)
    }

    pub fn held_count(env: Env, account: Address) -> u32 {
        registry::held_count(&env, &account)
    }

    pub fn held_item_at(env: Env, account: Address, index: u32) -> Result<u32, Error> {
        registry::held_item_at(&env, &account, index)
    }

    pub fn held_items(env: Env, account: Address) -> Vec<u32> {
        registry::held_items(&env, &account)
    }
}
