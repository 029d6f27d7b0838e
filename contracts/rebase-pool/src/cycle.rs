//! Cycle state machine: launch, pause gate and root publication.

use soroban_sdk::{log, Address, BytesN, Env};

use crate::access;
use crate::error::Error;
use crate::events;
use crate::storage;
use crate::types::{Position, ACCRUAL_PERIOD};

pub fn launch(env: &Env, caller: &Address) -> Result<(), Error> {
    access::require_admin(env, caller)?;
    if storage::is_launched(env) {
        return Err(Error::AlreadyLaunched);
    }

    let now = env.ledger().timestamp();
    storage::set_launched(env);
    storage::set_paused(env, false);
    storage::set_cycle_id(env, 0);
    storage::set_cycle_start(env, 0, now);

    log!(env, "pool launched", now);
    events::launched(env, now);
    Ok(())
}

pub fn pause(env: &Env, caller: &Address) -> Result<(), Error> {
    access::require_authority(env, caller)?;
    access::require_not_paused(env)?;
    storage::set_paused(env, true);
    events::paused(env, caller);
    Ok(())
}

pub fn unpause(env: &Env, caller: &Address) -> Result<(), Error> {
    access::require_authority(env, caller)?;
    access::require_launched(env)?;
    access::require_paused(env)?;
    storage::set_paused(env, false);
    events::unpaused(env, caller);
    Ok(())
}

/// Store `root` under the next shared root id. Publishing for the reward
/// asset also closes the open cycle.
pub fn publish_root(
    env: &Env,
    caller: &Address,
    asset: &Address,
    root: &BytesN<32>,
) -> Result<u64, Error> {
    let config = access::require_authority(env, caller)?;
    access::require_launched(env)?;
    access::require_paused(env)?;

    let root_id = storage::next_root_id(env);
    storage::set_root(env, asset, root_id, root);
    storage::set_next_root_id(env, root_id + 1);
    events::root_published(env, asset, root_id, root);

    if *asset == config.reward_asset {
        let now = env.ledger().timestamp();
        let closing = storage::cycle_id(env);

        storage::set_last_reward_root_id(env, root_id);
        storage::set_reward_root(env, asset, root_id);
        storage::set_cycle_id(env, closing + 1);
        storage::set_cycle_start(env, closing + 1, now);

        log!(env, "cycle advanced", closing + 1, root_id);
        events::cycle_advanced(env, closing + 1, now);
    }

    Ok(root_id)
}

/// Seconds `position` has been in custody since the later of its last
/// deposit and the start of the open cycle.
fn duration_in_cycle(position: &Position, cycle_start: u64, now: u64) -> u64 {
    now.saturating_sub(position.last_deposit_time.max(cycle_start))
}

pub fn is_eligible(env: &Env, item_id: u32) -> bool {
    let Some(position) = storage::get_position(env, item_id) else {
        return false;
    };
    if position.depositor.is_none() || !storage::is_launched(env) {
        return false;
    }
    let now = env.ledger().timestamp();
    duration_in_cycle(&position, storage::cycle_start(env), now) >= ACCRUAL_PERIOD
}

/// Start of the custody session that covered `at`, if the item was held
/// then. The open session is checked first, then the finished sessions by
/// binary search on their start.
fn session_covering(env: &Env, item_id: u32, at: u64) -> Option<u64> {
    let position = storage::get_position(env, item_id)?;
    if position.depositor.is_some() && position.last_deposit_time <= at {
        return Some(position.last_deposit_time);
    }

    let (mut low, mut high) = (0, storage::custody_count(env, item_id));
    while low < high {
        let mid = low + (high - low) / 2;
        let custody = storage::custody_at(env, item_id, mid)?;
        if custody.from <= at {
            low = mid + 1;
        } else {
            high = mid;
        }
    }
    let custody = storage::custody_at(env, item_id, low.checked_sub(1)?)?;
    (at < custody.to).then_some(custody.from)
}

/// Duration recorded for an eligible item at the close of `cycle_id`. A
/// closed cycle ends where the next one starts; the open one ends now.
pub fn deposit_duration(env: &Env, cycle_id: u32, item_id: u32) -> u64 {
    let Some(start) = storage::cycle_start_of(env, cycle_id) else {
        return 0;
    };
    let end = if cycle_id < storage::cycle_id(env) {
        storage::cycle_start_of(env, cycle_id + 1).unwrap_or(start)
    } else {
        env.ledger().timestamp()
    };
    let Some(from) = session_covering(env, item_id, end) else {
        return 0;
    };
    let held = end.saturating_sub(from.max(start));
    if held >= ACCRUAL_PERIOD {
        held
    } else {
        0
    }
}
