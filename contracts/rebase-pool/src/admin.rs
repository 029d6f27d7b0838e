//! Administrative surface: levelling schedule and role/address updates.

use soroban_sdk::{symbol_short, vec, Address, Env, Vec};

use crate::access;
use crate::error::Error;
use crate::events;
use crate::storage;
use crate::types::{Config, ScheduleEpoch};

pub fn default_schedule(env: &Env, effective_from: u64) -> ScheduleEpoch {
    ScheduleEpoch {
        effective_from,
        increase: vec![env, 10_000, 15_000, 20_000],
        base: vec![env, 0, 15_000, 20_000],
    }
}

/// Overwrite the entry for `year`, or append when `year` is one past the end.
fn put_factor(table: &mut Vec<u32>, year: u32, factor: u32) -> Result<(), Error> {
    if year < table.len() {
        table.set(year, factor);
    } else if year == table.len() {
        table.push_back(factor);
    } else {
        return Err(Error::ScheduleIndexOutOfRange);
    }
    Ok(())
}

/// Store a new schedule version derived from the latest one. It governs
/// accrual periods that complete after now; earlier periods keep the
/// version they completed under.
fn amend_schedule(
    env: &Env,
    apply: impl FnOnce(&mut ScheduleEpoch) -> Result<(), Error>,
) -> Result<ScheduleEpoch, Error> {
    let now = env.ledger().timestamp();
    let mut epochs = storage::schedule(env);
    let latest = epochs.last();
    let mut epoch = latest
        .clone()
        .unwrap_or_else(|| default_schedule(env, now));
    apply(&mut epoch)?;
    epoch.effective_from = now;

    // Amendments within one ledger second collapse into a single version.
    match latest {
        Some(last) if last.effective_from == now => epochs.set(epochs.len() - 1, epoch.clone()),
        _ => epochs.push_back(epoch.clone()),
    }
    storage::set_schedule(env, &epochs);
    Ok(epoch)
}

pub fn set_increase_factor(env: &Env, caller: &Address, year: u32, factor: u32) -> Result<(), Error> {
    access::require_admin(env, caller)?;
    let epoch = amend_schedule(env, |epoch| put_factor(&mut epoch.increase, year, factor))?;
    events::schedule_updated(env, year, factor, epoch.base_factor(year));
    Ok(())
}

pub fn set_base_factor(env: &Env, caller: &Address, year: u32, factor: u32) -> Result<(), Error> {
    access::require_admin(env, caller)?;
    let epoch = amend_schedule(env, |epoch| put_factor(&mut epoch.base, year, factor))?;
    events::schedule_updated(env, year, epoch.increase_factor(year), factor);
    Ok(())
}

fn update_config(
    env: &Env,
    caller: &Address,
    apply: impl FnOnce(&mut Config),
) -> Result<(), Error> {
    let mut config = access::require_admin(env, caller)?;
    apply(&mut config);
    storage::set_config(env, &config);
    Ok(())
}

pub fn set_admin(env: &Env, caller: &Address, admin: &Address) -> Result<(), Error> {
    update_config(env, caller, |config| config.admin = admin.clone())?;
    events::config_updated(env, symbol_short!("admin"), admin);
    Ok(())
}

pub fn set_authority(env: &Env, caller: &Address, authority: &Address) -> Result<(), Error> {
    update_config(env, caller, |config| config.authority = authority.clone())?;
    events::config_updated(env, symbol_short!("authority"), authority);
    Ok(())
}

pub fn set_treasury(env: &Env, caller: &Address, treasury: &Address) -> Result<(), Error> {
    update_config(env, caller, |config| config.treasury = treasury.clone())?;
    events::config_updated(env, symbol_short!("treasury"), treasury);
    Ok(())
}

pub fn set_reward_asset(env: &Env, caller: &Address, asset: &Address) -> Result<(), Error> {
    update_config(env, caller, |config| config.reward_asset = asset.clone())?;
    events::config_updated(env, symbol_short!("reward"), asset);
    Ok(())
}
