//! Role and circuit-breaker checks applied at the top of every entry point.

use soroban_sdk::{Address, Env};

use crate::error::Error;
use crate::storage;
use crate::types::Config;

/// Authenticate `caller` and require it to hold the admin role.
pub fn require_admin(env: &Env, caller: &Address) -> Result<Config, Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    if *caller != config.admin {
        return Err(Error::MissingAdminRole);
    }
    Ok(config)
}

/// Authenticate `caller` and require it to hold the authority role.
pub fn require_authority(env: &Env, caller: &Address) -> Result<Config, Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    if *caller != config.authority {
        return Err(Error::MissingAuthorityRole);
    }
    Ok(config)
}

pub fn require_not_paused(env: &Env) -> Result<(), Error> {
    if storage::is_paused(env) {
        return Err(Error::ContractPaused);
    }
    Ok(())
}

pub fn require_paused(env: &Env) -> Result<(), Error> {
    if !storage::is_paused(env) {
        return Err(Error::ContractNotPaused);
    }
    Ok(())
}

pub fn require_launched(env: &Env) -> Result<(), Error> {
    if !storage::is_launched(env) {
        return Err(Error::NotLaunched);
    }
    Ok(())
}
