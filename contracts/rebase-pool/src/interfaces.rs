//! Interfaces of the external asset contracts the pool talks to.
//!
//! Fungible rewards go through the standard `soroban_sdk::token` interface.

use soroban_sdk::{contractclient, Address, Env};

/// Non-fungible collection: the escrowed items and non-fungible rewards.
#[allow(dead_code)]
#[contractclient(name = "CollectionClient")]
pub trait CollectionInterface {
    fn owner_of(env: Env, token_id: u32) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u32);
}

/// Semi-fungible multi-token contract.
#[allow(dead_code)]
#[contractclient(name = "MultiTokenClient")]
pub trait MultiTokenInterface {
    fn balance(env: Env, owner: Address, token_id: u32) -> i128;
    fn transfer(env: Env, from: Address, to: Address, token_id: u32, amount: i128);
}
