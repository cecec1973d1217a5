#![no_std]

mod storage;
mod types;


use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, Symbol};
use storage::*;
pub use types::*;

/// Generic key/value store for balances and opaque records.
///
/// Every entry lives in the namespace of the address that wrote it, so
/// several policy contracts can share one repository without their keys
/// colliding. Writes require the owner's authorisation; reads are open.
#[contract]
pub struct StateRepository;

#[contractimpl]
impl StateRepository {
    /// Balance stored under `key`, zero when nothing was written yet.
    pub fn get_balance(env: Env, owner: Address, key: String) -> i128 {
        load_balance(&env, &owner, &key).unwrap_or(0)
    }

    pub fn set_balance(env: Env, owner: Address, key: String, amount: i128) {
        owner.require_auth();

        save_balance(&env, &owner, &key, amount);

        env.events().publish(
            (Symbol::new(&env, "balance_set"), owner),
            (key, amount),
        );
    }

    pub fn get_record(env: Env, owner: Address, key: String) -> Option<Bytes> {
        load_record(&env, &owner, &key)
    }

    pub fn set_record(env: Env, owner: Address, key: String, value: Bytes) {
        owner.require_auth();

        save_record(&env, &owner, &key, &value);

        env.events()
            .publish((Symbol::new(&env, "record_set"), owner), key);
    }
}
