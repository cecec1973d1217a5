use soroban_sdk::{Address, Bytes, Env, String};

use crate::types::{DataKey, EntryKey};

const DAY_IN_LEDGERS: u32 = 17_280;
const ENTRY_TTL_THRESHOLD: u32 = 30 * DAY_IN_LEDGERS;
const ENTRY_TTL_EXTEND_TO: u32 = 100 * DAY_IN_LEDGERS;

fn entry(owner: &Address, key: &String) -> EntryKey {
    EntryKey {
        owner: owner.clone(),
        key: key.clone(),
    }
}

// -----------------------------------------------------------------------
// Balances
// -----------------------------------------------------------------------

pub fn load_balance(env: &Env, owner: &Address, key: &String) -> Option<i128> {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(entry(owner, key)))
}

pub fn save_balance(env: &Env, owner: &Address, key: &String, amount: i128) {
    let data_key = DataKey::Balance(entry(owner, key));
    env.storage().persistent().set(&data_key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&data_key, ENTRY_TTL_THRESHOLD, ENTRY_TTL_EXTEND_TO);
}

// -----------------------------------------------------------------------
// Records
// -----------------------------------------------------------------------

pub fn load_record(env: &Env, owner: &Address, key: &String) -> Option<Bytes> {
    env.storage()
        .persistent()
        .get(&DataKey::Record(entry(owner, key)))
}

pub fn save_record(env: &Env, owner: &Address, key: &String, value: &Bytes) {
    let data_key = DataKey::Record(entry(owner, key));
    env.storage().persistent().set(&data_key, value);
    env.storage()
        .persistent()
        .extend_ttl(&data_key, ENTRY_TTL_THRESHOLD, ENTRY_TTL_EXTEND_TO);
}
