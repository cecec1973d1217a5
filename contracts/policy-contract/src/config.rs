use soroban_sdk::{Env, String};

use crate::pricing::BASIS_POINTS;
use crate::storage::load_config;
use crate::types::{Error, PolicyConfig};

/// Longest code (AGB, BSN, UZOVI, contract, treatment reference) accepted in
/// a configuration or a claim. Keeps composite ledger keys bounded.
pub const MAX_CODE_LEN: u32 = 64;

pub fn current(env: &Env) -> Result<PolicyConfig, Error> {
    load_config(env).ok_or(Error::NotInitialized)
}

pub fn validate(config: &PolicyConfig) -> Result<(), Error> {
    if !is_code(&config.insurer_code) || !is_code(&config.contract_code) {
        return Err(Error::InvalidConfig);
    }
    if config.yearly_cap < 0 {
        return Err(Error::InvalidConfig);
    }
    if config.uncontracted_factor_bp as i128 > BASIS_POINTS {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

fn is_code(code: &String) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LEN
}
