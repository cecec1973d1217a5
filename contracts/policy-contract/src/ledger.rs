//! Policy state kept in the shared state repository: entitlement per
//! patient and year, running balances, and processed treatments.

use core::fmt::Write;

use soroban_sdk::{
    contractclient,
    xdr::{FromXdr, ToXdr},
    Address, Bytes, Env, String, Symbol,
};

use crate::text::TextBuf;
use crate::types::{BalanceScope, Claim, EntitlementState, Error, PolicyConfig};

#[contractclient(name = "StateRepositoryClient")]
pub trait StateRepositoryInterface {
    fn get_balance(env: Env, owner: Address, key: String) -> i128;
    fn set_balance(env: Env, owner: Address, key: String, amount: i128);
    fn get_record(env: Env, owner: Address, key: String) -> Option<Bytes>;
    fn set_record(env: Env, owner: Address, key: String, value: Bytes);
}

const KEY_CAPACITY: usize = 160;

enum KeyPart<'p> {
    Lit(&'p str),
    Code(&'p String),
    Year(u32),
}

fn compose(env: &Env, parts: &[KeyPart]) -> Result<String, Error> {
    let mut key = TextBuf::<KEY_CAPACITY>::new();
    for part in parts {
        let written = match part {
            KeyPart::Lit(text) => key.push_bytes(text.as_bytes()),
            KeyPart::Code(code) => key.push_string(code),
            KeyPart::Year(year) => write!(key, "{}", year),
        };
        written.map_err(|_| Error::KeyTooLong)?;
    }
    Ok(key.finish(env))
}

/// `{contract}:{bsn}:{year}`
pub fn entitlement_key(env: &Env, contract_code: &String, bsn: &String, year: u32) -> Result<String, Error> {
    compose(
        env,
        &[
            KeyPart::Code(contract_code),
            KeyPart::Lit(":"),
            KeyPart::Code(bsn),
            KeyPart::Lit(":"),
            KeyPart::Year(year),
        ],
    )
}

pub fn balance_key(env: &Env, config: &PolicyConfig, scope: &BalanceScope, year: u32) -> Result<String, Error> {
    match scope {
        BalanceScope::Provider(agb_code) => compose(
            env,
            &[
                KeyPart::Lit("AGBBAL-"),
                KeyPart::Code(agb_code),
                KeyPart::Lit(":"),
                KeyPart::Year(year),
            ],
        ),
        BalanceScope::Patient(bsn) => compose(
            env,
            &[
                KeyPart::Lit("BSNBAL-"),
                KeyPart::Code(bsn),
                KeyPart::Lit(":"),
                KeyPart::Year(year),
            ],
        ),
        BalanceScope::Contract => compose(
            env,
            &[
                KeyPart::Code(&config.contract_code),
                KeyPart::Lit(":CTCBAL:"),
                KeyPart::Year(year),
            ],
        ),
        BalanceScope::Insurer => compose(
            env,
            &[
                KeyPart::Lit("UZOVIBAL-"),
                KeyPart::Code(&config.insurer_code),
                KeyPart::Lit(":"),
                KeyPart::Year(year),
            ],
        ),
    }
}

pub fn treatment_key(env: &Env, treatment_ref: &String) -> Result<String, Error> {
    compose(env, &[KeyPart::Lit("TREATMENT-"), KeyPart::Code(treatment_ref)])
}

pub struct BalanceLedger<'a> {
    env: &'a Env,
    config: &'a PolicyConfig,
    repository: StateRepositoryClient<'a>,
    owner: Address,
}

impl<'a> BalanceLedger<'a> {
    pub fn new(env: &'a Env, config: &'a PolicyConfig) -> Self {
        Self {
            env,
            config,
            repository: StateRepositoryClient::new(env, &config.directory.state_repository),
            owner: env.current_contract_address(),
        }
    }

    pub fn entitlement(&self, bsn: &String, year: u32) -> Result<Option<EntitlementState>, Error> {
        let key = entitlement_key(self.env, &self.config.contract_code, bsn, year)?;
        self.load(&key)
    }

    /// Persists the state and publishes it as a `policy_altered` event.
    pub fn save_entitlement(&self, bsn: &String, year: u32, state: &EntitlementState) -> Result<(), Error> {
        let key = entitlement_key(self.env, &self.config.contract_code, bsn, year)?;
        self.store(&key, state);

        self.env.events().publish(
            (Symbol::new(self.env, "policy_altered"), bsn.clone()),
            (year, state.clone()),
        );
        Ok(())
    }

    pub fn balance(&self, scope: &BalanceScope, year: u32) -> Result<i128, Error> {
        let key = balance_key(self.env, self.config, scope, year)?;
        Ok(self.repository.get_balance(&self.owner, &key))
    }

    /// Adds `amount` to a running balance and returns the new total.
    pub fn add_to_balance(&self, scope: &BalanceScope, year: u32, amount: i128) -> Result<i128, Error> {
        let key = balance_key(self.env, self.config, scope, year)?;
        let total = self.repository.get_balance(&self.owner, &key) + amount;
        self.repository.set_balance(&self.owner, &key, &total);
        Ok(total)
    }

    pub fn treatment(&self, treatment_ref: &String) -> Result<Option<Claim>, Error> {
        let key = treatment_key(self.env, treatment_ref)?;
        self.load(&key)
    }

    pub fn record_treatment(&self, claim: &Claim) -> Result<(), Error> {
        let key = treatment_key(self.env, &claim.header.treatment_ref)?;
        self.store(&key, claim);
        Ok(())
    }

    fn load<T: FromXdr>(&self, key: &String) -> Result<Option<T>, Error> {
        match self.repository.get_record(&self.owner, key) {
            Some(bytes) => T::from_xdr(self.env, &bytes)
                .map(Some)
                .map_err(|_| Error::CorruptRecord),
            None => Ok(None),
        }
    }

    fn store<T: ToXdr + Clone>(&self, key: &String, value: &T) {
        let bytes = value.clone().to_xdr(self.env);
        self.repository.set_record(&self.owner, key, &bytes);
    }
}
