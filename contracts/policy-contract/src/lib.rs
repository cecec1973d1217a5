#![no_std]

mod calendar;
mod config;
mod geo;
mod ledger;
mod lookup;
pub mod pricing;
mod settlement;
mod storage;
mod text;
mod types;
mod validator;

#[cfg(test)]
mod mocks;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};

use ledger::BalanceLedger;
use lookup::Lookup;
use storage::*;
use validator::ClaimValidator;

pub use ledger::{StateRepositoryClient, StateRepositoryInterface};
pub use lookup::{
    CareProviderRegistryClient, CareProviderRegistryInterface, InsurerRegistryClient,
    InsurerRegistryInterface, PersonRegistryClient, PersonRegistryInterface, RateRouterClient,
    RateRouterInterface, WalletClient, WalletInterface,
};
pub use types::*;

/// One insurance product: adjudicates treatment claims against the yearly
/// entitlement of the insured and settles approved ones.
#[contract]
pub struct PolicyContract;

#[contractimpl]
impl PolicyContract {
    /// Bind this deployment to its product parameters and collaborators.
    pub fn initialize(env: Env, admin: Address, config: PolicyConfig) -> Result<(), Error> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        config::validate(&config)?;

        save_admin(&env, &admin);
        save_config(&env, &config);

        env.events().publish(
            (Symbol::new(&env, "policy_initialized"),),
            (config.insurer_code, config.contract_code, admin),
        );

        Ok(())
    }

    pub fn config(env: Env) -> Result<PolicyConfig, Error> {
        config::current(&env)
    }

    pub fn get_insurer_code(env: Env) -> Result<String, Error> {
        Ok(config::current(&env)?.insurer_code)
    }

    /// Entitlement state of a patient for one benefit year.
    pub fn query(env: Env, bsn: String, year: u32) -> Result<EntitlementState, Error> {
        let config = config::current(&env)?;
        let year = calendar::check_year(year)?;

        BalanceLedger::new(&env, &config)
            .entitlement(&bsn, year)?
            .ok_or(Error::EntitlementNotFound)
    }

    /// Open a patient's benefit year with the full yearly cap.
    pub fn init_values(env: Env, bsn: String, year: u32) -> Result<(), Error> {
        let admin = load_admin(&env).ok_or(Error::NotInitialized)?;
        admin.require_auth();

        let config = config::current(&env)?;
        let year = calendar::check_year(year)?;

        Lookup::new(&env, &config.directory)
            .person(&bsn)
            .ok_or(Error::UnknownPatient)?;

        let ledger = BalanceLedger::new(&env, &config);
        if ledger.entitlement(&bsn, year)?.is_some() {
            return Err(Error::EntitlementExists);
        }

        let state = EntitlementState {
            remaining: config.yearly_cap,
            unit: config.unit,
            last_claim: None,
        };
        ledger.save_entitlement(&bsn, year, &state)
    }

    /// Dry run: what settling `claim` now would yield. Rejections come back
    /// as a `Rejected` outcome, nothing is written.
    pub fn validate_claim(env: Env, claim: Claim) -> Result<Outcome, Error> {
        let config = config::current(&env)?;
        Ok(ClaimValidator::new(&env, &config).validate(&claim))
    }

    /// Validate and settle a claim. A rejection is returned as the matching
    /// error and leaves no trace in the ledger.
    pub fn do_claim(env: Env, claim: Claim) -> Result<Outcome, Error> {
        let config = config::current(&env)?;
        settlement::settle(&env, &config, &claim)
    }

    pub fn balance(env: Env, scope: BalanceScope, year: u32) -> Result<i128, Error> {
        let config = config::current(&env)?;
        let year = calendar::check_year(year)?;
        BalanceLedger::new(&env, &config).balance(&scope, year)
    }
}
