//! Read access to the master-data, rate and wallet contracts a policy
//! depends on.

use soroban_sdk::{contractclient, log, BytesN, Env, String};

use crate::calendar;
use crate::types::{
    CareProvider, ContractedRate, Error, Insurer, Person, ServiceDirectory, TreatmentLine,
};

#[contractclient(name = "PersonRegistryClient")]
pub trait PersonRegistryInterface {
    fn person(env: Env, bsn: String) -> Option<Person>;
}

#[contractclient(name = "CareProviderRegistryClient")]
pub trait CareProviderRegistryInterface {
    fn care_provider(env: Env, agb_code: String) -> Option<CareProvider>;
    fn practitioner(env: Env, agb_code: String) -> Option<CareProvider>;
    fn is_employed(env: Env, practice_code: String, practitioner_code: String) -> bool;
}

#[contractclient(name = "InsurerRegistryClient")]
pub trait InsurerRegistryInterface {
    fn insurer(env: Env, uzovi_code: String) -> Option<Insurer>;
}

/// Finds the rate an insurer agreed with a provider for a treatment code on a
/// given day (unix seconds at midnight).
#[contractclient(name = "RateRouterClient")]
pub trait RateRouterInterface {
    fn contracted_rate(
        env: Env,
        insurer_code: String,
        provider_code: String,
        code_list: String,
        code: String,
        day: u64,
    ) -> Option<ContractedRate>;
}

#[contractclient(name = "WalletClient")]
pub trait WalletInterface {
    /// Pays `amount` from `payer` and `co_amount` from `co_payer` to `payee`
    /// as one transfer identified by `reference`.
    fn combined_payment(
        env: Env,
        payer: String,
        payee: String,
        amount: i128,
        co_payer: String,
        co_amount: i128,
        reference: BytesN<32>,
    ) -> bool;
}

pub struct Lookup<'a> {
    env: &'a Env,
    directory: &'a ServiceDirectory,
}

impl<'a> Lookup<'a> {
    pub fn new(env: &'a Env, directory: &'a ServiceDirectory) -> Self {
        Self { env, directory }
    }

    pub fn person(&self, bsn: &String) -> Option<Person> {
        PersonRegistryClient::new(self.env, &self.directory.persons).person(bsn)
    }

    pub fn practice(&self, agb_code: &String) -> Option<CareProvider> {
        self.care_providers().care_provider(agb_code)
    }

    pub fn practitioner(&self, agb_code: &String) -> Option<CareProvider> {
        self.care_providers().practitioner(agb_code)
    }

    pub fn is_employed(&self, practice_code: &String, practitioner_code: &String) -> bool {
        self.care_providers()
            .is_employed(practice_code, practitioner_code)
    }

    pub fn insurer(&self, uzovi_code: &String) -> Option<Insurer> {
        InsurerRegistryClient::new(self.env, &self.directory.insurers).insurer(uzovi_code)
    }

    /// Rate for one line. A failing router is treated the same as a missing
    /// rate so the line falls back to the uncontracted factor.
    pub fn contracted_rate(
        &self,
        insurer_code: &String,
        provider_code: &String,
        line: &TreatmentLine,
    ) -> Option<ContractedRate> {
        let day = calendar::start_of_day(line.service_date);
        let router = RateRouterClient::new(self.env, &self.directory.rates);
        match router.try_contracted_rate(
            insurer_code,
            provider_code,
            &line.code_list,
            &line.code,
            &day,
        ) {
            Ok(Ok(rate)) => rate,
            _ => {
                log!(self.env, "rate lookup failed for code {}", line.code.clone());
                None
            }
        }
    }

    pub fn combined_payment(
        &self,
        payer: &String,
        payee: &String,
        amount: i128,
        co_payer: &String,
        co_amount: i128,
        reference: &BytesN<32>,
    ) -> Result<(), Error> {
        let wallet = WalletClient::new(self.env, &self.directory.wallet);
        match wallet.try_combined_payment(payer, payee, &amount, co_payer, &co_amount, reference) {
            Ok(Ok(true)) => Ok(()),
            _ => Err(Error::PaymentFailed),
        }
    }

    fn care_providers(&self) -> CareProviderRegistryClient<'a> {
        CareProviderRegistryClient::new(self.env, &self.directory.care_providers)
    }
}
