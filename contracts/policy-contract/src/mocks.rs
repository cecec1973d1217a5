//! In-memory stand-ins for the registries, the rate router and the wallet.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, BytesN, Env, String, Vec,
};

use crate::types::{CareProvider, ContractedRate, Insurer, Person};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateKey {
    pub insurer_code: String,
    pub provider_code: String,
    pub code_list: String,
    pub code: String,
    pub day: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payment {
    pub payer: String,
    pub payee: String,
    pub amount: i128,
    pub co_payer: String,
    pub co_amount: i128,
    pub reference: BytesN<32>,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RouterError {
    Unavailable = 1,
}

#[contracttype]
#[derive(Clone)]
pub enum MockKey {
    Person(String),
    Practice(String),
    Practitioner(String),
    Employment(String, String),
    Insurer(String),
    Rate(RateKey),
    Payments,
    Failing,
    RouterDown,
}

#[contract]
pub struct MockMasterData;

#[contractimpl]
impl MockMasterData {
    pub fn add_person(env: Env, person: Person) {
        env.storage()
            .instance()
            .set(&MockKey::Person(person.bsn.clone()), &person);
    }

    pub fn add_practice(env: Env, practice: CareProvider) {
        env.storage()
            .instance()
            .set(&MockKey::Practice(practice.agb_code.clone()), &practice);
    }

    pub fn add_practitioner(env: Env, practitioner: CareProvider, practice_code: String) {
        let code = practitioner.agb_code.clone();
        env.storage()
            .instance()
            .set(&MockKey::Practitioner(code.clone()), &practitioner);
        env.storage()
            .instance()
            .set(&MockKey::Employment(practice_code, code), &true);
    }

    pub fn add_insurer(env: Env, insurer: Insurer) {
        env.storage()
            .instance()
            .set(&MockKey::Insurer(insurer.uzovi_code.clone()), &insurer);
    }

    pub fn person(env: Env, bsn: String) -> Option<Person> {
        env.storage().instance().get(&MockKey::Person(bsn))
    }

    pub fn care_provider(env: Env, agb_code: String) -> Option<CareProvider> {
        env.storage().instance().get(&MockKey::Practice(agb_code))
    }

    pub fn practitioner(env: Env, agb_code: String) -> Option<CareProvider> {
        env.storage().instance().get(&MockKey::Practitioner(agb_code))
    }

    pub fn is_employed(env: Env, practice_code: String, practitioner_code: String) -> bool {
        env.storage()
            .instance()
            .get(&MockKey::Employment(practice_code, practitioner_code))
            .unwrap_or(false)
    }

    pub fn insurer(env: Env, uzovi_code: String) -> Option<Insurer> {
        env.storage().instance().get(&MockKey::Insurer(uzovi_code))
    }
}

#[contract]
pub struct MockRateRouter;

#[contractimpl]
impl MockRateRouter {
    pub fn set_rate(env: Env, key: RateKey, rate: ContractedRate) {
        env.storage().instance().set(&MockKey::Rate(key), &rate);
    }

    pub fn set_unavailable(env: Env, unavailable: bool) {
        env.storage()
            .instance()
            .set(&MockKey::RouterDown, &unavailable);
    }

    pub fn contracted_rate(
        env: Env,
        insurer_code: String,
        provider_code: String,
        code_list: String,
        code: String,
        day: u64,
    ) -> Result<Option<ContractedRate>, RouterError> {
        let unavailable: bool = env
            .storage()
            .instance()
            .get(&MockKey::RouterDown)
            .unwrap_or(false);
        if unavailable {
            return Err(RouterError::Unavailable);
        }

        let key = RateKey {
            insurer_code,
            provider_code,
            code_list,
            code,
            day,
        };
        Ok(env.storage().instance().get(&MockKey::Rate(key)))
    }
}

#[contract]
pub struct MockWallet;

#[contractimpl]
impl MockWallet {
    pub fn set_failing(env: Env, failing: bool) {
        env.storage().instance().set(&MockKey::Failing, &failing);
    }

    pub fn combined_payment(
        env: Env,
        payer: String,
        payee: String,
        amount: i128,
        co_payer: String,
        co_amount: i128,
        reference: BytesN<32>,
    ) -> bool {
        let failing: bool = env
            .storage()
            .instance()
            .get(&MockKey::Failing)
            .unwrap_or(false);
        if failing {
            return false;
        }

        let mut payments = Self::payments(env.clone());
        payments.push_back(Payment {
            payer,
            payee,
            amount,
            co_payer,
            co_amount,
            reference,
        });
        env.storage().instance().set(&MockKey::Payments, &payments);
        true
    }

    pub fn payments(env: Env) -> Vec<Payment> {
        env.storage()
            .instance()
            .get(&MockKey::Payments)
            .unwrap_or(Vec::new(&env))
    }
}
