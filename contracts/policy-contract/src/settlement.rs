use soroban_sdk::{log, xdr::ToXdr, Bytes, BytesN, Env, String, Symbol};

use crate::types::{BalanceScope, Claim, EntitlementState, Error, Outcome, PolicyConfig};
use crate::validator::ClaimValidator;

/// Validates a claim and, when approved, books it: entitlement, balances,
/// the treatment record and the payment.
///
/// Any error returned from here aborts the invocation, so the host discards
/// every write made so far, including those in the state repository.
pub fn settle(env: &Env, config: &PolicyConfig, claim: &Claim) -> Result<Outcome, Error> {
    let validator = ClaimValidator::new(env, config);
    let assessment = validator.assess(claim).map_err(|rejection| {
        log!(env, "claim rejected: {}", String::from_str(env, rejection.message()));
        rejection.error()
    })?;
    let outcome = assessment.outcome;
    let year = assessment.year;
    let ledger = validator.ledger();
    let bsn = &claim.insured.bsn;

    let state = EntitlementState {
        remaining: outcome.remaining_entitlement,
        unit: config.unit,
        last_claim: Some(claim.clone()),
    };
    ledger.save_entitlement(bsn, year, &state)?;

    let covered = outcome.covered_amount;
    for scope in [
        BalanceScope::Provider(claim.header.practice_code.clone()),
        BalanceScope::Patient(bsn.clone()),
        BalanceScope::Contract,
        BalanceScope::Insurer,
    ] {
        ledger.add_to_balance(&scope, year, covered)?;
    }
    ledger.record_treatment(claim)?;
    log!(env, "booked {} for year {}", covered, year);

    let lookup = validator.lookup();
    let insurer = lookup
        .insurer(&config.insurer_code)
        .ok_or(Error::WalletUnavailable)?;
    let payer = wallet(&insurer.wallet_id)?;
    let payee = wallet(&assessment.practice.wallet_id)?;
    let co_payer = wallet(&assessment.patient.wallet_id)?;

    let settlement_id = settlement_id(env, &claim.header.treatment_ref);
    lookup
        .combined_payment(payer, payee, covered, co_payer, outcome.co_payment, &settlement_id)
        .inspect_err(|_| {
            log!(env, "payment failed for {}", claim.header.treatment_ref.clone());
        })?;

    env.events().publish(
        (
            Symbol::new(env, "claim_settled"),
            claim.header.treatment_ref.clone(),
        ),
        (settlement_id, covered, outcome.co_payment),
    );

    Ok(outcome)
}

fn wallet(wallet_id: &String) -> Result<&String, Error> {
    if wallet_id.is_empty() {
        Err(Error::WalletUnavailable)
    } else {
        Ok(wallet_id)
    }
}

/// Deterministic payment reference for one treatment in one ledger.
fn settlement_id(env: &Env, treatment_ref: &String) -> BytesN<32> {
    let mut preimage = Bytes::new(env);
    preimage.append(&treatment_ref.clone().to_xdr(env));
    preimage.extend_from_array(&env.ledger().sequence().to_be_bytes());
    env.crypto().sha256(&preimage).into()
}
