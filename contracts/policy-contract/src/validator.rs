use core::fmt::Write;

use soroban_sdk::{log, Env, String, Vec};

use crate::calendar;
use crate::config::MAX_CODE_LEN;
use crate::geo::{self, Point};
use crate::ledger::BalanceLedger;
use crate::lookup::Lookup;
use crate::pricing::{self, PriceNote, RateTerms, MAX_TARIFF};
use crate::text::{Money, TextBuf};
use crate::types::{
    CareProvider, Claim, Error, LineDetail, Outcome, Person, PolicyConfig, ResultCode,
};

/// How far a claim's reported position may be from a practice location.
pub const MAX_PRESENCE_DISTANCE_MM: i128 = 500_000;

const MESSAGE_CAPACITY: usize = 256;

/// First check a claim failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    NoTreatmentLines,
    MissingReference,
    NegativeTariff,
    TariffOutOfRange,
    OutsideBenefitYears,
    CodeTooLong,
    DuplicateTreatment,
    UnknownPatient,
    UnknownPractice,
    UnknownPractitioner,
    NotEmployed,
    NotAtQualifyingLocation,
    Ledger(Error),
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::NoTreatmentLines => "Malformed claim: no treatment lines",
            Rejection::MissingReference => "Malformed claim: missing treatment reference",
            Rejection::NegativeTariff => "Malformed claim: negative tariff",
            Rejection::TariffOutOfRange => "Malformed claim: tariff out of range",
            Rejection::OutsideBenefitYears => "Malformed claim: service date outside benefit years",
            Rejection::CodeTooLong => "Malformed claim: code too long",
            Rejection::DuplicateTreatment => "Treatment already processed",
            Rejection::UnknownPatient => "BSN invalid: patient not found",
            Rejection::UnknownPractice => "Practice AGB code not known",
            Rejection::UnknownPractitioner => "Practitioner AGB code not known",
            Rejection::NotEmployed => "Practitioner not employed at practice",
            Rejection::NotAtQualifyingLocation => "Not present at a qualifying location",
            Rejection::Ledger(_) => "Policy state could not be read",
        }
    }

    pub fn error(&self) -> Error {
        match self {
            Rejection::NoTreatmentLines
            | Rejection::MissingReference
            | Rejection::NegativeTariff
            | Rejection::TariffOutOfRange
            | Rejection::OutsideBenefitYears
            | Rejection::CodeTooLong => Error::MalformedClaim,
            Rejection::DuplicateTreatment => Error::DuplicateTreatment,
            Rejection::UnknownPatient => Error::UnknownPatient,
            Rejection::UnknownPractice => Error::UnknownPractice,
            Rejection::UnknownPractitioner => Error::UnknownPractitioner,
            Rejection::NotEmployed => Error::PractitionerNotEmployed,
            Rejection::NotAtQualifyingLocation => Error::LocationNotQualified,
            Rejection::Ledger(error) => *error,
        }
    }
}

impl From<Error> for Rejection {
    fn from(error: Error) -> Self {
        Rejection::Ledger(error)
    }
}

/// An approved claim together with the records settlement builds on.
pub struct Assessment {
    pub outcome: Outcome,
    pub year: u32,
    pub patient: Person,
    pub practice: CareProvider,
}

/// Adjudicates claims against master data, rates and the entitlement ledger
/// without writing anything.
pub struct ClaimValidator<'a> {
    env: &'a Env,
    config: &'a PolicyConfig,
    ledger: BalanceLedger<'a>,
    lookup: Lookup<'a>,
}

impl<'a> ClaimValidator<'a> {
    pub fn new(env: &'a Env, config: &'a PolicyConfig) -> Self {
        Self {
            env,
            config,
            ledger: BalanceLedger::new(env, config),
            lookup: Lookup::new(env, &config.directory),
        }
    }

    pub fn ledger(&self) -> &BalanceLedger<'a> {
        &self.ledger
    }

    pub fn lookup(&self) -> &Lookup<'a> {
        &self.lookup
    }

    /// Outcome as reported to a caller: a rejection becomes a `Rejected`
    /// outcome carrying its message.
    pub fn validate(&self, claim: &Claim) -> Outcome {
        match self.assess(claim) {
            Ok(assessment) => assessment.outcome,
            Err(rejection) => rejected(self.env, rejection),
        }
    }

    pub fn assess(&self, claim: &Claim) -> Result<Assessment, Rejection> {
        let year = check_shape(claim)?;
        let header = &claim.header;
        log!(self.env, "validating treatment {}", header.treatment_ref.clone());
        let first_line = claim.lines.get(0).ok_or(Rejection::NoTreatmentLines)?;

        if let Some(previous) = self.ledger.treatment(&header.treatment_ref)? {
            if previous.header.treatment_ref == header.treatment_ref {
                return Err(Rejection::DuplicateTreatment);
            }
        }

        let patient = self
            .lookup
            .person(&claim.insured.bsn)
            .ok_or(Rejection::UnknownPatient)?;

        let remaining = self
            .ledger
            .entitlement(&claim.insured.bsn, year)?
            .map(|state| state.remaining)
            .unwrap_or(0);

        let practice = self
            .lookup
            .practice(&header.practice_code)
            .ok_or(Rejection::UnknownPractice)?;

        if !header.practitioner_code.is_empty() {
            self.lookup
                .practitioner(&header.practitioner_code)
                .ok_or(Rejection::UnknownPractitioner)?;
            if !self
                .lookup
                .is_employed(&header.practice_code, &header.practitioner_code)
            {
                return Err(Rejection::NotEmployed);
            }
        }

        if self.config.location_check && !self.at_practice_location(claim, &practice) {
            return Err(Rejection::NotAtQualifyingLocation);
        }

        let mut lines = Vec::new(self.env);
        let mut claimed: i128 = 0;
        let mut covered: i128 = 0;
        for line in claim.lines.iter() {
            let rate = self
                .lookup
                .contracted_rate(&self.config.insurer_code, &header.practice_code, &line);
            let terms = rate.as_ref().map(|rate| RateTerms {
                origin: rate.origin,
                tariff: rate.tariff,
                percentage: rate.percentage,
            });
            let price = pricing::price_line(
                line.tariff,
                first_line.tariff,
                terms,
                self.config.uncontracted_factor_bp,
            );

            claimed = claimed
                .checked_add(line.tariff)
                .ok_or(Rejection::TariffOutOfRange)?;
            covered = covered
                .checked_add(price.covered)
                .ok_or(Rejection::TariffOutOfRange)?;

            let mut priced = line.clone();
            priced.tariff = price.billed;
            priced.covered = price.covered;
            lines.push_back(LineDetail {
                line: priced,
                description: rate
                    .map(|rate| rate.description)
                    .unwrap_or_else(|| String::from_str(self.env, "")),
                note: render_note(self.env, price.note),
            });
        }

        let depletion =
            pricing::deplete(self.config.yearly_cap, remaining, self.config.unit, covered);
        log!(
            self.env,
            "claimed {} covered {} remaining {}",
            claimed,
            depletion.covered,
            depletion.remaining
        );
        let co_payment = pricing::co_payment(claimed, depletion.covered);

        let mut message = TextBuf::<MESSAGE_CAPACITY>::new();
        if depletion.exhausted {
            message.line("No entitlement remaining");
        }
        if co_payment > 0 {
            message.line("Not fully reimbursed, co-payment required");
        }

        let outcome = Outcome {
            provider_code: header.practice_code.clone(),
            result: ResultCode::Approved,
            remaining_entitlement: depletion.remaining,
            covered_amount: depletion.covered,
            entitlement_unit: Some(self.config.unit),
            co_payment,
            message: message.finish(self.env),
            lines,
        };

        Ok(Assessment {
            outcome,
            year,
            patient,
            practice,
        })
    }

    fn at_practice_location(&self, claim: &Claim, practice: &CareProvider) -> bool {
        let Some(location) = claim.location.as_ref() else {
            return false;
        };
        if location.lat.is_empty() || location.lon.is_empty() {
            return false;
        }
        let Some(here) = Point::parse(&location.lat, &location.lon) else {
            log!(self.env, "unreadable claim position for {}", claim.header.treatment_ref.clone());
            return false;
        };

        practice.locations.iter().any(|site| match Point::parse(&site.lat, &site.lon) {
            Some(site) => geo::distance_mm(here, site) <= MAX_PRESENCE_DISTANCE_MM,
            None => {
                log!(self.env, "skipping unreadable location of {}", practice.agb_code.clone());
                false
            }
        })
    }
}

/// Checks what can be checked without lookups and returns the benefit year.
fn check_shape(claim: &Claim) -> Result<u32, Rejection> {
    if claim.lines.is_empty() {
        return Err(Rejection::NoTreatmentLines);
    }
    let header = &claim.header;
    if header.treatment_ref.is_empty() {
        return Err(Rejection::MissingReference);
    }
    for code in [
        &header.treatment_ref,
        &header.practice_code,
        &header.practitioner_code,
        &claim.insured.bsn,
    ] {
        if code.len() > MAX_CODE_LEN {
            return Err(Rejection::CodeTooLong);
        }
    }
    for line in claim.lines.iter() {
        if line.tariff < 0 {
            return Err(Rejection::NegativeTariff);
        }
        if line.tariff > MAX_TARIFF {
            return Err(Rejection::TariffOutOfRange);
        }
    }
    let first_line = claim.lines.get(0).ok_or(Rejection::NoTreatmentLines)?;
    calendar::check_year(calendar::year_of(first_line.service_date))
        .map_err(|_| Rejection::OutsideBenefitYears)
}

fn rejected(env: &Env, rejection: Rejection) -> Outcome {
    Outcome {
        provider_code: String::from_str(env, ""),
        result: ResultCode::Rejected,
        remaining_entitlement: 0,
        covered_amount: 0,
        entitlement_unit: None,
        co_payment: 0,
        message: String::from_str(env, rejection.message()),
        lines: Vec::new(env),
    }
}

fn render_note(env: &Env, note: PriceNote) -> String {
    let mut text = TextBuf::<MESSAGE_CAPACITY>::new();
    // A note cut short by the buffer is still shown.
    let _ = match note {
        PriceNote::None => Ok(()),
        PriceNote::Uncontracted { percent } => write!(
            text,
            "No contracted rate, maximum reimbursement {} percent",
            percent
        ),
        PriceNote::NotReimbursed => text.write_str("This treatment is not reimbursed for this provider"),
        PriceNote::ContractTariff { tariff } => write!(
            text,
            "Contracted tariff with this provider is {}",
            Money(tariff)
        ),
        PriceNote::PolicyAmount { amount } => write!(
            text,
            "Under the policy terms the amount is {}",
            Money(amount)
        ),
        PriceNote::PolicyPercentage { percent, amount } => write!(
            text,
            "Under the policy terms {} percent is reimbursed: {}",
            percent,
            Money(amount)
        ),
    };
    text.finish(env)
}
