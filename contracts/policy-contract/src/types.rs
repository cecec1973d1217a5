use soroban_sdk::{contracterror, contracttype, Address, String, Vec};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfig = 3,
    InvalidYear = 4,
    EntitlementNotFound = 5,
    EntitlementExists = 6,
    MalformedClaim = 7,
    DuplicateTreatment = 8,
    UnknownPatient = 9,
    UnknownPractice = 10,
    UnknownPractitioner = 11,
    PractitionerNotEmployed = 12,
    LocationNotQualified = 13,
    WalletUnavailable = 14,
    PaymentFailed = 15,
    CorruptRecord = 16,
    KeyTooLong = 17,
}

// -----------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------

/// How the yearly entitlement is counted down.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntitlementUnit {
    /// "behandelingen": one unit per reimbursed claim.
    Treatments,
    /// Minor currency units of the covered amount.
    Money,
}

/// Addresses of the collaborating contracts a policy talks to.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceDirectory {
    pub persons: Address,
    pub care_providers: Address,
    pub insurers: Address,
    pub rates: Address,
    pub wallet: Address,
    pub state_repository: Address,
}

/// Static parameters of one deployed insurance product.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyConfig {
    /// UZOVI code of the insurer.
    pub insurer_code: String,
    pub contract_code: String,
    pub unit: EntitlementUnit,
    /// Zero disables entitlement tracking.
    pub yearly_cap: i128,
    /// Share of the billed tariff paid without a negotiated rate, in basis
    /// points (8000 = 80%).
    pub uncontracted_factor_bp: u32,
    pub location_check: bool,
    pub directory: ServiceDirectory,
}

// -----------------------------------------------------------------------
// Claim
// -----------------------------------------------------------------------

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimHeader {
    /// AGB code of the treating practice.
    pub practice_code: String,
    /// AGB code of the treating practitioner; empty when the practice itself
    /// is the practitioner.
    pub practitioner_code: String,
    pub service_bureau_code: String,
    pub institution_code: String,
    pub pay_to: String,
    /// Unique reference of the treatment being claimed.
    pub treatment_ref: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Insured {
    pub bsn: String,
    pub name: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreatmentLine {
    pub code_list: String,
    pub code: String,
    /// Billed tariff in minor currency units.
    pub tariff: i128,
    /// Filled in by validation.
    pub covered: i128,
    /// Unix seconds.
    pub service_date: u64,
}

/// Decimal-degree coordinates as submitted, e.g. "52.370216".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeoLocation {
    pub lat: String,
    pub lon: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    pub header: ClaimHeader,
    pub insured: Insured,
    pub lines: Vec<TreatmentLine>,
    pub location: Option<GeoLocation>,
}

// -----------------------------------------------------------------------
// Master data
// -----------------------------------------------------------------------

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Person {
    pub bsn: String,
    pub name: String,
    pub wallet_id: String,
}

/// A practice or an individual practitioner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CareProvider {
    pub agb_code: String,
    pub name: String,
    pub wallet_id: String,
    pub locations: Vec<GeoLocation>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Insurer {
    pub uzovi_code: String,
    pub name: String,
    pub wallet_id: String,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RateOrigin {
    /// "Contractafspraak": tariff negotiated with the provider.
    Contract,
    /// "Polisvoorwaarden": tariff and percentage from the policy terms.
    PolicyTerms,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractedRate {
    pub code_list: String,
    pub code: String,
    pub tariff: i128,
    pub description: String,
    pub percentage: u32,
    pub origin: RateOrigin,
}

// -----------------------------------------------------------------------
// Ledger state
// -----------------------------------------------------------------------

/// Remaining yearly entitlement of one patient under this policy.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntitlementState {
    /// May be negative once a claim overdraws the entitlement.
    pub remaining: i128,
    pub unit: EntitlementUnit,
    pub last_claim: Option<Claim>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BalanceScope {
    /// Practice AGB code.
    Provider(String),
    /// Patient BSN.
    Patient(String),
    Contract,
    Insurer,
}

// -----------------------------------------------------------------------
// Outcome
// -----------------------------------------------------------------------

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResultCode {
    /// "OK"
    Approved,
    /// "FOUT"; the message names the first failing check.
    Rejected,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineDetail {
    pub line: TreatmentLine,
    pub description: String,
    pub note: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub provider_code: String,
    pub result: ResultCode,
    pub remaining_entitlement: i128,
    pub covered_amount: i128,
    pub entitlement_unit: Option<EntitlementUnit>,
    pub co_payment: i128,
    pub message: String,
    pub lines: Vec<LineDetail>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Config,
}
