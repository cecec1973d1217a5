//! Coverage arithmetic for treatment lines and claim totals.
//!
//! Everything here is pure so the rules can be checked without a ledger.

use crate::types::{EntitlementUnit, RateOrigin};

pub const BASIS_POINTS: i128 = 10_000;

/// Largest billed tariff a claim line may carry, in minor currency units.
pub const MAX_TARIFF: i128 = 1_000_000_000_000_000;

/// The numeric part of a rate found for a treatment code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateTerms {
    pub origin: RateOrigin,
    pub tariff: i128,
    pub percentage: u32,
}

/// Which rule priced a line; rendered into the line's note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceNote {
    None,
    Uncontracted { percent: i128 },
    NotReimbursed,
    ContractTariff { tariff: i128 },
    PolicyAmount { amount: i128 },
    PolicyPercentage { percent: u32, amount: i128 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinePrice {
    /// Billed tariff after clamping to a contract tariff.
    pub billed: i128,
    pub covered: i128,
    pub note: PriceNote,
}

/// Prices one line.
///
/// Without a rate the uncontracted factor applies to `fallback_base`, which
/// callers set to the billed tariff of the claim's first line.
pub fn price_line(
    billed: i128,
    fallback_base: i128,
    rate: Option<RateTerms>,
    uncontracted_factor_bp: u32,
) -> LinePrice {
    let mut billed = billed;
    let (covered, note) = match rate {
        None => (
            fallback_base.saturating_mul(uncontracted_factor_bp as i128) / BASIS_POINTS,
            PriceNote::Uncontracted {
                percent: uncontracted_factor_bp as i128 / 100,
            },
        ),
        Some(RateTerms {
            origin: RateOrigin::Contract,
            tariff,
            ..
        }) => {
            if tariff <= 0 {
                (0, PriceNote::NotReimbursed)
            } else if billed > tariff {
                billed = tariff;
                (tariff, PriceNote::ContractTariff { tariff })
            } else {
                (tariff, PriceNote::None)
            }
        }
        Some(RateTerms {
            origin: RateOrigin::PolicyTerms,
            tariff,
            percentage,
        }) => {
            if percentage == 0 {
                (tariff, PriceNote::PolicyAmount { amount: tariff })
            } else {
                // Saturated amounts exceed `billed` and are clamped below.
                let amount = tariff.saturating_mul(percentage as i128) / 100;
                (
                    amount,
                    PriceNote::PolicyPercentage {
                        percent: percentage,
                        amount,
                    },
                )
            }
        }
    };

    LinePrice {
        billed,
        covered: covered.clamp(0, billed.max(0)),
        note,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Depletion {
    pub remaining: i128,
    pub covered: i128,
    /// The claim overdrew the entitlement and nothing is covered.
    pub exhausted: bool,
}

/// Counts a claim's covered total down from the remaining entitlement.
pub fn deplete(yearly_cap: i128, remaining: i128, unit: EntitlementUnit, covered: i128) -> Depletion {
    if yearly_cap <= 0 {
        return Depletion {
            remaining: 0,
            covered,
            exhausted: false,
        };
    }

    let remaining = match unit {
        EntitlementUnit::Treatments if covered > 0 => remaining - 1,
        EntitlementUnit::Treatments => remaining,
        EntitlementUnit::Money => remaining - covered,
    };
    if remaining < 0 {
        Depletion {
            remaining,
            covered: 0,
            exhausted: true,
        }
    } else {
        Depletion {
            remaining,
            covered,
            exhausted: false,
        }
    }
}

pub fn co_payment(claimed: i128, covered: i128) -> i128 {
    if claimed > covered {
        claimed - covered
    } else {
        0
    }
}
