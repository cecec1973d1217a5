use policy_contract::pricing::{co_payment, deplete, price_line, RateTerms, MAX_TARIFF};
use policy_contract::{EntitlementUnit, RateOrigin};
use proptest::prelude::*;

fn rate_terms() -> impl Strategy<Value = Option<RateTerms>> {
    prop_oneof![
        Just(None),
        (0..1_000_000i128).prop_map(|tariff| Some(RateTerms {
            origin: RateOrigin::Contract,
            tariff,
            percentage: 0,
        })),
        (0..1_000_000i128, 0..=100u32).prop_map(|(tariff, percentage)| Some(RateTerms {
            origin: RateOrigin::PolicyTerms,
            tariff,
            percentage,
        })),
    ]
}

fn unit() -> impl Strategy<Value = EntitlementUnit> {
    prop_oneof![Just(EntitlementUnit::Treatments), Just(EntitlementUnit::Money)]
}

proptest! {
    /// A line never pays out more than was billed, nor less than nothing.
    #[test]
    fn covered_stays_within_billed(
        billed in 0..1_000_000i128,
        first in 0..1_000_000i128,
        rate in rate_terms(),
        factor in 0..=10_000u32,
    ) {
        let price = price_line(billed, first, rate, factor);
        prop_assert!(price.billed <= billed);
        prop_assert!(price.covered >= 0);
        prop_assert!(price.covered <= price.billed);
    }

    /// Any tariff a rate router returns prices within the accepted billed range.
    #[test]
    fn router_tariffs_never_overflow(
        billed in 0..=MAX_TARIFF,
        tariff in any::<i128>(),
        percentage in any::<u32>(),
        policy_terms in any::<bool>(),
    ) {
        let origin = if policy_terms { RateOrigin::PolicyTerms } else { RateOrigin::Contract };
        let price = price_line(billed, billed, Some(RateTerms { origin, tariff, percentage }), 10_000);
        prop_assert!(price.covered >= 0);
        prop_assert!(price.covered <= price.billed);
    }

    /// A positive contract tariff is the most a provider can bill.
    #[test]
    fn contract_tariff_bounds_billed(billed in 0..1_000_000i128, tariff in 1..1_000_000i128) {
        let rate = Some(RateTerms { origin: RateOrigin::Contract, tariff, percentage: 0 });
        let price = price_line(billed, billed, rate, 8_000);
        prop_assert_eq!(price.billed, billed.min(tariff));
        prop_assert_eq!(price.covered, billed.min(tariff));
    }

    /// Whatever is not covered is paid by the patient.
    #[test]
    fn co_payment_closes_the_gap(claimed in 0..1_000_000i128, covered in 0..1_000_000i128) {
        let due = co_payment(claimed, covered);
        prop_assert!(due >= 0);
        if covered <= claimed {
            prop_assert_eq!(covered + due, claimed);
        } else {
            prop_assert_eq!(due, 0);
        }
    }

    /// Either the claim fits the entitlement or nothing is covered.
    #[test]
    fn depletion_is_all_or_nothing(
        cap in 1..100_000i128,
        remaining in -10..100_000i128,
        unit in unit(),
        covered in 0..100_000i128,
    ) {
        let d = deplete(cap, remaining, unit, covered);
        if d.exhausted {
            prop_assert_eq!(d.covered, 0);
            prop_assert!(d.remaining < 0);
        } else {
            prop_assert_eq!(d.covered, covered);
            prop_assert!(d.remaining >= 0);
        }
        prop_assert!(d.remaining <= remaining);
        if unit == EntitlementUnit::Treatments {
            prop_assert!(remaining - d.remaining <= 1);
        }
    }

    /// Without a cap nothing is tracked and nothing is withheld.
    #[test]
    fn zero_cap_tracks_nothing(
        remaining in -10..100_000i128,
        unit in unit(),
        covered in 0..100_000i128,
    ) {
        let d = deplete(0, remaining, unit, covered);
        prop_assert_eq!(d.remaining, 0);
        prop_assert_eq!(d.covered, covered);
        prop_assert!(!d.exhausted);
    }
}
