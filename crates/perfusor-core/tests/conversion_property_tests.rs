//! Property tests for the rate↔dose converter.

use perfusor_core::models::{AmountUnit, BaseUnit, DoseUnit, NotComputable, Outcome, Preparation};
use perfusor_core::units::{concentration, dose_from_rate, rate_from_dose, Concentration};
use proptest::prelude::*;

fn amount_unit() -> impl Strategy<Value = AmountUnit> {
    prop::sample::select(AmountUnit::ALL.to_vec())
}

fn dose_unit() -> impl Strategy<Value = DoseUnit> {
    prop::sample::select(DoseUnit::ALL.to_vec())
}

fn continuous_dose_unit() -> impl Strategy<Value = DoseUnit> {
    prop::sample::select(
        DoseUnit::ALL
            .into_iter()
            .filter(|u| u.is_continuous())
            .collect::<Vec<_>>(),
    )
}

fn weight_scaled_dose_unit() -> impl Strategy<Value = DoseUnit> {
    prop::sample::select(
        DoseUnit::ALL
            .into_iter()
            .filter(|u| u.is_weight_scaled())
            .collect::<Vec<_>>(),
    )
}

/// Amount unit whose family matches the dose unit.
fn matching_amount_unit(dose_unit: DoseUnit) -> Vec<AmountUnit> {
    let base = dose_unit.rule().map(|r| r.quantity.base());
    AmountUnit::ALL
        .into_iter()
        .filter(|u| Some(u.base()) == base)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rate_dose_round_trip(
        (dose_unit, amount_unit) in continuous_dose_unit()
            .prop_flat_map(|d| (Just(d), prop::sample::select(matching_amount_unit(d)))),
        amount in 0.01f64..100_000.0,
        volume in 1.0f64..500.0,
        weight in 0.5f64..250.0,
        rate in 0.0f64..1000.0,
    ) {
        let prep = Preparation::new(amount, amount_unit, volume, dose_unit);

        let dose = dose_from_rate(rate, Some(weight), &prep);
        prop_assert!(dose.is_value(), "dose not computable: {:?}", dose);

        let back = rate_from_dose(dose.value().unwrap(), Some(weight), &prep);
        let back = back.value().unwrap();
        prop_assert!(
            (back - rate).abs() <= 1e-6 * rate.max(1e-12),
            "rate {} came back as {}", rate, back
        );
    }

    #[test]
    fn families_never_mix(
        amount_unit in amount_unit(),
        dose_unit in continuous_dose_unit(),
        amount in 0.01f64..10_000.0,
        volume in 1.0f64..500.0,
        weight in proptest::option::of(0.5f64..250.0),
        value in 0.0f64..1000.0,
    ) {
        prop_assume!(dose_unit.rule().map(|r| r.quantity.base()) != Some(amount_unit.base()));
        let prep = Preparation::new(amount, amount_unit, volume, dose_unit);

        prop_assert_eq!(
            dose_from_rate(value, weight, &prep),
            Outcome::NotComputable(NotComputable::UnitFamilyMismatch)
        );
        prop_assert_eq!(
            rate_from_dose(value, weight, &prep),
            Outcome::NotComputable(NotComputable::UnitFamilyMismatch)
        );
    }

    #[test]
    fn weight_scaled_units_need_weight(
        dose_unit in weight_scaled_dose_unit(),
        amount_unit in prop::sample::select(vec![
            AmountUnit::Gram,
            AmountUnit::Milligram,
            AmountUnit::Microgram,
            AmountUnit::Nanogram,
        ]),
        amount in 0.01f64..10_000.0,
        volume in 1.0f64..500.0,
        weight in prop::sample::select(vec![None, Some(0.0), Some(-10.0)]),
        value in 0.0f64..1000.0,
    ) {
        let prep = Preparation::new(amount, amount_unit, volume, dose_unit);

        prop_assert!(dose_from_rate(value, weight, &prep).value().is_none());
        prop_assert!(rate_from_dose(value, weight, &prep).value().is_none());
    }

    #[test]
    fn non_continuous_never_converts(
        amount_unit in amount_unit(),
        amount in 0.0f64..10_000.0,
        volume in 0.0f64..500.0,
        weight in proptest::option::of(0.0f64..250.0),
        value in 0.0f64..1000.0,
    ) {
        let prep = Preparation::new(amount, amount_unit, volume, DoseUnit::NonContinuous);

        prop_assert!(dose_from_rate(value, weight, &prep).value().is_none());
        prop_assert!(rate_from_dose(value, weight, &prep).value().is_none());
    }

    #[test]
    fn zero_volume_is_empty(
        amount_unit in amount_unit(),
        dose_unit in dose_unit(),
        amount in 0.0f64..10_000.0,
        weight in proptest::option::of(0.5f64..250.0),
        value in 0.0f64..1000.0,
    ) {
        let prep = Preparation::new(amount, amount_unit, 0.0, dose_unit);

        let conc = concentration(&prep);
        prop_assert_eq!(conc, Concentration::EMPTY);
        prop_assert_eq!(conc.label(), "—");
        prop_assert!(dose_from_rate(value, weight, &prep).value().is_none());
        prop_assert!(rate_from_dose(value, weight, &prep).value().is_none());
    }

    #[test]
    fn concentration_uses_family_base(
        amount_unit in amount_unit(),
        amount in 0.0f64..10_000.0,
        volume in 0.1f64..500.0,
    ) {
        let prep = Preparation::new(amount, amount_unit, volume, DoseUnit::NonContinuous);
        let conc = concentration(&prep);

        let expected = match amount_unit {
            AmountUnit::Gram
            | AmountUnit::Milligram
            | AmountUnit::Microgram
            | AmountUnit::Nanogram => BaseUnit::Microgram,
            AmountUnit::Millimole => BaseUnit::Millimole,
            AmountUnit::InternationalUnit => BaseUnit::InternationalUnit,
        };
        prop_assert_eq!(conc.unit, Some(expected));
        prop_assert!(conc.value >= 0.0);
    }
}
