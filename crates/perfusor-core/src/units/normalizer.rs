//! Amount normalizer.
//!
//! Converts a drug amount into the canonical base of its unit family:
//! - Mass (g, mg, µg, ng) → µg
//! - Molar (mmol) → mmol
//! - Activity (IU) → IU

use super::UnitResult;
use crate::models::{AmountUnit, BaseUnit};

/// Normalize an amount into its family's base unit.
pub fn normalize(amount: f64, unit: AmountUnit) -> (f64, BaseUnit) {
    let base_amount = match unit {
        AmountUnit::Gram => amount * 1_000_000.0,
        AmountUnit::Milligram => amount * 1_000.0,
        AmountUnit::Microgram => amount,
        AmountUnit::Nanogram => amount / 1_000.0,
        AmountUnit::Millimole | AmountUnit::InternationalUnit => amount,
    };
    (base_amount, unit.base())
}

/// Normalize an amount given as a raw unit tag.
pub fn normalize_tag(amount: f64, unit: &str) -> UnitResult<(f64, BaseUnit)> {
    let unit: AmountUnit = unit.parse()?;
    Ok(normalize(amount, unit))
}
