//! Concentration resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize;
use crate::models::{format_value, AmountUnit, BaseUnit, Preparation, PLACEHOLDER};

/// Drug quantity per ml in the canonical unit of its family.
///
/// `unit == None` is the empty state: amount or volume missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    pub value: f64,
    pub unit: Option<BaseUnit>,
}

impl Concentration {
    pub const EMPTY: Concentration = Concentration {
        value: 0.0,
        unit: None,
    };

    pub fn is_empty(&self) -> bool {
        self.unit.is_none()
    }

    /// Whether conversions can divide by this concentration.
    pub fn is_usable(&self) -> bool {
        self.unit.is_some() && self.value.is_finite() && self.value > 0.0
    }

    /// Unit label, e.g. `µg/ml`, or `—` when empty.
    pub fn label(&self) -> &'static str {
        self.unit.map(|u| u.per_ml_label()).unwrap_or(PLACEHOLDER)
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {}", format_value(Some(self.value)), unit.per_ml_label()),
            None => f.write_str(PLACEHOLDER),
        }
    }
}

/// Concentration of a preparation.
pub fn concentration(preparation: &Preparation) -> Concentration {
    resolve_concentration(
        preparation.amount,
        preparation.amount_unit,
        preparation.volume_ml,
    )
}

/// Concentration from raw amount/volume fields.
///
/// Missing, non-finite or negative amounts and non-positive volumes give
/// [`Concentration::EMPTY`].
pub fn resolve_concentration(
    amount: Option<f64>,
    amount_unit: AmountUnit,
    volume_ml: Option<f64>,
) -> Concentration {
    let (Some(amount), Some(volume_ml)) = (amount, volume_ml) else {
        return Concentration::EMPTY;
    };
    if !amount.is_finite() || amount < 0.0 || !volume_ml.is_finite() || volume_ml <= 0.0 {
        return Concentration::EMPTY;
    }

    let (base_amount, base_unit) = normalize(amount, amount_unit);
    Concentration {
        value: base_amount / volume_ml,
        unit: Some(base_unit),
    }
}
