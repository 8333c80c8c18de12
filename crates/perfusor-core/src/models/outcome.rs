//! Conversion outcome models.

use serde::{Deserialize, Serialize};

/// Placeholder rendered for a value that cannot be computed.
pub const PLACEHOLDER: &str = "—";

/// Result of a rate↔dose conversion.
///
/// Absence is an explicit variant so call sites cannot mistake it for zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Value(f64),
    NotComputable(NotComputable),
}

/// Why a conversion produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotComputable {
    /// Amount or volume missing, malformed, or the concentration is zero
    ZeroConcentration,
    /// Weight-scaled dose unit without a positive patient weight
    WeightRequired,
    /// Preparation is given as bolus or by protocol
    NonContinuous,
    /// Dose unit measures a different quantity than the preparation
    UnitFamilyMismatch,
    /// Dose unit tag is not one of the supported conventions
    UnrecognizedDoseUnit,
    /// Negative or non-finite rate or dose
    InvalidInput,
}

impl Outcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value(v) => Some(*v),
            Outcome::NotComputable(_) => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Outcome::Value(_))
    }

    pub fn reason(&self) -> Option<NotComputable> {
        match self {
            Outcome::Value(_) => None,
            Outcome::NotComputable(reason) => Some(*reason),
        }
    }

    /// Transform the value, keeping the not-computable reason.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Outcome {
        match self {
            Outcome::Value(v) => Outcome::Value(f(v)),
            other => other,
        }
    }

    /// Two decimals, or the placeholder.
    pub fn display(&self) -> String {
        format_value(self.value())
    }
}

impl From<Result<f64, NotComputable>> for Outcome {
    fn from(result: Result<f64, NotComputable>) -> Self {
        match result {
            Ok(v) => Outcome::Value(v),
            Err(reason) => Outcome::NotComputable(reason),
        }
    }
}

impl NotComputable {
    /// Short hint for the front end.
    pub fn hint(&self) -> &'static str {
        match self {
            NotComputable::ZeroConcentration => "Enter a drug amount and a volume above zero.",
            NotComputable::WeightRequired => "A valid patient weight is required for this unit.",
            NotComputable::NonContinuous => {
                "Given as bolus or by protocol; no infusion rate applies."
            }
            NotComputable::UnitFamilyMismatch => {
                "Dose unit does not match the amount unit of the preparation."
            }
            NotComputable::UnrecognizedDoseUnit => "Unknown dose unit.",
            NotComputable::InvalidInput => "Enter a rate or dose of zero or more.",
        }
    }
}

/// Render an optional value with two decimals, or the em-dash placeholder.
#[uniffi::export]
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(0.0952)), "0.10");
        assert_eq!(format_value(Some(350.0)), "350.00");
        assert_eq!(format_value(None), "—");
        assert_eq!(format_value(Some(f64::NAN)), "—");
    }

    #[test]
    fn test_outcome_accessors() {
        let value = Outcome::Value(2.0);
        assert!(value.is_value());
        assert_eq!(value.value(), Some(2.0));
        assert_eq!(value.reason(), None);
        assert_eq!(value.map(|v| v / 60.0).value(), Some(2.0 / 60.0));

        let none = Outcome::NotComputable(NotComputable::WeightRequired);
        assert!(!none.is_value());
        assert_eq!(none.value(), None);
        assert_eq!(none.reason(), Some(NotComputable::WeightRequired));
        assert_eq!(none.map(|v| v * 2.0), none);
        assert_eq!(none.display(), "—");
    }

    #[test]
    fn test_from_result() {
        assert_eq!(Outcome::from(Ok(1.5)), Outcome::Value(1.5));
        assert_eq!(
            Outcome::from(Err(NotComputable::NonContinuous)),
            Outcome::NotComputable(NotComputable::NonContinuous)
        );
    }
}
