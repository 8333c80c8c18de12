//! Drug preparation models.

use serde::{Deserialize, Serialize};

use super::{AmountUnit, DoseUnit};

/// A drug mixture: total amount dissolved in a diluent volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preparation {
    /// Total drug amount (missing when not yet entered)
    pub amount: Option<f64>,
    /// Unit of `amount`
    pub amount_unit: AmountUnit,
    /// Diluent volume in ml
    pub volume_ml: Option<f64>,
    /// Dose convention used for rate conversions
    pub dose_unit: DoseUnit,
    /// Usual starting dose, informational only
    #[serde(default, alias = "start", skip_serializing_if = "Option::is_none")]
    pub reference_start: Option<f64>,
    /// Usual maximum dose, informational only
    #[serde(default, alias = "max", skip_serializing_if = "Option::is_none")]
    pub reference_max: Option<f64>,
    /// Free-text clinical note
    #[serde(default, alias = "note", skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Preparation {
    /// Create a preparation with required fields.
    pub fn new(amount: f64, amount_unit: AmountUnit, volume_ml: f64, dose_unit: DoseUnit) -> Self {
        Self {
            amount: Some(amount),
            amount_unit,
            volume_ml: Some(volume_ml),
            dose_unit,
            reference_start: None,
            reference_max: None,
            annotation: None,
        }
    }

    /// Create a transient custom preparation from form fields.
    ///
    /// Custom preparations never carry reference values.
    pub fn custom(
        amount: Option<f64>,
        amount_unit: AmountUnit,
        volume_ml: Option<f64>,
        dose_unit: DoseUnit,
    ) -> Self {
        Self {
            amount,
            amount_unit,
            volume_ml,
            dose_unit,
            reference_start: None,
            reference_max: None,
            annotation: None,
        }
    }

    pub fn with_reference(mut self, start: Option<f64>, max: Option<f64>) -> Self {
        self.reference_start = start;
        self.reference_max = max;
        self
    }

    pub fn with_annotation(mut self, annotation: &str) -> Self {
        self.annotation = Some(annotation.to_string());
        self
    }

    /// Target dose offered before the user types one.
    pub fn default_target_dose(&self) -> f64 {
        self.reference_start.unwrap_or(0.0)
    }

    /// Human-readable mixture, e.g. `10 mg in 50 ml`.
    pub fn describe(&self) -> String {
        let amount = self
            .amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "?".into());
        let volume = self
            .volume_ml
            .map(|v| v.to_string())
            .unwrap_or_else(|| "?".into());
        format!("{} {} in {} ml", amount, self.amount_unit, volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let prep = Preparation::new(
            10.0,
            AmountUnit::Milligram,
            50.0,
            DoseUnit::MicrogramPerKgPerMinute,
        );
        assert_eq!(prep.describe(), "10 mg in 50 ml");

        let prep = Preparation::new(1.5, AmountUnit::Milligram, 50.0, DoseUnit::MicrogramPerHour);
        assert_eq!(prep.describe(), "1.5 mg in 50 ml");

        let prep = Preparation::custom(None, AmountUnit::InternationalUnit, None, DoseUnit::InternationalUnitPerHour);
        assert_eq!(prep.describe(), "? IU in ? ml");
    }

    #[test]
    fn test_custom_has_no_reference() {
        let prep = Preparation::custom(
            Some(10.0),
            AmountUnit::Milligram,
            Some(50.0),
            DoseUnit::MilligramPerHour,
        );
        assert!(prep.reference_start.is_none());
        assert!(prep.reference_max.is_none());
        assert_eq!(prep.default_target_dose(), 0.0);
    }

    #[test]
    fn test_default_target_dose_uses_start() {
        let prep = Preparation::new(10.0, AmountUnit::Milligram, 50.0, DoseUnit::MicrogramPerKgPerMinute)
            .with_reference(Some(0.1), Some(0.5));
        assert_eq!(prep.default_target_dose(), 0.1);
    }

    #[test]
    fn test_deserialize_sheet_keys() {
        let json = r#"{
            "amount": 10000,
            "amount_unit": "IE",
            "volume_ml": 50,
            "dose_unit": "IE/h",
            "start": 350.0,
            "max": null,
            "note": "Adjust by aPTT."
        }"#;
        let prep: Preparation = serde_json::from_str(json).unwrap();
        assert_eq!(prep.amount, Some(10000.0));
        assert_eq!(prep.amount_unit, AmountUnit::InternationalUnit);
        assert_eq!(prep.dose_unit, DoseUnit::InternationalUnitPerHour);
        assert_eq!(prep.reference_start, Some(350.0));
        assert_eq!(prep.reference_max, None);
        assert_eq!(prep.annotation.as_deref(), Some("Adjust by aPTT."));
    }
}
