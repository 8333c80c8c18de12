//! Perfusor Core Library
//!
//! Reference engine that converts between infusion pump rate and drug dose for
//! premixed intravenous preparations.
//!
//! # Architecture
//!
//! ```text
//!   Catalogue entry ──┐
//!                     ├──▶ Preparation ──▶ Concentration ──▶ Rate ↔ Dose
//!   Custom fields ────┘                    (µg | mmol | IU      (dose-unit rule
//!                                           per ml)              + weight)
//!                                                                   │
//!                                                    Value | NotComputable(reason)
//! ```
//!
//! # Core Principle
//!
//! **Mass, molar and activity quantities never mix.** A dose unit only applies to a
//! preparation of the same family; anything else is reported as not computable.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Preparation, AmountUnit, DoseUnit, Outcome)
//! - [`units`]: Normalizer, concentration resolver and rate↔dose converter
//! - [`catalogue`]: Immutable preparation tables and the built-in standard
//! - [`calculator`]: Request/report façade for front ends

pub mod calculator;
pub mod catalogue;
pub mod models;
pub mod units;

// Re-export commonly used types
pub use calculator::{calculate, Input, RateUnit, Report, Request};
pub use catalogue::{standard_catalogue, Catalogue, CatalogueEntry, CatalogueError};
pub use models::{
    format_value, AmountUnit, BaseUnit, DoseUnit, NotComputable, Outcome, Preparation,
};
pub use units::{
    concentration, dose_from_rate, normalize, rate_from_dose, Concentration, UnitError,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PerfusorError {
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("Invalid catalogue: {0}")]
    InvalidCatalogue(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<UnitError> for PerfusorError {
    fn from(e: UnitError) -> Self {
        match e {
            UnitError::UnsupportedUnit(tag) | UnitError::UnsupportedDoseUnit(tag) => {
                PerfusorError::UnsupportedUnit(tag)
            }
        }
    }
}

impl From<CatalogueError> for PerfusorError {
    fn from(e: CatalogueError) -> Self {
        PerfusorError::InvalidCatalogue(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Calculator backed by the built-in standard table.
#[uniffi::export]
pub fn open_standard_calculator() -> Arc<PerfusorCalculator> {
    Arc::new(PerfusorCalculator {
        catalogue: standard_catalogue().clone(),
    })
}

/// Calculator backed by a hospital table in JSON.
#[uniffi::export]
pub fn open_calculator_from_json(json: String) -> Result<Arc<PerfusorCalculator>, PerfusorError> {
    let catalogue = Catalogue::from_json(&json)?;
    Ok(Arc::new(PerfusorCalculator { catalogue }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Read-only catalogue handle for FFI.
#[derive(uniffi::Object)]
pub struct PerfusorCalculator {
    catalogue: Catalogue,
}

#[uniffi::export]
impl PerfusorCalculator {
    /// Display names in table order.
    pub fn names(&self) -> Vec<String> {
        self.catalogue.names().map(String::from).collect()
    }

    /// Preparation for an exact display name.
    pub fn entry(&self, name: String) -> Result<FfiPreparation, PerfusorError> {
        self.catalogue
            .get(&name)
            .map(FfiPreparation::from)
            .ok_or(PerfusorError::NotFound(name))
    }

    /// Similar display names, best first.
    pub fn suggest(&self, query: String, limit: u32) -> Vec<String> {
        self.catalogue
            .suggest(&query, limit as usize)
            .into_iter()
            .map(|s| s.name.to_string())
            .collect()
    }

    /// The table as JSON.
    pub fn to_json(&self) -> Result<String, PerfusorError> {
        Ok(self.catalogue.to_json()?)
    }

    pub fn concentration(&self, preparation: FfiPreparation) -> Result<FfiConcentration, PerfusorError> {
        compute_concentration(preparation)
    }

    /// Dose delivered at `rate_ml_per_h`, for an entry or a custom preparation.
    pub fn dose_from_rate(
        &self,
        rate_ml_per_h: f64,
        weight_kg: Option<f64>,
        preparation: FfiPreparation,
    ) -> Result<FfiConversion, PerfusorError> {
        compute_dose(rate_ml_per_h, weight_kg, preparation)
    }

    /// Pump rate in ml/h for `target_dose`.
    pub fn rate_from_dose(
        &self,
        target_dose: f64,
        weight_kg: Option<f64>,
        preparation: FfiPreparation,
    ) -> Result<FfiConversion, PerfusorError> {
        compute_rate(target_dose, weight_kg, preparation)
    }
}

// =========================================================================
// Stateless Conversions (exported to FFI)
// =========================================================================

/// Concentration of a preparation.
#[uniffi::export]
pub fn compute_concentration(
    preparation: FfiPreparation,
) -> Result<FfiConcentration, PerfusorError> {
    let amount_unit: AmountUnit = preparation.amount_unit.parse()?;
    let conc = units::resolve_concentration(preparation.amount, amount_unit, preparation.volume_ml);
    Ok(conc.into())
}

/// Dose delivered at `rate_ml_per_h`.
#[uniffi::export]
pub fn compute_dose(
    rate_ml_per_h: f64,
    weight_kg: Option<f64>,
    preparation: FfiPreparation,
) -> Result<FfiConversion, PerfusorError> {
    let outcome = match preparation.resolve()? {
        Some(prep) => dose_from_rate(rate_ml_per_h, weight_kg, &prep),
        None => Outcome::NotComputable(NotComputable::UnrecognizedDoseUnit),
    };
    Ok(outcome.into())
}

/// Pump rate in ml/h for `target_dose`.
#[uniffi::export]
pub fn compute_rate(
    target_dose: f64,
    weight_kg: Option<f64>,
    preparation: FfiPreparation,
) -> Result<FfiConversion, PerfusorError> {
    let outcome = match preparation.resolve()? {
        Some(prep) => rate_from_dose(target_dose, weight_kg, &prep),
        None => Outcome::NotComputable(NotComputable::UnrecognizedDoseUnit),
    };
    Ok(outcome.into())
}

/// Amount-unit tags accepted for custom preparations.
#[uniffi::export]
pub fn supported_amount_units() -> Vec<String> {
    AmountUnit::ALL.iter().map(|u| u.tag().to_string()).collect()
}

/// Dose-unit tags accepted for custom preparations.
#[uniffi::export]
pub fn supported_dose_units() -> Vec<String> {
    DoseUnit::ALL.iter().map(|u| u.tag().to_string()).collect()
}

// =========================================================================
// FFI-Safe Types
// =========================================================================

/// FFI-safe preparation with raw unit tags.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPreparation {
    pub amount: Option<f64>,
    pub amount_unit: String,
    pub volume_ml: Option<f64>,
    pub dose_unit: String,
    pub reference_start: Option<f64>,
    pub reference_max: Option<f64>,
    pub annotation: Option<String>,
}

impl FfiPreparation {
    /// Parse the unit tags. An unknown amount unit is an error; an unknown
    /// dose unit yields `None` so conversions report no value.
    fn resolve(&self) -> Result<Option<Preparation>, PerfusorError> {
        let amount_unit: AmountUnit = self.amount_unit.parse()?;
        let Ok(dose_unit) = self.dose_unit.parse::<DoseUnit>() else {
            tracing::debug!(dose_unit = %self.dose_unit, "unrecognized dose unit");
            return Ok(None);
        };

        Ok(Some(Preparation {
            amount: self.amount,
            amount_unit,
            volume_ml: self.volume_ml,
            dose_unit,
            reference_start: self.reference_start,
            reference_max: self.reference_max,
            annotation: self.annotation.clone(),
        }))
    }
}

impl From<&Preparation> for FfiPreparation {
    fn from(prep: &Preparation) -> Self {
        Self {
            amount: prep.amount,
            amount_unit: prep.amount_unit.tag().to_string(),
            volume_ml: prep.volume_ml,
            dose_unit: prep.dose_unit.tag().to_string(),
            reference_start: prep.reference_start,
            reference_max: prep.reference_max,
            annotation: prep.annotation.clone(),
        }
    }
}

/// FFI-safe concentration.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConcentration {
    pub value: f64,
    pub unit_label: String,
    pub display: String,
}

impl From<Concentration> for FfiConcentration {
    fn from(conc: Concentration) -> Self {
        Self {
            value: conc.value,
            unit_label: conc.label().to_string(),
            display: conc.to_string(),
        }
    }
}

/// FFI-safe conversion result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiConversion {
    pub value: Option<f64>,
    pub display: String,
    /// Hint shown when no value could be computed
    pub hint: Option<String>,
}

impl From<Outcome> for FfiConversion {
    fn from(outcome: Outcome) -> Self {
        Self {
            value: outcome.value(),
            display: outcome.display(),
            hint: outcome.reason().map(|r| r.hint().to_string()),
        }
    }
}
