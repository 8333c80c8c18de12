//! Request/report façade over the conversion engine.
//!
//! A front end builds one [`Request`] per input change and renders the
//! returned [`Report`]. Nothing is retained between calls.

use serde::Serialize;

use crate::models::{DoseUnit, NotComputable, Outcome, Preparation};
use crate::units::{concentration, dose_from_rate, rate_from_dose, Concentration};

/// Unit of a pump rate typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateUnit {
    #[default]
    MlPerHour,
    MlPerMinute,
}

impl RateUnit {
    pub fn to_ml_per_hour(self, value: f64) -> f64 {
        match self {
            RateUnit::MlPerHour => value,
            RateUnit::MlPerMinute => value * 60.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RateUnit::MlPerHour => "ml/h",
            RateUnit::MlPerMinute => "ml/min",
        }
    }
}

/// What the user entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pump rate → delivered dose
    Rate { value: f64, unit: RateUnit },
    /// Target dose (in the preparation's dose unit) → pump rate
    Dose { value: f64 },
}

/// One conversion request.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub preparation: &'a Preparation,
    pub weight_kg: Option<f64>,
    pub input: Input,
}

/// Everything a front end shows for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Report {
    pub concentration: Concentration,
    pub dose_unit: DoseUnit,
    pub dose: Outcome,
    pub rate_ml_per_h: Outcome,
    pub rate_ml_per_min: Outcome,
}

impl<'a> Request<'a> {
    pub fn rate(preparation: &'a Preparation, weight_kg: Option<f64>, value: f64, unit: RateUnit) -> Self {
        Self {
            preparation,
            weight_kg,
            input: Input::Rate { value, unit },
        }
    }

    pub fn dose(preparation: &'a Preparation, weight_kg: Option<f64>, value: f64) -> Self {
        Self {
            preparation,
            weight_kg,
            input: Input::Dose { value },
        }
    }
}

/// Run a request through the engine.
pub fn calculate(request: &Request<'_>) -> Report {
    let preparation = request.preparation;

    let (dose, rate_ml_per_h) = match request.input {
        Input::Rate { value, unit } => {
            let rate = unit.to_ml_per_hour(value);
            let dose = dose_from_rate(rate, request.weight_kg, preparation);
            (dose, checked_input(rate))
        }
        Input::Dose { value } => {
            // The typed target stays on screen even when no rate follows from it.
            let dose = checked_input(value);
            (dose, rate_from_dose(value, request.weight_kg, preparation))
        }
    };

    Report {
        concentration: concentration(preparation),
        dose_unit: preparation.dose_unit,
        dose,
        rate_ml_per_h,
        rate_ml_per_min: rate_ml_per_h.map(|r| r / 60.0),
    }
}

fn checked_input(value: f64) -> Outcome {
    if value.is_finite() && value >= 0.0 {
        Outcome::Value(value)
    } else {
        Outcome::NotComputable(NotComputable::InvalidInput)
    }
}

impl Report {
    /// First reason the report is incomplete, if any.
    pub fn hint(&self) -> Option<&'static str> {
        self.dose
            .reason()
            .or_else(|| self.rate_ml_per_h.reason())
            .map(|r| r.hint())
    }

    /// Dose line, e.g. `0.10 µg/kg/min`.
    pub fn dose_display(&self) -> String {
        format!("{} {}", self.dose.display(), self.dose_unit)
    }

    /// Rate line, e.g. `0.03 ml/min | 2.00 ml/h`.
    pub fn rate_display(&self) -> String {
        format!(
            "{} {} | {} {}",
            self.rate_ml_per_min.display(),
            RateUnit::MlPerMinute.label(),
            self.rate_ml_per_h.display(),
            RateUnit::MlPerHour.label()
        )
    }
}
