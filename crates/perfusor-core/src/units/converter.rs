//! Rate↔dose converter.
//!
//! Dispatch is by dose-unit rule:
//! - direct units (`µg/h`, `mg/h`, `g/h`, `mmol/h`, `IU/h`): concentration × rate,
//!   rescaled to the unit's mass scale
//! - weight-scaled units (`µg/kg/min`, `µg/kg/h`, `mg/kg/h`, `ng/kg/min`): as above,
//!   then per time base and per kg
//! - non-continuous: never converted

use tracing::debug;

use super::{concentration, Concentration};
use crate::models::{DoseRule, NotComputable, Outcome, Preparation};

/// Everything a conversion needs once the preparation has been checked.
#[derive(Debug, Clone, Copy)]
struct Setup {
    /// Canonical base units per ml
    concentration: f64,
    rule: DoseRule,
    /// Divisor applied to a base-per-hour quantity (time base × weight)
    scale: f64,
}

/// Dose delivered at a pump rate given in ml/h.
pub fn dose_from_rate(
    rate_ml_per_h: f64,
    weight_kg: Option<f64>,
    preparation: &Preparation,
) -> Outcome {
    let result = setup(weight_kg, preparation).and_then(|setup| {
        check_input(rate_ml_per_h)?;
        let base_per_hour = setup.concentration * rate_ml_per_h;
        Ok(setup.rule.quantity.from_base(base_per_hour / setup.scale))
    });
    log_outcome("dose_from_rate", preparation, result)
}

/// Pump rate in ml/h that delivers a target dose.
pub fn rate_from_dose(
    target_dose: f64,
    weight_kg: Option<f64>,
    preparation: &Preparation,
) -> Outcome {
    let result = setup(weight_kg, preparation).and_then(|setup| {
        check_input(target_dose)?;
        let base_per_hour = setup.rule.quantity.to_base(target_dose) * setup.scale;
        Ok(base_per_hour / setup.concentration)
    });
    log_outcome("rate_from_dose", preparation, result)
}

fn setup(weight_kg: Option<f64>, preparation: &Preparation) -> Result<Setup, NotComputable> {
    let rule = preparation
        .dose_unit
        .rule()
        .ok_or(NotComputable::NonContinuous)?;

    let conc: Concentration = concentration(preparation);
    if !conc.is_usable() {
        return Err(NotComputable::ZeroConcentration);
    }
    if conc.unit != Some(rule.quantity.base()) {
        return Err(NotComputable::UnitFamilyMismatch);
    }

    let mut scale = rule.time_base.periods_per_hour();
    if rule.per_kg {
        scale *= valid_weight(weight_kg).ok_or(NotComputable::WeightRequired)?;
    }

    Ok(Setup {
        concentration: conc.value,
        rule,
        scale,
    })
}

/// Positive, finite weight in kg.
pub fn valid_weight(weight_kg: Option<f64>) -> Option<f64> {
    weight_kg.filter(|w| w.is_finite() && *w > 0.0)
}

fn check_input(value: f64) -> Result<(), NotComputable> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NotComputable::InvalidInput)
    }
}

fn log_outcome(
    direction: &'static str,
    preparation: &Preparation,
    result: Result<f64, NotComputable>,
) -> Outcome {
    if let Err(reason) = result {
        debug!(
            direction,
            dose_unit = %preparation.dose_unit,
            ?reason,
            "conversion not computable"
        );
    }
    result.into()
}
