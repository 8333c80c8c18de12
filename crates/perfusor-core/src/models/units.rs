//! Amount and dose unit tags.
//!
//! Every tag is a closed enum so the converter can dispatch exhaustively.
//! Mass, molar and activity quantities are separate families and are never
//! converted into one another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::units::UnitError;

/// Unit in which a preparation's total drug amount is stated.
///
/// Serde goes through [`FromStr`], so hospital tables accept every spelling
/// the parser does; serialization writes [`AmountUnit::tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AmountUnit {
    Gram,
    Milligram,
    Microgram,
    Nanogram,
    Millimole,
    InternationalUnit,
}

/// Canonical per-volume base of a quantity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseUnit {
    /// Mass family
    #[serde(rename = "µg")]
    Microgram,
    /// Molar family
    #[serde(rename = "mmol")]
    Millimole,
    /// Biological activity family
    #[serde(rename = "IU")]
    InternationalUnit,
}

/// Mass scale of a mass-family dose unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassScale {
    Nanogram,
    Microgram,
    Milligram,
    Gram,
}

/// Quantity delivered by a dose unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Mass(MassScale),
    Molar,
    Activity,
}

/// Time base of a dose unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeBase {
    Minute,
    Hour,
}

/// Conversion rule attached to a continuous dose unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoseRule {
    pub quantity: Quantity,
    /// Dose is normalized by patient body weight (kg)
    pub per_kg: bool,
    pub time_base: TimeBase,
}

/// Clinical convention for expressing a delivered dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DoseUnit {
    MicrogramPerKgPerMinute,
    MicrogramPerKgPerHour,
    MilligramPerKgPerHour,
    NanogramPerKgPerMinute,
    MicrogramPerHour,
    MilligramPerHour,
    GramPerHour,
    MillimolePerHour,
    InternationalUnitPerHour,
    /// Bolus or protocol-scheduled drug without a constant-rate mapping
    NonContinuous,
}

const AMOUNT_UNIT_TAGS: &[(&str, AmountUnit)] = &[
    ("g", AmountUnit::Gram),
    ("gram", AmountUnit::Gram),
    ("mg", AmountUnit::Milligram),
    ("milligram", AmountUnit::Milligram),
    ("µg", AmountUnit::Microgram),
    ("μg", AmountUnit::Microgram),
    ("mcg", AmountUnit::Microgram),
    ("ug", AmountUnit::Microgram),
    ("microgram", AmountUnit::Microgram),
    ("ng", AmountUnit::Nanogram),
    ("nanogram", AmountUnit::Nanogram),
    ("mmol", AmountUnit::Millimole),
    ("millimole", AmountUnit::Millimole),
    ("iu", AmountUnit::InternationalUnit),
    ("ie", AmountUnit::InternationalUnit),
    ("i.e.", AmountUnit::InternationalUnit),
    ("international-unit", AmountUnit::InternationalUnit),
];

impl AmountUnit {
    /// All supported amount units, in display order.
    pub const ALL: [AmountUnit; 6] = [
        AmountUnit::Gram,
        AmountUnit::Milligram,
        AmountUnit::Microgram,
        AmountUnit::Nanogram,
        AmountUnit::Millimole,
        AmountUnit::InternationalUnit,
    ];

    /// Short tag as shown on the drug sheet.
    pub fn tag(&self) -> &'static str {
        match self {
            AmountUnit::Gram => "g",
            AmountUnit::Milligram => "mg",
            AmountUnit::Microgram => "µg",
            AmountUnit::Nanogram => "ng",
            AmountUnit::Millimole => "mmol",
            AmountUnit::InternationalUnit => "IU",
        }
    }

    /// Canonical base this unit normalizes into.
    pub fn base(&self) -> BaseUnit {
        match self {
            AmountUnit::Gram
            | AmountUnit::Milligram
            | AmountUnit::Microgram
            | AmountUnit::Nanogram => BaseUnit::Microgram,
            AmountUnit::Millimole => BaseUnit::Millimole,
            AmountUnit::InternationalUnit => BaseUnit::InternationalUnit,
        }
    }
}

impl FromStr for AmountUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        AMOUNT_UNIT_TAGS
            .iter()
            .find(|(tag, _)| *tag == lower)
            .map(|(_, unit)| *unit)
            .ok_or_else(|| UnitError::UnsupportedUnit(s.to_string()))
    }
}

impl TryFrom<String> for AmountUnit {
    type Error = UnitError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<AmountUnit> for &'static str {
    fn from(unit: AmountUnit) -> Self {
        unit.tag()
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl BaseUnit {
    pub fn tag(&self) -> &'static str {
        match self {
            BaseUnit::Microgram => "µg",
            BaseUnit::Millimole => "mmol",
            BaseUnit::InternationalUnit => "IU",
        }
    }

    /// Concentration label, e.g. `µg/ml`.
    pub fn per_ml_label(&self) -> &'static str {
        match self {
            BaseUnit::Microgram => "µg/ml",
            BaseUnit::Millimole => "mmol/ml",
            BaseUnit::InternationalUnit => "IU/ml",
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl MassScale {
    /// Express a microgram quantity in this scale.
    pub fn from_micrograms(&self, micrograms: f64) -> f64 {
        match self {
            MassScale::Nanogram => micrograms * 1_000.0,
            MassScale::Microgram => micrograms,
            MassScale::Milligram => micrograms / 1_000.0,
            MassScale::Gram => micrograms / 1_000_000.0,
        }
    }

    /// Express a quantity in this scale as micrograms.
    pub fn to_micrograms(&self, value: f64) -> f64 {
        match self {
            MassScale::Nanogram => value / 1_000.0,
            MassScale::Microgram => value,
            MassScale::Milligram => value * 1_000.0,
            MassScale::Gram => value * 1_000_000.0,
        }
    }
}

impl Quantity {
    /// Concentration base a preparation must have to deliver this quantity.
    pub fn base(&self) -> BaseUnit {
        match self {
            Quantity::Mass(_) => BaseUnit::Microgram,
            Quantity::Molar => BaseUnit::Millimole,
            Quantity::Activity => BaseUnit::InternationalUnit,
        }
    }

    /// Base-unit amount → dose-unit amount.
    pub fn from_base(&self, base: f64) -> f64 {
        match self {
            Quantity::Mass(scale) => scale.from_micrograms(base),
            Quantity::Molar | Quantity::Activity => base,
        }
    }

    /// Dose-unit amount → base-unit amount.
    pub fn to_base(&self, value: f64) -> f64 {
        match self {
            Quantity::Mass(scale) => scale.to_micrograms(value),
            Quantity::Molar | Quantity::Activity => value,
        }
    }
}

impl TimeBase {
    /// Number of time-base periods in one hour.
    pub fn periods_per_hour(&self) -> f64 {
        match self {
            TimeBase::Minute => 60.0,
            TimeBase::Hour => 1.0,
        }
    }
}

impl DoseUnit {
    /// All dose units, in the order offered for custom preparations.
    pub const ALL: [DoseUnit; 10] = [
        DoseUnit::MicrogramPerKgPerMinute,
        DoseUnit::MicrogramPerKgPerHour,
        DoseUnit::MilligramPerKgPerHour,
        DoseUnit::NanogramPerKgPerMinute,
        DoseUnit::MicrogramPerHour,
        DoseUnit::MilligramPerHour,
        DoseUnit::GramPerHour,
        DoseUnit::MillimolePerHour,
        DoseUnit::InternationalUnitPerHour,
        DoseUnit::NonContinuous,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DoseUnit::MicrogramPerKgPerMinute => "µg/kg/min",
            DoseUnit::MicrogramPerKgPerHour => "µg/kg/h",
            DoseUnit::MilligramPerKgPerHour => "mg/kg/h",
            DoseUnit::NanogramPerKgPerMinute => "ng/kg/min",
            DoseUnit::MicrogramPerHour => "µg/h",
            DoseUnit::MilligramPerHour => "mg/h",
            DoseUnit::GramPerHour => "g/h",
            DoseUnit::MillimolePerHour => "mmol/h",
            DoseUnit::InternationalUnitPerHour => "IU/h",
            DoseUnit::NonContinuous => "non-continuous",
        }
    }

    /// Conversion rule, or `None` for non-continuous preparations.
    pub fn rule(&self) -> Option<DoseRule> {
        use MassScale::*;
        use TimeBase::*;

        let (quantity, per_kg, time_base) = match self {
            DoseUnit::MicrogramPerKgPerMinute => (Quantity::Mass(Microgram), true, Minute),
            DoseUnit::MicrogramPerKgPerHour => (Quantity::Mass(Microgram), true, Hour),
            DoseUnit::MilligramPerKgPerHour => (Quantity::Mass(Milligram), true, Hour),
            DoseUnit::NanogramPerKgPerMinute => (Quantity::Mass(Nanogram), true, Minute),
            DoseUnit::MicrogramPerHour => (Quantity::Mass(Microgram), false, Hour),
            DoseUnit::MilligramPerHour => (Quantity::Mass(Milligram), false, Hour),
            DoseUnit::GramPerHour => (Quantity::Mass(Gram), false, Hour),
            DoseUnit::MillimolePerHour => (Quantity::Molar, false, Hour),
            DoseUnit::InternationalUnitPerHour => (Quantity::Activity, false, Hour),
            DoseUnit::NonContinuous => return None,
        };

        Some(DoseRule {
            quantity,
            per_kg,
            time_base,
        })
    }

    /// Whether conversions need a patient weight.
    pub fn is_weight_scaled(&self) -> bool {
        self.rule().is_some_and(|rule| rule.per_kg)
    }

    pub fn is_continuous(&self) -> bool {
        self.rule().is_some()
    }
}

impl FromStr for DoseUnit {
    type Err = UnitError;

    /// Case-insensitive; accepts `mcg`/`ug` for µg and `IE`/`I.E.` for IU.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace('μ', "µ")
            .replace("mcg", "µg")
            .replace("ug/", "µg/")
            .replace("i.e./", "iu/")
            .replace("ie/", "iu/");

        if normalized == "info-bolus" {
            return Ok(DoseUnit::NonContinuous);
        }

        DoseUnit::ALL
            .iter()
            .find(|unit| unit.tag().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| UnitError::UnsupportedDoseUnit(s.to_string()))
    }
}

impl TryFrom<String> for DoseUnit {
    type Error = UnitError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<DoseUnit> for &'static str {
    fn from(unit: DoseUnit) -> Self {
        unit.tag()
    }
}

impl fmt::Display for DoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
