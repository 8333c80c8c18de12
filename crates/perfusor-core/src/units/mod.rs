//! Unit-conversion engine.
//!
//! Pipeline: Amount Normalization → Concentration → Rate↔Dose Conversion
//!
//! Every function here is pure. Missing or incomplete input is reported as
//! [`Outcome::NotComputable`](crate::models::Outcome), never as an error; the
//! only error is an amount-unit tag outside the supported set.

mod concentration;
mod converter;
mod normalizer;

pub use concentration::*;
pub use converter::*;
pub use normalizer::*;

use thiserror::Error;

/// Unit errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Unsupported amount unit: {0}")]
    UnsupportedUnit(String),

    #[error("Unsupported dose unit: {0}")]
    UnsupportedDoseUnit(String),
}

pub type UnitResult<T> = Result<T, UnitError>;
