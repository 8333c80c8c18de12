//! Domain models for the perfusor engine.

mod outcome;
mod preparation;
mod units;

pub use outcome::*;
pub use preparation::*;
pub use units::*;
