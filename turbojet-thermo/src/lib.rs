//! Thermodynamic building blocks for turbojet cycle modeling.
//!
//! - [`constraint`]: type-level numeric invariants used to validate design inputs.
//! - [`gas`]: closed-form relations for a calorically perfect gas.
//! - [`units`]: quantity aliases not provided by `uom`.

pub mod constraint;
pub mod gas;
pub mod units;

pub use gas::{GasError, PerfectGas};
