//! Shaft power exchanged between the compressor and the turbine.
//!
//! Power on the shaft is exposed as a non-negative quantity. Direction is
//! carried by where the value appears: the compressor absorbs it and the
//! turbine delivers it.

use turbojet_thermo::constraint::{Constrained, ConstraintError, NonNegative};
use uom::si::f64::Power;

/// Power transmitted through the engine shaft.
///
/// The inner value is a [`Power`] that is guaranteed to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ShaftPower(Power);

impl ShaftPower {
    /// Returns zero shaft power.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_constrained(NonNegative::zero())
    }

    /// Constructs a [`ShaftPower`] if `power >= 0`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `power` is negative or not comparable (e.g., NaN).
    pub fn new(power: Power) -> Result<Self, ConstraintError> {
        let power = NonNegative::new(power)?;
        Ok(Self::from_constrained(power))
    }

    /// Creates a new [`ShaftPower`] from a pre-validated non-negative power.
    #[must_use]
    pub fn from_constrained(power: Constrained<Power, NonNegative>) -> Self {
        Self(power.into_inner())
    }

    /// Returns the underlying power quantity.
    #[must_use]
    pub fn quantity(&self) -> Power {
        self.0
    }
}
