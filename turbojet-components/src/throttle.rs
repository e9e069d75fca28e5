//! Throttle position to turbine-inlet temperature.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{Ratio, ThermodynamicTemperature},
    ratio::ratio,
    thermodynamic_temperature::kelvin,
};

/// Errors reported by [`ThrottleMap::new`] and [`ThrottleMap::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ThrottleError {
    /// A temperature bound is not a strictly positive, finite temperature.
    #[error("throttle temperature bound must be positive and finite (got {0} K)")]
    Bound(f64),

    /// The idle bound exceeds the full-throttle bound.
    #[error("idle T4 ({min} K) exceeds full-throttle T4 ({max} K)")]
    Inverted { min: f64, max: f64 },
}

/// Linear map from throttle position to commanded turbine-inlet temperature.
///
/// Position `0` maps to `t4_min` and full throttle to `t4_max`. Positions
/// outside `[0, 1]` are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleMap {
    t4_min: ThermodynamicTemperature,
    t4_max: ThermodynamicTemperature,
}

impl Default for ThrottleMap {
    /// Idle at 800 K and full throttle at 1800 K.
    fn default() -> Self {
        Self {
            t4_min: ThermodynamicTemperature::new::<kelvin>(800.0),
            t4_max: ThermodynamicTemperature::new::<kelvin>(1800.0),
        }
    }
}

impl ThrottleMap {
    /// Creates a throttle map between the idle and full-throttle temperatures.
    ///
    /// # Errors
    ///
    /// Returns a [`ThrottleError`] if a bound is not strictly positive and
    /// finite, or if `t4_min > t4_max`.
    pub fn new(
        t4_min: ThermodynamicTemperature,
        t4_max: ThermodynamicTemperature,
    ) -> Result<Self, ThrottleError> {
        let map = Self { t4_min, t4_max };
        map.validate()?;
        Ok(map)
    }

    /// Checks the bounds of a map that bypassed [`ThrottleMap::new`].
    ///
    /// # Errors
    ///
    /// See [`ThrottleMap::new`].
    pub fn validate(&self) -> Result<(), ThrottleError> {
        let min = self.t4_min.get::<kelvin>();
        let max = self.t4_max.get::<kelvin>();

        for bound in [min, max] {
            if !(bound > 0.0 && bound.is_finite()) {
                return Err(ThrottleError::Bound(bound));
            }
        }
        if min > max {
            return Err(ThrottleError::Inverted { min, max });
        }

        Ok(())
    }

    #[must_use]
    pub fn t4_min(&self) -> ThermodynamicTemperature {
        self.t4_min
    }

    #[must_use]
    pub fn t4_max(&self) -> ThermodynamicTemperature {
        self.t4_max
    }

    /// Turbine-inlet temperature commanded at `position`.
    ///
    /// Build the position with [`uom::si::ratio::percent`] to work in percent.
    #[must_use]
    pub fn turbine_inlet_temperature(&self, position: Ratio) -> ThermodynamicTemperature {
        let fraction = position.get::<ratio>().clamp(0.0, 1.0);
        let min = self.t4_min.get::<kelvin>();
        let max = self.t4_max.get::<kelvin>();
        ThermodynamicTemperature::new::<kelvin>(min + fraction * (max - min))
    }
}
