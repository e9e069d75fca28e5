//! Calorically perfect gas relations.
//!
//! A [`PerfectGas`] is described by its ratio of specific heats `γ`, its
//! constant-pressure specific heat `cp`, and its specific gas constant `R`.
//! The three are stored independently: a cycle model may pair a rounded `γ`
//! with a separately rounded `cp`, so `γ` is not derived from `cp / (cp − R)`.
//!
//! All relations here are closed-form and never fail once the gas has been
//! constructed. Logarithm arguments in [`PerfectGas::entropy_change`] are
//! floored at [`RATIO_FLOOR`] so degenerate states still produce finite values.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{Pressure, SpecificHeatCapacity, ThermodynamicTemperature, Velocity},
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::{
    constraint::{ConstraintError, StrictlyPositive},
    units::{SpecificEntropy, SpecificGasConstant},
};

/// Smallest ratio passed to a logarithm or a fractional power.
pub const RATIO_FLOOR: f64 = 1e-9;

/// Errors that may occur when constructing a [`PerfectGas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GasError {
    /// The ratio of specific heats must be finite and greater than one.
    #[error("ratio of specific heats must be greater than one")]
    Gamma,

    /// The constant-pressure specific heat is not strictly positive.
    #[error("specific heat `cp` is invalid: {0}")]
    SpecificHeat(#[source] ConstraintError),

    /// The specific gas constant is not strictly positive.
    #[error("gas constant `R` is invalid: {0}")]
    GasConstant(#[source] ConstraintError),
}

/// A calorically perfect gas with constant `γ`, `cp`, and `R`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerfectGas {
    gamma: f64,
    cp: SpecificHeatCapacity,
    gas_constant: SpecificGasConstant,
}

impl PerfectGas {
    /// Creates a perfect gas from `γ`, `cp`, and `R`.
    ///
    /// # Errors
    ///
    /// Returns a [`GasError`] if `γ ≤ 1`, or if `cp` or `R` is not strictly positive.
    pub fn new(
        gamma: f64,
        cp: SpecificHeatCapacity,
        gas_constant: SpecificGasConstant,
    ) -> Result<Self, GasError> {
        let gas = Self {
            gamma,
            cp,
            gas_constant,
        };
        gas.validate()?;
        Ok(gas)
    }

    /// Checks that `γ > 1` and that `cp` and `R` are strictly positive.
    ///
    /// Deserialized gases bypass [`PerfectGas::new`], so callers holding one
    /// should validate it before use.
    ///
    /// # Errors
    ///
    /// Returns the first [`GasError`] found.
    pub fn validate(&self) -> Result<(), GasError> {
        if !self.gamma.is_finite() || self.gamma <= 1.0 {
            return Err(GasError::Gamma);
        }
        StrictlyPositive::new(self.cp).map_err(GasError::SpecificHeat)?;
        StrictlyPositive::new(self.gas_constant).map_err(GasError::GasConstant)?;
        Ok(())
    }

    /// Ratio of specific heats `γ`.
    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Constant-pressure specific heat `cp`.
    #[must_use]
    pub fn cp(&self) -> SpecificHeatCapacity {
        self.cp
    }

    /// Specific gas constant `R`.
    #[must_use]
    pub fn gas_constant(&self) -> SpecificGasConstant {
        self.gas_constant
    }

    /// Returns `γ / (γ − 1)`, the exponent relating an isentropic pressure
    /// ratio to its temperature ratio.
    #[must_use]
    pub fn isentropic_exponent(&self) -> f64 {
        self.gamma / (self.gamma - 1.0)
    }

    /// Temperature ratio across an isentropic process with the given pressure ratio.
    ///
    /// Computes `T₂/T₁ = (p₂/p₁)^((γ − 1)/γ)`.
    #[must_use]
    pub fn temperature_ratio(&self, pressure_ratio: f64) -> f64 {
        pressure_ratio.powf((self.gamma - 1.0) / self.gamma)
    }

    /// Pressure ratio across an isentropic process with the given temperature ratio.
    ///
    /// Computes `p₂/p₁ = (T₂/T₁)^(γ/(γ − 1))`.
    #[must_use]
    pub fn pressure_ratio(&self, temperature_ratio: f64) -> f64 {
        temperature_ratio.powf(self.isentropic_exponent())
    }

    /// Stagnation-to-static temperature ratio at a Mach number.
    ///
    /// Computes `T₀/T = 1 + (γ − 1)/2 · M²`.
    #[must_use]
    pub fn stagnation_temperature_ratio(&self, mach: f64) -> f64 {
        1.0 + (self.gamma - 1.0) / 2.0 * mach.powi(2)
    }

    /// Speed of sound `a = √(γ·R·T)`.
    #[must_use]
    pub fn speed_of_sound(&self, temperature: ThermodynamicTemperature) -> Velocity {
        let r = self.gas_constant.get::<joule_per_kilogram_kelvin>();
        let t = temperature.get::<kelvin>();
        Velocity::new::<meter_per_second>((self.gamma * r * t).sqrt())
    }

    /// Specific entropy change between two states.
    ///
    /// Computes `Δs = cp·ln(T₂/T₁) − R·ln(p₂/p₁)`, with each logarithm
    /// argument floored at [`RATIO_FLOOR`].
    #[must_use]
    pub fn entropy_change(
        &self,
        from: (ThermodynamicTemperature, Pressure),
        to: (ThermodynamicTemperature, Pressure),
    ) -> SpecificEntropy {
        let cp = self.cp.get::<joule_per_kilogram_kelvin>();
        let r = self.gas_constant.get::<joule_per_kilogram_kelvin>();

        let t_ratio = to.0.get::<kelvin>() / from.0.get::<kelvin>();
        let p_ratio = to.1.get::<pascal>() / from.1.get::<pascal>();

        let ds = cp * t_ratio.max(RATIO_FLOOR).ln() - r * p_ratio.max(RATIO_FLOOR).ln();
        SpecificEntropy::new::<joule_per_kilogram_kelvin>(ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn air() -> PerfectGas {
        PerfectGas::new(
            1.4,
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0),
            SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0),
        )
        .unwrap()
    }

    fn kelvin_of(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    fn pascal_of(value: f64) -> Pressure {
        Pressure::new::<pascal>(value)
    }

    #[test]
    fn rejects_non_physical_parameters() {
        let cp = SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0);
        let r = SpecificGasConstant::new::<joule_per_kilogram_kelvin>(287.0);

        assert_eq!(PerfectGas::new(1.0, cp, r), Err(GasError::Gamma));
        assert_eq!(PerfectGas::new(f64::NAN, cp, r), Err(GasError::Gamma));
        assert!(matches!(
            PerfectGas::new(1.4, cp * 0.0, r),
            Err(GasError::SpecificHeat(ConstraintError::Zero))
        ));
        assert!(matches!(
            PerfectGas::new(1.4, cp, -r),
            Err(GasError::GasConstant(ConstraintError::Negative))
        ));
    }

    #[test]
    fn isentropic_ratios_are_inverse() {
        let gas = air();

        // `T2/T1 = 2^(2/7)` exactly undoes `(T2/T1)^(7/2) = 2`.
        let t_ratio = gas.temperature_ratio(2.0);
        assert_relative_eq!(gas.pressure_ratio(t_ratio), 2.0, epsilon = 1e-12);
        assert_relative_eq!(gas.isentropic_exponent(), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn stagnation_ratio_at_mach_one() {
        assert_relative_eq!(air().stagnation_temperature_ratio(1.0), 1.2);
        assert_relative_eq!(air().stagnation_temperature_ratio(0.0), 1.0);
    }

    #[test]
    fn speed_of_sound_at_sea_level() {
        // √(1.4 · 287 · 288.15) = 340.2626 m/s
        let a = air().speed_of_sound(kelvin_of(288.15));
        assert_relative_eq!(a.get::<meter_per_second>(), 340.2626, epsilon = 1e-3);
    }

    #[test]
    fn isentropic_process_has_no_entropy_change() {
        let gas = air();
        let t_ratio = gas.temperature_ratio(12.0);

        let ds = gas.entropy_change(
            (kelvin_of(300.0), pascal_of(100_000.0)),
            (kelvin_of(300.0 * t_ratio), pascal_of(1_200_000.0)),
        );

        // `cp` and `R` do not give exactly `γ = 1.4`, so allow a small residual.
        assert!(ds.get::<joule_per_kilogram_kelvin>().abs() < 1.0);
    }

    #[test]
    fn entropy_change_floors_degenerate_ratios() {
        let ds = air().entropy_change(
            (kelvin_of(300.0), pascal_of(100_000.0)),
            (kelvin_of(-10.0), pascal_of(100_000.0)),
        );

        let expected = 1005.0 * RATIO_FLOOR.ln();
        assert_relative_eq!(ds.get::<joule_per_kilogram_kelvin>(), expected);
    }
}
