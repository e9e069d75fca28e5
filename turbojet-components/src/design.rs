//! Engine design point.
//!
//! An [`EngineDesign`] fixes every parameter of the cycle that is not a flight
//! input: gas properties for the cold and hot flow paths, the fuel, the inlet
//! capture area, and the component efficiencies and pressure ratios.
//! [`EngineDesign::default`] is the reference single-spool turbojet.
//!
//! Designs can be deserialized (for example from TOML). Quantities are read in
//! SI base units and any omitted field falls back to the default design.
//! Always call [`EngineDesign::validate`] on a deserialized design, or pass it
//! through [`Turbojet::new`](crate::Turbojet::new), which validates for you.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use turbojet_thermo::{
    GasError, PerfectGas,
    constraint::{ConstraintError, StrictlyPositive, UnitInterval},
    units::{SpecificEnthalpy, SpecificGasConstant},
};
use uom::si::{
    area::square_meter,
    available_energy::joule_per_kilogram,
    f64::{Area, Ratio, SpecificHeatCapacity},
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

/// Gas constant used by the cycle for both flow paths, J/(kg·K).
///
/// Deliberately distinct from the atmosphere's dry-air constant.
pub const CYCLE_GAS_CONSTANT: f64 = 287.0;

/// Errors reported by [`EngineDesign::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DesignError {
    /// A scalar design parameter violates its constraint.
    #[error("design parameter `{name}` is invalid: {source}")]
    Parameter {
        name: &'static str,
        source: ConstraintError,
    },

    /// A flow-path gas has non-physical properties.
    #[error("gas `{name}` is invalid: {source}")]
    Gas {
        name: &'static str,
        source: GasError,
    },

    /// The compressor pressure ratio is below one.
    #[error("compressor pressure ratio must be at least one (got {0})")]
    CompressorPressureRatio(f64),
}

/// Fixed design parameters of a single-spool turbojet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineDesign {
    /// Air through the inlet and compressor.
    pub cold_gas: PerfectGas,

    /// Combustion products through the turbine and nozzle.
    pub hot_gas: PerfectGas,

    /// Lower heating value of the fuel.
    pub fuel_heating_value: SpecificEnthalpy,

    /// Inlet capture area.
    pub inlet_area: Area,

    /// Total-pressure recovery factor of the inlet.
    pub inlet_pressure_recovery: Ratio,

    /// Compressor total-pressure ratio.
    pub compressor_pressure_ratio: Ratio,

    /// Compressor isentropic efficiency.
    pub compressor_efficiency: Ratio,

    /// Combustion efficiency (completeness of heat release).
    pub combustor_efficiency: Ratio,

    /// Combustor total-pressure ratio (exit over inlet).
    pub combustor_pressure_ratio: Ratio,

    /// Turbine isentropic efficiency.
    pub turbine_efficiency: Ratio,

    /// Nozzle efficiency.
    pub nozzle_efficiency: Ratio,
}

impl Default for EngineDesign {
    fn default() -> Self {
        let r = SpecificGasConstant::new::<joule_per_kilogram_kelvin>(CYCLE_GAS_CONSTANT);
        let dimensionless = Ratio::new::<ratio>;

        Self {
            cold_gas: PerfectGas::new(
                1.4,
                SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1005.0),
                r,
            )
            .expect("default cold gas is physical"),
            hot_gas: PerfectGas::new(
                1.333,
                SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1148.0),
                r,
            )
            .expect("default hot gas is physical"),
            fuel_heating_value: SpecificEnthalpy::new::<joule_per_kilogram>(43.1e6),
            inlet_area: Area::new::<square_meter>(1.0),
            inlet_pressure_recovery: dimensionless(0.98),
            compressor_pressure_ratio: dimensionless(12.0),
            compressor_efficiency: dimensionless(0.90),
            combustor_efficiency: dimensionless(0.99),
            combustor_pressure_ratio: dimensionless(0.96),
            turbine_efficiency: dimensionless(0.92),
            nozzle_efficiency: dimensionless(0.98),
        }
    }
}

impl EngineDesign {
    /// Checks every design parameter.
    ///
    /// - Both gases must be physical (see [`PerfectGas::validate`]).
    /// - The fuel heating value and inlet area must be strictly positive.
    /// - Efficiencies and pressure-recovery factors must lie in `(0, 1]`.
    /// - The compressor pressure ratio must be at least one.
    ///
    /// # Errors
    ///
    /// Returns the first [`DesignError`] found.
    pub fn validate(&self) -> Result<(), DesignError> {
        for (name, gas) in [("cold_gas", &self.cold_gas), ("hot_gas", &self.hot_gas)] {
            gas.validate()
                .map_err(|source| DesignError::Gas { name, source })?;
        }

        StrictlyPositive::new(self.fuel_heating_value)
            .map_err(parameter("fuel_heating_value"))?;
        StrictlyPositive::new(self.inlet_area).map_err(parameter("inlet_area"))?;

        for (name, value) in [
            ("inlet_pressure_recovery", self.inlet_pressure_recovery),
            ("compressor_efficiency", self.compressor_efficiency),
            ("combustor_efficiency", self.combustor_efficiency),
            ("combustor_pressure_ratio", self.combustor_pressure_ratio),
            ("turbine_efficiency", self.turbine_efficiency),
            ("nozzle_efficiency", self.nozzle_efficiency),
        ] {
            UnitInterval::new(value).map_err(parameter(name))?;
            StrictlyPositive::new(value).map_err(parameter(name))?;
        }

        let pi_c = self.compressor_pressure_ratio.get::<ratio>();
        if !(pi_c >= 1.0 && pi_c.is_finite()) {
            return Err(DesignError::CompressorPressureRatio(pi_c));
        }

        Ok(())
    }
}

/// Wraps a constraint violation with the name of the offending parameter.
fn parameter(name: &'static str) -> impl Fn(ConstraintError) -> DesignError {
    move |source| DesignError::Parameter { name, source }
}
