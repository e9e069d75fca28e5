//! Combustor (stations 3 → 4).
//!
//! The turbine-inlet temperature is commanded, not computed: the combustor
//! finds the fuel flow that reaches it in a single energy balance,
//!
//! ```text
//! f = (cp_gas·T₀₄ − cp_air·T₀₃) / (η_b·Q − cp_gas·T₀₄)
//! ```
//!
//! When the denominator is too small the balance cannot be closed and no fuel
//! is burned. A commanded temperature below what the compressor already
//! delivers also burns no fuel. Neither case is an error; the returned
//! [`CombustionRegime`] says which path was taken.

use log::debug;
use serde::{Deserialize, Serialize};
use turbojet_thermo::{PerfectGas, units::SpecificEnthalpy};
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{MassRate, Pressure, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::compressor::CompressorExit;

/// Smallest energy-balance denominator `η_b·Q − cp_gas·T₀₄`, J/kg, for
/// which a fuel–air ratio is computed.
pub const MIN_HEAT_RELEASE_MARGIN: f64 = 1.0e3;

/// How the fuel–air ratio was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombustionRegime {
    /// Fuel burned to reach the commanded turbine-inlet temperature.
    Normal,

    /// The fuel could not release enough heat to reach the commanded
    /// temperature, so the fuel–air ratio was forced to zero.
    EnergyBalanceLimit,

    /// The commanded temperature is at or below what the flow already has.
    NoHeatAddition,
}

/// Combustor exit state and flows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustorExit {
    /// Turbine-inlet temperature, equal to the commanded value.
    pub total_temperature: ThermodynamicTemperature,
    pub total_pressure: Pressure,

    /// Fuel mass flow per unit air mass flow, never negative.
    pub fuel_air_ratio: Ratio,

    pub fuel_mass_rate: MassRate,

    /// Air plus fuel mass flow entering the turbine.
    pub hot_mass_rate: MassRate,

    pub regime: CombustionRegime,
}

/// Fuel and combustor parameters for [`burn`].
#[derive(Debug, Clone, Copy)]
pub struct Fuel<'a> {
    /// Gas entering the combustor.
    pub cold_gas: &'a PerfectGas,

    /// Combustion products leaving it.
    pub hot_gas: &'a PerfectGas,

    pub heating_value: SpecificEnthalpy,
    pub efficiency: Ratio,
    pub pressure_ratio: Ratio,
}

/// Burns fuel to raise the compressor exit flow to `turbine_inlet_temperature`.
///
/// The combustor only loses pressure: `P₀₄ = P₀₃·π_b`.
#[must_use]
pub fn burn(
    compressor: &CompressorExit,
    air_mass_rate: MassRate,
    turbine_inlet_temperature: ThermodynamicTemperature,
    fuel: Fuel<'_>,
) -> CombustorExit {
    let cp_air = fuel.cold_gas.cp().get::<joule_per_kilogram_kelvin>();
    let cp_gas = fuel.hot_gas.cp().get::<joule_per_kilogram_kelvin>();
    let heating_value = fuel.heating_value.get::<joule_per_kilogram>();

    let t03 = compressor.total_temperature.get::<kelvin>();
    let t04 = turbine_inlet_temperature.get::<kelvin>();

    let denominator = fuel.efficiency.get::<ratio>() * heating_value - cp_gas * t04;
    let (fuel_air_ratio, regime) = if denominator > MIN_HEAT_RELEASE_MARGIN {
        let f = (cp_gas * t04 - cp_air * t03) / denominator;
        if f > 0.0 {
            (f, CombustionRegime::Normal)
        } else {
            debug!("T04 = {t04} K needs no heat beyond T03 = {t03} K, burning no fuel");
            (0.0, CombustionRegime::NoHeatAddition)
        }
    } else {
        debug!("T04 = {t04} K is beyond the energy-balance limit, burning no fuel");
        (0.0, CombustionRegime::EnergyBalanceLimit)
    };

    let m_air = air_mass_rate.get::<kilogram_per_second>();
    let m_fuel = fuel_air_ratio * m_air;

    CombustorExit {
        total_temperature: turbine_inlet_temperature,
        total_pressure: compressor.total_pressure * fuel.pressure_ratio.get::<ratio>(),
        fuel_air_ratio: Ratio::new::<ratio>(fuel_air_ratio),
        fuel_mass_rate: MassRate::new::<kilogram_per_second>(m_fuel),
        hot_mass_rate: MassRate::new::<kilogram_per_second>(m_air + m_fuel),
        regime,
    }
}
