//! Turbine (stations 4 → 5).
//!
//! The turbine delivers exactly the power the compressor absorbs. There is
//! no mechanical loss or bleed, so the exit temperature follows from the
//! energy balance alone and the exit pressure from the isentropic-equivalent
//! expansion backed out through the turbine efficiency.

use log::debug;
use turbojet_thermo::{PerfectGas, gas::RATIO_FLOOR};
use uom::si::{
    f64::{Pressure, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{combustor::CombustorExit, shaft::ShaftPower};

/// Smallest hot-flow heat capacity rate `ṁ·cp`, W/K, for which the turbine
/// temperature drop is computed.
pub const MIN_HEAT_CAPACITY_RATE: f64 = 1e-6;

/// Turbine exit state and the shaft power it delivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineExit {
    pub total_temperature: ThermodynamicTemperature,
    pub total_pressure: Pressure,

    /// Exit temperature of an isentropic expansion to the same pressure.
    pub ideal_total_temperature: ThermodynamicTemperature,

    /// Shaft power delivered, identical to the power demanded.
    pub power: ShaftPower,
}

/// Expands the combustor exit flow to deliver `demand`.
///
/// Computes `T₀₅ = T₀₄ − W/(ṁ_hot·cp)`, then `T₀₅ₛ = T₀₄ − (T₀₄ − T₀₅)/η_t`
/// and `P₀₅ = P₀₄·(T₀₅ₛ/T₀₄)^(γ/(γ−1))`. With negligible hot flow the
/// temperature is left unchanged. The ideal temperature ratio is floored at
/// [`RATIO_FLOOR`] so an over-demanded turbine stays finite.
#[must_use]
pub fn expand(
    combustor: &CombustorExit,
    demand: ShaftPower,
    gas: &PerfectGas,
    efficiency: Ratio,
) -> TurbineExit {
    let t04 = combustor.total_temperature.get::<kelvin>();
    let capacity_rate = combustor.hot_mass_rate.get::<kilogram_per_second>()
        * gas.cp().get::<joule_per_kilogram_kelvin>();

    let t05 = if capacity_rate > MIN_HEAT_CAPACITY_RATE {
        t04 - demand.quantity().get::<watt>() / capacity_rate
    } else {
        debug!("hot mass flow is negligible, turbine leaves T04 = {t04} K unchanged");
        t04
    };

    let t05_ideal = t04 - (t04 - t05) / efficiency.get::<ratio>();
    let temperature_ratio = t05_ideal / t04;
    if temperature_ratio < RATIO_FLOOR {
        debug!("turbine cannot deliver {demand:?} from T04 = {t04} K, flooring expansion");
    }
    let pressure_ratio = gas.pressure_ratio(temperature_ratio.max(RATIO_FLOOR));

    TurbineExit {
        total_temperature: ThermodynamicTemperature::new::<kelvin>(t05),
        total_pressure: combustor.total_pressure * pressure_ratio,
        ideal_total_temperature: ThermodynamicTemperature::new::<kelvin>(t05_ideal),
        power: demand,
    }
}
