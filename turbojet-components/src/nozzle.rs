//! Convergent nozzle expanding fully to ambient pressure (stations 5 → 8).

use log::debug;
use turbojet_thermo::PerfectGas;
use uom::si::{
    f64::{Pressure, Ratio, ThermodynamicTemperature, Velocity},
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::turbine::TurbineExit;

/// Nozzle exit conditions (station 8).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleExit {
    /// Static exit temperature.
    pub temperature: ThermodynamicTemperature,

    /// Static exit temperature of an isentropic expansion to ambient pressure.
    pub ideal_temperature: ThermodynamicTemperature,

    pub velocity: Velocity,

    /// Whether the exit temperature had to be clamped to the inlet temperature.
    pub clamped: bool,
}

/// Expands the turbine exit flow to `ambient_pressure`.
///
/// Computes `T₈ = T₀₅ − η_n·(T₀₅ − T₈ₛ)` and `V₈ = √(2·cp·(T₀₅ − T₈))`.
/// The exit temperature never exceeds `T₀₅`, so a nozzle whose inlet is
/// below ambient pressure produces zero velocity instead of a temperature rise.
#[must_use]
pub fn expand(
    turbine: &TurbineExit,
    ambient_pressure: Pressure,
    gas: &PerfectGas,
    efficiency: Ratio,
) -> NozzleExit {
    let t05 = turbine.total_temperature.get::<kelvin>();
    let pressure_ratio = ambient_pressure.get::<pascal>() / turbine.total_pressure.get::<pascal>();

    let t8_ideal = t05 * gas.temperature_ratio(pressure_ratio);
    let mut t8 = t05 - efficiency.get::<ratio>() * (t05 - t8_ideal);

    let clamped = t8 > t05;
    if clamped {
        debug!("nozzle exit T8 = {t8} K exceeds T05 = {t05} K, clamping");
        t8 = t05;
    }

    let cp = gas.cp().get::<joule_per_kilogram_kelvin>();
    let v8 = (2.0 * cp * (t05 - t8).max(0.0)).sqrt();

    NozzleExit {
        temperature: ThermodynamicTemperature::new::<kelvin>(t8),
        ideal_temperature: ThermodynamicTemperature::new::<kelvin>(t8_ideal),
        velocity: Velocity::new::<meter_per_second>(v8),
        clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{design::EngineDesign, shaft::ShaftPower};

    fn turbine_exit(t05: f64, p05: f64) -> TurbineExit {
        TurbineExit {
            total_temperature: ThermodynamicTemperature::new::<kelvin>(t05),
            total_pressure: Pressure::new::<pascal>(p05),
            ideal_total_temperature: ThermodynamicTemperature::new::<kelvin>(t05),
            power: ShaftPower::zero(),
        }
    }

    fn expand_default(t05: f64, p05: f64, p0: f64) -> NozzleExit {
        let design = EngineDesign::default();
        expand(
            &turbine_exit(t05, p05),
            Pressure::new::<pascal>(p0),
            &design.hot_gas,
            design.nozzle_efficiency,
        )
    }

    #[test]
    fn cruise_expansion() {
        // Turbine exit at 35,000 ft and Mach 0.85, commanded T04 = 1400 K.
        let exit = expand_default(1154.5168, 185_176.45, 23_842.89);

        assert!(!exit.clamped);
        assert_relative_eq!(exit.temperature.get::<kelvin>(), 701.10, max_relative = 1e-4);
        assert_relative_eq!(
            exit.velocity.get::<meter_per_second>(),
            1020.32,
            max_relative = 1e-4
        );
    }

    #[test]
    fn matched_pressure_gives_no_velocity() {
        let exit = expand_default(900.0, 101_325.0, 101_325.0);

        assert!(!exit.clamped);
        assert_relative_eq!(exit.temperature.get::<kelvin>(), 900.0);
        assert_eq!(exit.velocity.get::<meter_per_second>(), 0.0);
    }

    #[test]
    fn underpressured_nozzle_is_clamped() {
        let exit = expand_default(900.0, 50_000.0, 101_325.0);

        assert!(exit.clamped);
        assert_relative_eq!(exit.temperature.get::<kelvin>(), 900.0);
        assert!(exit.ideal_temperature.get::<kelvin>() > 900.0);
        assert_eq!(exit.velocity.get::<meter_per_second>(), 0.0);
    }
}
