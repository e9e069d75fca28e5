//! Compressor (stations 2 → 3).

use log::debug;
use turbojet_thermo::PerfectGas;
use uom::si::{
    f64::{MassRate, Power, Pressure, Ratio, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{inlet::InletExit, shaft::ShaftPower};

/// Compressor exit state and the shaft power it absorbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorExit {
    pub total_temperature: ThermodynamicTemperature,
    pub total_pressure: Pressure,

    /// Exit temperature of an isentropic compression to the same pressure.
    pub ideal_total_temperature: ThermodynamicTemperature,

    /// Shaft power required to drive the compressor.
    pub power: ShaftPower,
}

/// Compresses the inlet flow by a fixed total-pressure ratio.
///
/// The ideal temperature rise follows from the isentropic relation and the
/// actual rise is the ideal rise divided by `efficiency`. The compressor
/// itself adds no pressure loss, so `P₀₃ = P₀₂·π_c` exactly.
///
/// Shaft power is `ṁ·cp·(T₀₃ − T₀₂)`. A non-comparable power (only reachable
/// from non-finite inputs) is reported as zero.
#[must_use]
pub fn compress(
    inlet: &InletExit,
    air_mass_rate: MassRate,
    gas: &PerfectGas,
    pressure_ratio: Ratio,
    efficiency: Ratio,
) -> CompressorExit {
    let pi_c = pressure_ratio.get::<ratio>();
    let t02 = inlet.total_temperature.get::<kelvin>();

    let t03_ideal = t02 * gas.temperature_ratio(pi_c);
    let t03 = t02 + (t03_ideal - t02) / efficiency.get::<ratio>();

    let cp = gas.cp().get::<joule_per_kilogram_kelvin>();
    let m_dot = air_mass_rate.get::<kilogram_per_second>();
    let power = Power::new::<watt>(m_dot * cp * (t03 - t02));

    let power = ShaftPower::new(power).unwrap_or_else(|error| {
        debug!("compressor power {power:?} is not usable ({error}), using zero");
        ShaftPower::zero()
    });

    CompressorExit {
        total_temperature: ThermodynamicTemperature::new::<kelvin>(t03),
        total_pressure: inlet.total_pressure * pi_c,
        ideal_total_temperature: ThermodynamicTemperature::new::<kelvin>(t03_ideal),
        power,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::pressure::pascal;

    use crate::design::EngineDesign;

    fn inlet_exit(t02: f64, p02: f64) -> InletExit {
        InletExit {
            total_temperature: ThermodynamicTemperature::new::<kelvin>(t02),
            total_pressure: Pressure::new::<pascal>(p02),
            ideal_total_pressure: Pressure::new::<pascal>(p02 / 0.98),
        }
    }

    fn compress_default(inlet: &InletExit, m_dot: f64) -> CompressorExit {
        let design = EngineDesign::default();
        compress(
            inlet,
            MassRate::new::<kilogram_per_second>(m_dot),
            &design.cold_gas,
            design.compressor_pressure_ratio,
            design.compressor_efficiency,
        )
    }

    #[test]
    fn cruise_compression() {
        // Inlet exit at 35,000 ft and Mach 0.85.
        let exit = compress_default(&inlet_exit(250.426, 37_474.88), 95.671);

        assert_relative_eq!(
            exit.total_temperature.get::<kelvin>(),
            538.12,
            max_relative = 1e-4
        );
        assert_relative_eq!(
            exit.total_pressure.get::<pascal>(),
            12.0 * 37_474.88,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            exit.power.quantity().get::<watt>(),
            27.6617e6,
            max_relative = 1e-4
        );
    }

    #[test]
    fn efficiency_divides_the_ideal_rise() {
        let exit = compress_default(&inlet_exit(300.0, 100_000.0), 10.0);

        let ideal_rise = exit.ideal_total_temperature.get::<kelvin>() - 300.0;
        let actual_rise = exit.total_temperature.get::<kelvin>() - 300.0;
        assert_relative_eq!(actual_rise, ideal_rise / 0.9, max_relative = 1e-12);
        assert!(exit.total_temperature > exit.ideal_total_temperature);
    }

    #[test]
    fn no_flow_needs_no_power() {
        let exit = compress_default(&inlet_exit(288.15, 99_298.5), 0.0);

        assert_eq!(exit.power, ShaftPower::zero());
        assert!(exit.total_temperature.get::<kelvin>() > 600.0);
    }

    #[test]
    fn unit_pressure_ratio_is_a_pass_through() {
        let design = EngineDesign::default();
        let inlet = inlet_exit(300.0, 100_000.0);
        let exit = compress(
            &inlet,
            MassRate::new::<kilogram_per_second>(10.0),
            &design.cold_gas,
            Ratio::new::<ratio>(1.0),
            design.compressor_efficiency,
        );

        assert_relative_eq!(exit.total_temperature.get::<kelvin>(), 300.0);
        assert_relative_eq!(exit.total_pressure.get::<pascal>(), 100_000.0);
        assert_eq!(exit.power.quantity().get::<watt>(), 0.0);
    }
}
