//! Freestream capture and inlet diffusion (stations 0 → 2).

use turbojet_thermo::PerfectGas;
use uom::si::{
    area::square_meter,
    f64::{Area, MassRate, Pressure, Ratio, ThermodynamicTemperature, Velocity},
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::atmosphere::AtmosphereState;

/// Flight velocity and captured air flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freestream {
    pub speed_of_sound: Velocity,

    /// Flight velocity, never negative.
    pub velocity: Velocity,

    /// Air mass flow through the capture area.
    pub air_mass_rate: MassRate,
}

/// Total conditions at the inlet exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InletExit {
    pub total_temperature: ThermodynamicTemperature,

    /// Total pressure after applying the pressure-recovery factor.
    pub total_pressure: Pressure,

    /// Total pressure of an isentropic, loss-free diffusion.
    pub ideal_total_pressure: Pressure,
}

/// Computes the flight velocity and the captured air mass flow.
///
/// The mass flow is `ṁ = A·ρ₀·V₀` using freestream density over the capture
/// area, with no correction for the density at the inlet face.
/// A negative Mach number yields zero velocity and zero flow.
#[must_use]
pub fn capture(
    ambient: &AtmosphereState,
    mach: f64,
    gas: &PerfectGas,
    capture_area: Area,
) -> Freestream {
    let speed_of_sound = gas.speed_of_sound(ambient.temperature);
    let v0 = (mach * speed_of_sound.get::<meter_per_second>()).max(0.0);

    let rho0 = ambient.density.get::<kilogram_per_cubic_meter>();
    let m_dot = capture_area.get::<square_meter>() * rho0 * v0;

    Freestream {
        speed_of_sound,
        velocity: Velocity::new::<meter_per_second>(v0),
        air_mass_rate: MassRate::new::<kilogram_per_second>(m_dot),
    }
}

/// Brings the freestream to rest at the inlet exit.
///
/// Total temperature follows the stagnation relation for the flight Mach
/// number. The ideal total pressure follows isentropically from that
/// temperature ratio, and `recovery` scales it directly.
#[must_use]
pub fn diffuse(
    ambient: &AtmosphereState,
    mach: f64,
    gas: &PerfectGas,
    recovery: Ratio,
) -> InletExit {
    let t0 = ambient.temperature.get::<kelvin>();
    let p0 = ambient.pressure.get::<pascal>();

    let t02 = t0 * gas.stagnation_temperature_ratio(mach);
    let p02 = p0 * gas.pressure_ratio(t02 / t0);
    let p02_real = p02 * recovery.get::<ratio>();

    InletExit {
        total_temperature: ThermodynamicTemperature::new::<kelvin>(t02),
        total_pressure: Pressure::new::<pascal>(p02_real),
        ideal_total_pressure: Pressure::new::<pascal>(p02),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::MassDensity;

    use crate::design::EngineDesign;

    fn sea_level() -> AtmosphereState {
        AtmosphereState {
            pressure: Pressure::new::<pascal>(101_325.0),
            temperature: ThermodynamicTemperature::new::<kelvin>(288.15),
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.225),
        }
    }

    #[test]
    fn static_capture_has_no_flow() {
        let design = EngineDesign::default();
        let freestream = capture(&sea_level(), 0.0, &design.cold_gas, design.inlet_area);

        assert_eq!(freestream.velocity.get::<meter_per_second>(), 0.0);
        assert_eq!(freestream.air_mass_rate.get::<kilogram_per_second>(), 0.0);
    }

    #[test]
    fn negative_mach_is_clamped_to_zero_velocity() {
        let design = EngineDesign::default();
        let freestream = capture(&sea_level(), -0.5, &design.cold_gas, design.inlet_area);

        assert_eq!(freestream.velocity.get::<meter_per_second>(), 0.0);
        assert_eq!(freestream.air_mass_rate.get::<kilogram_per_second>(), 0.0);
    }

    #[test]
    fn capture_uses_freestream_density() {
        let design = EngineDesign::default();
        let freestream = capture(&sea_level(), 0.5, &design.cold_gas, design.inlet_area);

        // V₀ = 0.5 · √(1.4 · 287 · 288.15), ṁ = 1 m² · 1.225 kg/m³ · V₀
        let v0 = 0.5 * (1.4_f64 * 287.0 * 288.15).sqrt();
        assert_relative_eq!(freestream.velocity.get::<meter_per_second>(), v0);
        assert_relative_eq!(
            freestream.air_mass_rate.get::<kilogram_per_second>(),
            1.225 * v0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn diffusion_at_mach_one() {
        let design = EngineDesign::default();
        let exit = diffuse(
            &sea_level(),
            1.0,
            &design.cold_gas,
            design.inlet_pressure_recovery,
        );

        // T₀₂/T₀ = 1.2 and p₀₂/p₀ = 1.2^3.5 = 1.892929...
        assert_relative_eq!(
            exit.total_temperature.get::<kelvin>(),
            288.15 * 1.2,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            exit.ideal_total_pressure.get::<pascal>(),
            101_325.0 * 1.2_f64.powf(3.5),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            exit.total_pressure.get::<pascal>(),
            0.98 * exit.ideal_total_pressure.get::<pascal>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn static_diffusion_only_applies_recovery() {
        let design = EngineDesign::default();
        let exit = diffuse(
            &sea_level(),
            0.0,
            &design.cold_gas,
            design.inlet_pressure_recovery,
        );

        assert_relative_eq!(exit.total_temperature.get::<kelvin>(), 288.15);
        assert_relative_eq!(exit.total_pressure.get::<pascal>(), 0.98 * 101_325.0);
    }
}
