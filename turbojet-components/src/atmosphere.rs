//! Ambient conditions as a function of altitude.
//!
//! [`StandardAtmosphere`] is the two-layer International Standard Atmosphere:
//! a constant-lapse-rate troposphere up to 11 km and an isothermal layer
//! above it. Only the troposphere and lower stratosphere are modeled.
//! Altitudes beyond the isothermal layer still evaluate without error, but
//! the result is an extrapolation of that layer and not physically meaningful.

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Length, MassDensity, Pressure, ThermodynamicTemperature},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

/// Sea-level standard temperature, K.
const SEA_LEVEL_TEMPERATURE: f64 = 288.15;

/// Sea-level standard pressure, Pa.
const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

/// Standard gravitational acceleration, m/s².
const STANDARD_GRAVITY: f64 = 9.806_65;

/// Specific gas constant for dry air used by the atmosphere, J/(kg·K).
///
/// The cycle model uses its own rounded value; the two are kept separate.
const DRY_AIR_GAS_CONSTANT: f64 = 287.058;

/// Troposphere temperature lapse rate, K/m.
const TROPOSPHERE_LAPSE_RATE: f64 = -0.0065;

/// Geopotential altitude of the tropopause, m.
const TROPOPAUSE_ALTITUDE: f64 = 11_000.0;

/// Temperature of the isothermal layer above the tropopause, K.
const TROPOPAUSE_TEMPERATURE: f64 = 216.65;

/// Pressure at the tropopause, Pa.
const TROPOPAUSE_PRESSURE: f64 = 22_632.1;

/// Ambient static conditions at an altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereState {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
}

/// A model of ambient conditions as a function of altitude.
///
/// The cycle solver queries its atmosphere exactly once per solve.
/// Implementations must be pure: the same altitude always yields the same state.
pub trait Atmosphere {
    /// Returns the ambient state at the given altitude.
    fn evaluate(&self, altitude: Length) -> AtmosphereState;
}

/// The two-layer International Standard Atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StandardAtmosphere;

impl StandardAtmosphere {
    /// Temperature and pressure in the constant-lapse-rate troposphere.
    fn troposphere(altitude_m: f64) -> (f64, f64) {
        let temperature = SEA_LEVEL_TEMPERATURE + TROPOSPHERE_LAPSE_RATE * altitude_m;
        let exponent = -STANDARD_GRAVITY / (TROPOSPHERE_LAPSE_RATE * DRY_AIR_GAS_CONSTANT);
        let pressure = SEA_LEVEL_PRESSURE * (temperature / SEA_LEVEL_TEMPERATURE).powf(exponent);
        (temperature, pressure)
    }

    /// Temperature and pressure in the isothermal layer above the tropopause.
    fn stratosphere(altitude_m: f64) -> (f64, f64) {
        let temperature = TROPOPAUSE_TEMPERATURE;
        let pressure = TROPOPAUSE_PRESSURE
            * (-STANDARD_GRAVITY * (altitude_m - TROPOPAUSE_ALTITUDE)
                / (DRY_AIR_GAS_CONSTANT * temperature))
                .exp();
        (temperature, pressure)
    }
}

impl Atmosphere for StandardAtmosphere {
    fn evaluate(&self, altitude: Length) -> AtmosphereState {
        let altitude_m = altitude.get::<meter>();

        let (temperature, pressure) = if altitude_m <= TROPOPAUSE_ALTITUDE {
            Self::troposphere(altitude_m)
        } else {
            Self::stratosphere(altitude_m)
        };

        let density = pressure / (DRY_AIR_GAS_CONSTANT * temperature);

        AtmosphereState {
            pressure: Pressure::new::<pascal>(pressure),
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            density: MassDensity::new::<kilogram_per_cubic_meter>(density),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::length::foot;

    fn at_feet(altitude_ft: f64) -> AtmosphereState {
        StandardAtmosphere.evaluate(Length::new::<foot>(altitude_ft))
    }

    #[test]
    fn sea_level_matches_standard_values() {
        let state = at_feet(0.0);

        assert_relative_eq!(state.pressure.get::<pascal>(), 101_325.0);
        assert_relative_eq!(state.temperature.get::<kelvin>(), 288.15);
        assert_relative_eq!(
            state.density.get::<kilogram_per_cubic_meter>(),
            1.225,
            epsilon = 1e-4
        );
    }

    #[test]
    fn layers_agree_at_the_tropopause() {
        let (t_low, p_low) = StandardAtmosphere::troposphere(TROPOPAUSE_ALTITUDE);
        let (t_high, p_high) = StandardAtmosphere::stratosphere(TROPOPAUSE_ALTITUDE);

        assert_relative_eq!(t_low, 216.65, epsilon = 1e-9);
        assert_relative_eq!(t_low, t_high, epsilon = 1e-9);

        // The rounded tropopause pressure differs from the lapse-rate result by ~0.55 Pa.
        assert_relative_eq!(p_low, p_high, max_relative = 1e-4);
    }

    #[test]
    fn tropopause_in_feet_is_continuous() {
        let state = at_feet(TROPOPAUSE_ALTITUDE / 0.3048);
        let just_below = at_feet(TROPOPAUSE_ALTITUDE / 0.3048 - 1e-6);
        let just_above = at_feet(TROPOPAUSE_ALTITUDE / 0.3048 + 1e-6);

        assert_relative_eq!(state.temperature.get::<kelvin>(), 216.65, epsilon = 1e-9);
        assert_relative_eq!(
            just_below.pressure.get::<pascal>(),
            just_above.pressure.get::<pascal>(),
            max_relative = 1e-4
        );
        assert_relative_eq!(
            just_below.temperature.get::<kelvin>(),
            just_above.temperature.get::<kelvin>(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn stratosphere_is_isothermal() {
        let low = at_feet(40_000.0);
        let high = at_feet(60_000.0);

        assert_relative_eq!(low.temperature.get::<kelvin>(), 216.65);
        assert_relative_eq!(high.temperature.get::<kelvin>(), 216.65);
        assert!(high.pressure < low.pressure);
    }

    #[test]
    fn pressure_and_density_decrease_with_altitude() {
        let states: Vec<_> = (0..=100)
            .map(|i| at_feet(f64::from(i) * 500.0))
            .collect();

        for pair in states.windows(2) {
            assert!(pair[1].pressure < pair[0].pressure);
            assert!(pair[1].density < pair[0].density);
        }
    }

    #[test]
    fn below_sea_level_is_warmer_and_denser() {
        let below = at_feet(-1_000.0);
        let sea = at_feet(0.0);

        assert!(below.temperature > sea.temperature);
        assert!(below.pressure > sea.pressure);
        assert!(below.density > sea.density);
    }
}
