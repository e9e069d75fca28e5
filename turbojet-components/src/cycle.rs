//! Steady-state cycle solver.
//!
//! [`Turbojet::solve`] marches one operating point through the flow path:
//!
//! 1. Ambient conditions from the [`Atmosphere`].
//! 2. Freestream capture and inlet diffusion ([`inlet`]).
//! 3. Compression ([`compressor`]).
//! 4. Combustion to the commanded turbine-inlet temperature ([`combustor`]).
//! 5. Expansion through the turbine, which delivers exactly the compressor
//!    power ([`turbine`]).
//! 6. Expansion through the nozzle to ambient pressure ([`nozzle`]).
//! 7. Thrust, fuel consumption and cumulative station entropy.
//!
//! Solving never fails. Operating points that are physically meaningless
//! (no flow, unreachable turbine-inlet temperature, negative thrust) still
//! produce finite results, flagged through [`CombustionRegime`],
//! [`Performance::nozzle_clamped`] and [`Tsfc::Undefined`].

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use turbojet_thermo::units::SpecificEntropy;
use uom::si::{
    f64::{Force, Length, MassRate, Ratio, ThermodynamicTemperature, Velocity},
    force::{kilonewton, newton},
    mass_rate::{gram_per_second, kilogram_per_second},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    velocity::meter_per_second,
};

use crate::{
    atmosphere::{Atmosphere, AtmosphereState, StandardAtmosphere},
    combustor::{self, CombustionRegime, Fuel},
    compressor,
    design::{DesignError, EngineDesign},
    inlet, nozzle,
    shaft::ShaftPower,
    station::{Station, Stations},
    turbine,
};

/// Caller-supplied operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightInputs {
    /// Geopotential altitude; may be negative.
    pub altitude: Length,

    /// Flight Mach number. Negative values are treated as zero flight speed.
    pub mach: f64,

    /// Commanded turbine-inlet total temperature (`T₀₄`).
    pub turbine_inlet_temperature: ThermodynamicTemperature,
}

impl FlightInputs {
    #[must_use]
    pub fn new(
        altitude: Length,
        mach: f64,
        turbine_inlet_temperature: ThermodynamicTemperature,
    ) -> Self {
        Self {
            altitude,
            mach,
            turbine_inlet_temperature,
        }
    }
}

/// Thrust-specific fuel consumption, in g/(kN·s).
///
/// Undefined when the net thrust is too close to zero to divide by.
/// A negative value is reported as computed when net thrust is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Tsfc {
    Defined(f64),
    Undefined,
}

impl Tsfc {
    /// Value reported by [`Tsfc::value`] for an undefined TSFC, g/(kN·s).
    pub const SENTINEL: f64 = 1.0e6;

    /// Smallest net thrust magnitude, kN, for which TSFC is defined.
    pub const MIN_NET_THRUST_KN: f64 = 1.0e-6;

    /// Computes TSFC from the fuel flow and the net thrust.
    #[must_use]
    pub fn from_flows(fuel_mass_rate: MassRate, net_thrust: Force) -> Self {
        let thrust_kn = net_thrust.get::<kilonewton>();
        if thrust_kn.abs() > Self::MIN_NET_THRUST_KN {
            Self::Defined(fuel_mass_rate.get::<gram_per_second>() / thrust_kn)
        } else {
            Self::Undefined
        }
    }

    /// TSFC in g/(kN·s), or [`Tsfc::SENTINEL`] when undefined.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Defined(value) => value,
            Self::Undefined => Self::SENTINEL,
        }
    }

    /// TSFC in g/(kN·s) if defined.
    #[must_use]
    pub fn defined(self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for Tsfc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(value) => write!(f, "{value:.3} g/(kN·s)"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// Thrust and fuel figures for one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Performance {
    /// Gross thrust minus ram drag.
    pub net_thrust: Force,

    /// Momentum flux of the nozzle exit flow.
    pub gross_thrust: Force,

    /// Momentum flux of the captured freestream.
    pub ram_drag: Force,

    pub tsfc: Tsfc,

    pub air_mass_rate: MassRate,
    pub fuel_mass_rate: MassRate,
    pub fuel_air_ratio: Ratio,
    pub combustion: CombustionRegime,

    /// Freestream (flight) velocity.
    pub flight_velocity: Velocity,

    /// Nozzle exit velocity (station 8).
    pub exit_velocity: Velocity,

    /// Nozzle exit static temperature (station 8).
    pub exit_temperature: ThermodynamicTemperature,

    /// Whether the nozzle exit temperature was clamped.
    pub nozzle_clamped: bool,
}

/// Power on the shaft, as absorbed by the compressor and delivered by the turbine.
///
/// The two are equal by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaftBalance {
    pub compressor: ShaftPower,
    pub turbine: ShaftPower,
}

/// Everything computed for one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleResult {
    pub inputs: FlightInputs,
    pub ambient: AtmosphereState,
    pub performance: Performance,
    pub stations: Stations,
    pub shaft: ShaftBalance,

    /// Design point the result was computed with.
    pub design: EngineDesign,
}

impl CycleResult {
    /// Closed temperature–entropy polygon through stations 2, 3, 4, 5 and back to 2.
    ///
    /// Each point is `(entropy, temperature)`.
    #[must_use]
    pub fn temperature_entropy_loop(&self) -> [(SpecificEntropy, ThermodynamicTemperature); 5] {
        let Stations {
            inlet_exit,
            compressor_exit,
            combustor_exit,
            turbine_exit,
            ..
        } = &self.stations;

        [inlet_exit, compressor_exit, combustor_exit, turbine_exit, inlet_exit]
            .map(|station| (station.entropy, station.temperature))
    }
}

/// A single-spool turbojet at a fixed design point.
///
/// The atmosphere is a type parameter so alternative ambient models can be
/// swapped in; it defaults to the [`StandardAtmosphere`].
#[derive(Debug, Clone, PartialEq)]
pub struct Turbojet<A = StandardAtmosphere> {
    design: EngineDesign,
    atmosphere: A,
}

impl Turbojet<StandardAtmosphere> {
    /// Creates a turbojet in the standard atmosphere.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignError`] if the design fails [`EngineDesign::validate`].
    pub fn new(design: EngineDesign) -> Result<Self, DesignError> {
        Self::with_atmosphere(design, StandardAtmosphere)
    }
}

impl Default for Turbojet<StandardAtmosphere> {
    /// The reference engine in the standard atmosphere.
    fn default() -> Self {
        Self {
            design: EngineDesign::default(),
            atmosphere: StandardAtmosphere,
        }
    }
}

impl<A: Atmosphere> Turbojet<A> {
    /// Creates a turbojet that takes ambient conditions from `atmosphere`.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignError`] if the design fails [`EngineDesign::validate`].
    pub fn with_atmosphere(design: EngineDesign, atmosphere: A) -> Result<Self, DesignError> {
        design.validate()?;
        Ok(Self { design, atmosphere })
    }

    #[must_use]
    pub fn design(&self) -> &EngineDesign {
        &self.design
    }

    #[must_use]
    pub fn atmosphere(&self) -> &A {
        &self.atmosphere
    }

    /// Solves the cycle at one operating point.
    #[must_use]
    pub fn solve(&self, inputs: FlightInputs) -> CycleResult {
        let design = &self.design;
        let cold = &design.cold_gas;
        let hot = &design.hot_gas;

        let ambient = self.atmosphere.evaluate(inputs.altitude);

        let freestream = inlet::capture(&ambient, inputs.mach, cold, design.inlet_area);
        let inlet_exit = inlet::diffuse(
            &ambient,
            inputs.mach,
            cold,
            design.inlet_pressure_recovery,
        );
        let m_air = freestream.air_mass_rate;

        let compressor_exit = compressor::compress(
            &inlet_exit,
            m_air,
            cold,
            design.compressor_pressure_ratio,
            design.compressor_efficiency,
        );

        let combustor_exit = combustor::burn(
            &compressor_exit,
            m_air,
            inputs.turbine_inlet_temperature,
            Fuel {
                cold_gas: cold,
                hot_gas: hot,
                heating_value: design.fuel_heating_value,
                efficiency: design.combustor_efficiency,
                pressure_ratio: design.combustor_pressure_ratio,
            },
        );

        let turbine_exit = turbine::expand(
            &combustor_exit,
            compressor_exit.power,
            hot,
            design.turbine_efficiency,
        );

        let nozzle_exit = nozzle::expand(
            &turbine_exit,
            ambient.pressure,
            hot,
            design.nozzle_efficiency,
        );

        let m_hot = combustor_exit.hot_mass_rate.get::<kilogram_per_second>();
        let gross = m_hot * nozzle_exit.velocity.get::<meter_per_second>();
        let ram = m_air.get::<kilogram_per_second>()
            * freestream.velocity.get::<meter_per_second>();
        let net_thrust = Force::new::<newton>(gross - ram);

        let tsfc = Tsfc::from_flows(combustor_exit.fuel_mass_rate, net_thrust);
        if tsfc.is_undefined() {
            debug!("net thrust {net_thrust:?} is negligible, TSFC undefined");
        }

        let freestream_station = Station {
            temperature: ambient.temperature,
            pressure: ambient.pressure,
            entropy: SpecificEntropy::new::<joule_per_kilogram_kelvin>(0.0),
        };
        let inlet_station = Station {
            temperature: inlet_exit.total_temperature,
            pressure: inlet_exit.total_pressure,
            entropy: freestream_station.entropy + cold.entropy_change(
                (freestream_station.temperature, freestream_station.pressure),
                (inlet_exit.total_temperature, inlet_exit.total_pressure),
            ),
        };
        let compressor_station = Station {
            temperature: compressor_exit.total_temperature,
            pressure: compressor_exit.total_pressure,
            entropy: inlet_station.entropy + cold.entropy_change(
                (inlet_station.temperature, inlet_station.pressure),
                (compressor_exit.total_temperature, compressor_exit.total_pressure),
            ),
        };
        let combustor_station = Station {
            temperature: combustor_exit.total_temperature,
            pressure: combustor_exit.total_pressure,
            entropy: compressor_station.entropy + cold.entropy_change(
                (compressor_station.temperature, compressor_station.pressure),
                (combustor_exit.total_temperature, combustor_exit.total_pressure),
            ),
        };
        let turbine_station = Station {
            temperature: turbine_exit.total_temperature,
            pressure: turbine_exit.total_pressure,
            entropy: combustor_station.entropy + hot.entropy_change(
                (combustor_station.temperature, combustor_station.pressure),
                (turbine_exit.total_temperature, turbine_exit.total_pressure),
            ),
        };

        let result = CycleResult {
            inputs,
            ambient,
            performance: Performance {
                net_thrust,
                gross_thrust: Force::new::<newton>(gross),
                ram_drag: Force::new::<newton>(ram),
                tsfc,
                air_mass_rate: m_air,
                fuel_mass_rate: combustor_exit.fuel_mass_rate,
                fuel_air_ratio: combustor_exit.fuel_air_ratio,
                combustion: combustor_exit.regime,
                flight_velocity: freestream.velocity,
                exit_velocity: nozzle_exit.velocity,
                exit_temperature: nozzle_exit.temperature,
                nozzle_clamped: nozzle_exit.clamped,
            },
            stations: Stations {
                freestream: freestream_station,
                inlet_exit: inlet_station,
                compressor_exit: compressor_station,
                combustor_exit: combustor_station,
                turbine_exit: turbine_station,
            },
            shaft: ShaftBalance {
                compressor: compressor_exit.power,
                turbine: turbine_exit.power,
            },
            design: *design,
        };

        trace!(
            "solved {inputs:?}: net thrust {:.1} N, TSFC {}, stations {:?}",
            result.performance.net_thrust.get::<newton>(),
            result.performance.tsfc,
            result.stations,
        );

        result
    }
}

/// Solves the reference engine in the standard atmosphere.
#[must_use]
pub fn solve(inputs: FlightInputs) -> CycleResult {
    Turbojet::default().solve(inputs)
}
