//! Thermodynamic stations along the engine flow path.
//!
//! Stations follow the usual turbojet numbering: `0` is the undisturbed
//! freestream, `2` the inlet exit, `3` the compressor exit, `4` the combustor
//! exit (turbine inlet), and `5` the turbine exit. The nozzle exit (`8`) is
//! reported with the performance figures instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use turbojet_thermo::units::SpecificEntropy;
use uom::si::f64::{Pressure, ThermodynamicTemperature};

/// Identifies a reported station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StationId {
    Freestream,
    InletExit,
    CompressorExit,
    CombustorExit,
    TurbineExit,
}

impl StationId {
    /// All reported stations in flow-path order.
    pub const ALL: [StationId; 5] = [
        StationId::Freestream,
        StationId::InletExit,
        StationId::CompressorExit,
        StationId::CombustorExit,
        StationId::TurbineExit,
    ];

    /// Conventional station number.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Freestream => 0,
            Self::InletExit => 2,
            Self::CompressorExit => 3,
            Self::CombustorExit => 4,
            Self::TurbineExit => 5,
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Thermodynamic state at one station.
///
/// Temperature and pressure are total (stagnation) values, except at the
/// freestream station where they are the ambient static values.
/// Entropy is relative to the freestream, accumulated along the actual path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub entropy: SpecificEntropy,
}

/// The ordered set of reported stations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stations {
    pub freestream: Station,
    pub inlet_exit: Station,
    pub compressor_exit: Station,
    pub combustor_exit: Station,
    pub turbine_exit: Station,
}

impl Stations {
    /// Returns the station with the given identifier.
    #[must_use]
    pub fn get(&self, id: StationId) -> &Station {
        match id {
            StationId::Freestream => &self.freestream,
            StationId::InletExit => &self.inlet_exit,
            StationId::CompressorExit => &self.compressor_exit,
            StationId::CombustorExit => &self.combustor_exit,
            StationId::TurbineExit => &self.turbine_exit,
        }
    }

    /// Iterates over the stations in flow-path order.
    pub fn iter(&self) -> impl Iterator<Item = (StationId, &Station)> {
        StationId::ALL
            .into_iter()
            .map(move |id| (id, self.get(id)))
    }
}
