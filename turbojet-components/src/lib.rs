//! Steady-state cycle model of a single-spool turbojet.
//!
//! The model marches one operating point through the flow path, one module
//! per element:
//!
//! - [`atmosphere`]: ambient conditions from altitude.
//! - [`inlet`], [`compressor`], [`combustor`], [`turbine`], [`nozzle`]:
//!   closed-form component relations, each returning the state at its exit.
//! - [`cycle`]: the solver tying the components together.
//!
//! Around the solver:
//!
//! - [`design`]: the fixed engine design point and its validation.
//! - [`station`]: station numbering and reported station states.
//! - [`throttle`]: throttle position to turbine-inlet temperature.
//! - [`sweep`]: lazy Mach and throttle sweeps.
//!
//! # Example
//!
//! ```
//! use turbojet_components::{FlightInputs, solve};
//! use uom::si::{f64::*, force::newton, length::foot, thermodynamic_temperature::kelvin};
//!
//! let result = solve(FlightInputs::new(
//!     Length::new::<foot>(35_000.0),
//!     0.85,
//!     ThermodynamicTemperature::new::<kelvin>(1400.0),
//! ));
//!
//! assert!(result.performance.net_thrust.get::<newton>() > 0.0);
//! assert!(result.performance.tsfc.defined().is_some());
//! ```

pub mod atmosphere;
pub mod combustor;
pub mod compressor;
pub mod cycle;
pub mod design;
pub mod inlet;
pub mod nozzle;
pub mod shaft;
pub mod station;
pub mod sweep;
pub mod throttle;
pub mod turbine;

pub use atmosphere::{Atmosphere, AtmosphereState, StandardAtmosphere};
pub use combustor::CombustionRegime;
pub use cycle::{CycleResult, FlightInputs, Performance, ShaftBalance, Tsfc, Turbojet, solve};
pub use design::{DesignError, EngineDesign};
pub use shaft::ShaftPower;
pub use station::{Station, StationId, Stations};
pub use sweep::{SweepError, SweepPoint, SweepRange};
pub use throttle::{ThrottleError, ThrottleMap};
