//! Prints a Mach sweep and a throttle sweep, solving the points in parallel.
//!
//! ```text
//! cargo run -p turbojet-examples --example sweep -- --altitude-ft 35000 --t4 1400 --mach 0.85
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use turbojet_components::{FlightInputs, SweepRange, ThrottleMap, Turbojet};
use turbojet_examples::{init_logging, load_design, solve_parallel};
use uom::si::{
    f64::{Length, Ratio, ThermodynamicTemperature},
    force::kilonewton,
    length::foot,
    mass_rate::kilogram_per_second,
    ratio::percent,
    thermodynamic_temperature::kelvin,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Altitude in feet.
    #[arg(short, long, default_value_t = 35_000.0, allow_negative_numbers = true)]
    altitude_ft: f64,

    /// Turbine-inlet temperature for the Mach sweep, in kelvin.
    #[arg(long, default_value_t = 1400.0)]
    t4: f64,

    /// Flight Mach number for the throttle sweep.
    #[arg(short, long, default_value_t = 0.85)]
    mach: f64,

    /// Idle turbine-inlet temperature, in kelvin.
    #[arg(long, default_value_t = 800.0)]
    t4_min: f64,

    /// Full-throttle turbine-inlet temperature, in kelvin.
    #[arg(long, default_value_t = 1800.0)]
    t4_max: f64,

    /// Number of worker threads (defaults to the available parallelism).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Engine design TOML file; omitted fields use the reference engine.
    #[arg(short, long)]
    design: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let engine = Turbojet::new(load_design(args.design.as_deref())?)?;
    let altitude = Length::new::<foot>(args.altitude_ft);
    let throttle = ThrottleMap::new(
        ThermodynamicTemperature::new::<kelvin>(args.t4_min),
        ThermodynamicTemperature::new::<kelvin>(args.t4_max),
    )?;

    let t4 = ThermodynamicTemperature::new::<kelvin>(args.t4);
    let mach_range = SweepRange::mach();
    let mach_points: Vec<FlightInputs> = mach_range
        .values()
        .map(|mach| FlightInputs::new(altitude, mach, t4))
        .collect();

    info!("Mach sweep: {} points at {} ft", mach_points.len(), args.altitude_ft);
    let results = solve_parallel(&engine, &mach_points, args.workers)?;

    println!("{:>6} {:>12} {:>16}", "Mach", "F_net [kN]", "TSFC [g/kN/s]");
    for (mach, result) in mach_range.values().zip(&results) {
        let perf = &result.performance;
        println!(
            "{:>6.2} {:>12.3} {:>16}",
            mach,
            perf.net_thrust.get::<kilonewton>(),
            perf.tsfc.defined().map_or_else(|| "-".to_string(), |v| format!("{v:.3}")),
        );
    }

    let throttle_range = SweepRange::throttle_percent();
    let throttle_points: Vec<FlightInputs> = throttle_range
        .values()
        .map(|position| {
            let t4 = throttle.turbine_inlet_temperature(Ratio::new::<percent>(position));
            FlightInputs::new(altitude, args.mach, t4)
        })
        .collect();

    info!("Throttle sweep: {} points at Mach {}", throttle_points.len(), args.mach);
    let results = solve_parallel(&engine, &throttle_points, args.workers)?;

    println!();
    println!("{:>10} {:>10} {:>14}", "throttle %", "T4 [K]", "fuel [kg/s]");
    for (position, result) in throttle_range.values().zip(&results) {
        println!(
            "{:>10.0} {:>10.1} {:>14.4}",
            position,
            result.inputs.turbine_inlet_temperature.get::<kelvin>(),
            result.performance.fuel_mass_rate.get::<kilogram_per_second>(),
        );
    }

    Ok(())
}
