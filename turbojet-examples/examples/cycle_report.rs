//! Solves one operating point and prints the station table and performance.
//!
//! ```text
//! cargo run -p turbojet-examples --example cycle_report -- --altitude-ft 35000 --mach 0.85 --t4 1400
//! cargo run -p turbojet-examples --example cycle_report -- --throttle 60 --design engine.toml
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;
use turbojet_components::{FlightInputs, ThrottleMap, Turbojet};
use turbojet_examples::{init_logging, load_design};
use uom::si::{
    f64::{Length, Ratio, ThermodynamicTemperature},
    force::newton,
    length::foot,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    power::megawatt,
    pressure::kilopascal,
    ratio::{percent, ratio},
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Altitude in feet.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    altitude_ft: f64,

    /// Flight Mach number.
    #[arg(short, long, default_value_t = 0.5)]
    mach: f64,

    /// Turbine-inlet temperature in kelvin.
    #[arg(long, conflicts_with = "throttle")]
    t4: Option<f64>,

    /// Throttle position in percent, mapped between 800 K and 1800 K.
    #[arg(short, long)]
    throttle: Option<f64>,

    /// Engine design TOML file; omitted fields use the reference engine.
    #[arg(short, long)]
    design: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let engine = Turbojet::new(load_design(args.design.as_deref())?)?;

    let t4 = match (args.t4, args.throttle) {
        (Some(t4), _) => ThermodynamicTemperature::new::<kelvin>(t4),
        (None, Some(position)) => {
            ThrottleMap::default().turbine_inlet_temperature(Ratio::new::<percent>(position))
        }
        (None, None) => ThermodynamicTemperature::new::<kelvin>(1200.0),
    };

    let inputs = FlightInputs::new(Length::new::<foot>(args.altitude_ft), args.mach, t4);
    info!("Solving {inputs:?}");

    let result = engine.solve(inputs);
    let ambient = &result.ambient;
    let perf = &result.performance;

    println!(
        "Ambient: p = {:.3} kPa, T = {:.2} K, rho = {:.4} kg/m^3",
        ambient.pressure.get::<kilopascal>(),
        ambient.temperature.get::<kelvin>(),
        ambient.density.get::<kilogram_per_cubic_meter>(),
    );
    println!();
    println!("{:>8} {:>10} {:>12} {:>12}", "station", "T [K]", "P [kPa]", "S [J/kg/K]");
    for (id, station) in result.stations.iter() {
        println!(
            "{:>8} {:>10.2} {:>12.3} {:>12.3}",
            id,
            station.temperature.get::<kelvin>(),
            station.pressure.get::<kilopascal>(),
            station.entropy.get::<joule_per_kilogram_kelvin>(),
        );
    }
    println!();
    println!("Net thrust:       {:.1} N", perf.net_thrust.get::<newton>());
    println!("Gross thrust:     {:.1} N", perf.gross_thrust.get::<newton>());
    println!("Ram drag:         {:.1} N", perf.ram_drag.get::<newton>());
    println!("TSFC:             {}", perf.tsfc);
    println!("Air flow:         {:.3} kg/s", perf.air_mass_rate.get::<kilogram_per_second>());
    println!("Fuel flow:        {:.4} kg/s", perf.fuel_mass_rate.get::<kilogram_per_second>());
    println!("Fuel-air ratio:   {:.5}", perf.fuel_air_ratio.get::<ratio>());
    println!("Combustion:       {:?}", perf.combustion);
    println!("Flight velocity:  {:.1} m/s", perf.flight_velocity.get::<meter_per_second>());
    println!("Exit velocity:    {:.1} m/s", perf.exit_velocity.get::<meter_per_second>());
    println!("Exit temperature: {:.1} K", perf.exit_temperature.get::<kelvin>());
    println!("Shaft power:      {:.3} MW", result.shaft.compressor.quantity().get::<megawatt>());
    println!();
    println!("T-s loop (2-3-4-5-2):");
    for (entropy, temperature) in result.temperature_entropy_loop() {
        println!(
            "  S = {:>9.2} J/kg/K, T = {:>8.2} K",
            entropy.get::<joule_per_kilogram_kelvin>(),
            temperature.get::<kelvin>(),
        );
    }

    Ok(())
}
