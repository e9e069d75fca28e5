//! Shared setup for the turbojet example programs.

use std::{
    env, fs,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread::{self, available_parallelism},
};

use anyhow::{Context, Result, anyhow};
use log::info;
use turbojet_components::{Atmosphere, CycleResult, EngineDesign, FlightInputs, Turbojet};

/// Installs the logger, defaulting `RUST_LOG` to `info`.
pub fn init_logging() {
    if env::var("RUST_LOG").is_err() {
        // Called before any other thread is started.
        unsafe { env::set_var("RUST_LOG", "info") }
    }

    pretty_env_logger::init();
}

/// Reads an engine design from a TOML file, or returns the reference design.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, or if the design is invalid.
pub fn load_design(path: Option<&Path>) -> Result<EngineDesign> {
    let Some(path) = path else {
        return Ok(EngineDesign::default());
    };

    info!("Reading engine design from '{}'", path.display());

    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read design file '{}'", path.display()))?;
    let design: EngineDesign = toml::from_str(&text)
        .with_context(|| format!("could not parse design file '{}'", path.display()))?;
    design.validate()?;

    Ok(design)
}

/// Solves every operating point on a pool of worker threads.
///
/// Results are returned in the order of `points`. With `workers` unset the
/// pool uses the available parallelism.
///
/// # Errors
///
/// Fails if a worker thread panics.
pub fn solve_parallel<A>(
    engine: &Turbojet<A>,
    points: &[FlightInputs],
    workers: Option<usize>,
) -> Result<Vec<CycleResult>>
where
    A: Atmosphere + Sync,
{
    let workers = workers
        .or_else(|| available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1)
        .clamp(1, points.len().max(1));

    let next_index = AtomicUsize::new(0);
    let (tx_result, rx_result) = mpsc::channel();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let next_index = &next_index;
                let tx_result = tx_result.clone();
                scope.spawn(move || {
                    loop {
                        let index = next_index.fetch_add(1, Ordering::Relaxed);
                        let Some(&point) = points.get(index) else {
                            break;
                        };
                        if tx_result.send((index, engine.solve(point))).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();
        drop(tx_result);

        let mut results: Vec<Option<CycleResult>> = vec![None; points.len()];
        while let Ok((index, result)) = rx_result.recv() {
            results[index] = Some(result);
        }

        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow!("sweep worker panicked"))?;
        }

        results
            .into_iter()
            .enumerate()
            .map(|(index, result)| result.ok_or_else(|| anyhow!("point {index} was not solved")))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, ThermodynamicTemperature},
        length::foot,
        thermodynamic_temperature::kelvin,
    };

    #[test]
    fn parallel_results_keep_input_order() {
        let engine = Turbojet::default();
        let points: Vec<FlightInputs> = (0..20)
            .map(|i| {
                FlightInputs::new(
                    Length::new::<foot>(1_000.0 * f64::from(i)),
                    0.1 * f64::from(i),
                    ThermodynamicTemperature::new::<kelvin>(1400.0),
                )
            })
            .collect();

        let results = solve_parallel(&engine, &points, Some(3)).unwrap();

        assert_eq!(results.len(), points.len());
        for (point, result) in points.iter().zip(&results) {
            assert_eq!(*result, engine.solve(*point));
        }
    }

    #[test]
    fn empty_input_yields_no_results() {
        let results = solve_parallel(&Turbojet::default(), &[], None).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn missing_design_file_is_an_error() {
        assert!(load_design(Some(Path::new("does/not/exist.toml"))).is_err());
        assert_eq!(load_design(None).unwrap(), EngineDesign::default());
    }

    #[test]
    fn loads_bundled_design() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("designs/high_pressure_ratio.toml");
        let design = load_design(Some(&path)).unwrap();

        assert_ne!(design, EngineDesign::default());
        assert_eq!(design.cold_gas, EngineDesign::default().cold_gas);
        assert!(Turbojet::new(design).is_ok());
    }
}
