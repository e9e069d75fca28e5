//! Parameter sweeps.
//!
//! A [`SweepRange`] is a finite, evenly spaced set of parameter values. It is
//! `Copy`, so the same range can be iterated any number of times, and its
//! iterator knows its exact length. Sweeps over a [`Turbojet`] are lazy:
//! each point is solved only when the iterator reaches it.
//!
//! Every point is independent, so a sweep can be split across threads by
//! partitioning [`SweepRange::values`] (see [`SweepValues::nth`] and
//! [`Iterator::step_by`]).

use std::iter::FusedIterator;

use thiserror::Error;
use uom::si::{
    f64::{Length, Ratio, ThermodynamicTemperature},
    ratio::percent,
};

use crate::{
    atmosphere::Atmosphere,
    cycle::{CycleResult, FlightInputs, Turbojet},
    throttle::ThrottleMap,
};

/// Tolerance, in steps, for including the end of a range.
pub const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Largest number of points a [`SweepRange`] may hold.
pub const MAX_POINTS: usize = 1_000_000;

/// Errors reported by [`SweepRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SweepError {
    #[error("sweep bounds must be finite (got {start} to {end})")]
    NonFiniteBound { start: f64, end: f64 },

    #[error("sweep step must be positive and finite (got {0})")]
    Step(f64),

    #[error("sweep end {end} is before its start {start}")]
    Reversed { start: f64, end: f64 },

    #[error("sweep would have more than {max} points", max = MAX_POINTS)]
    TooManyPoints,
}

/// An evenly spaced, inclusive range of parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    start: f64,
    step: f64,
    len: usize,
}

impl SweepRange {
    /// Creates the range `start, start + step, …` up to and including `end`.
    ///
    /// `end` is included when it lies within [`ENDPOINT_TOLERANCE`] steps of
    /// a grid point, so `0.0..=2.5` in steps of `0.05` has 51 points despite
    /// rounding in `2.5 / 0.05`.
    ///
    /// # Errors
    ///
    /// Returns a [`SweepError`] if a bound is not finite, `step` is not
    /// strictly positive and finite, `end < start`, or the range would have
    /// more than [`MAX_POINTS`] points.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, SweepError> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(SweepError::NonFiniteBound { start, end });
        }
        if !(step > 0.0 && step.is_finite()) {
            return Err(SweepError::Step(step));
        }
        if end < start {
            return Err(SweepError::Reversed { start, end });
        }

        let intervals = ((end - start) / step + ENDPOINT_TOLERANCE).floor();
        if intervals >= MAX_POINTS as f64 {
            return Err(SweepError::TooManyPoints);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = intervals as usize + 1;

        Ok(Self { start, step, len })
    }

    /// Flight Mach numbers from 0 to 2.5 in steps of 0.05.
    #[must_use]
    pub fn mach() -> Self {
        Self {
            start: 0.0,
            step: 0.05,
            len: 51,
        }
    }

    /// Throttle positions from 0 to 100 percent in steps of 2 percent.
    #[must_use]
    pub fn throttle_percent() -> Self {
        Self {
            start: 0.0,
            step: 2.0,
            len: 51,
        }
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of points, always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; a range holds at least its start.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value of the `index`-th point.
    #[must_use]
    pub fn value(&self, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let index = index as f64;
        self.start + index * self.step
    }

    /// Iterates over the values of the range.
    #[must_use]
    pub fn values(&self) -> SweepValues {
        SweepValues {
            range: *self,
            front: 0,
            back: self.len,
        }
    }
}

impl IntoIterator for SweepRange {
    type Item = f64;
    type IntoIter = SweepValues;

    fn into_iter(self) -> SweepValues {
        self.values()
    }
}

/// Iterator over the values of a [`SweepRange`].
#[derive(Debug, Clone)]
pub struct SweepValues {
    range: SweepRange,
    front: usize,
    back: usize,
}

impl Iterator for SweepValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front < self.back {
            let value = self.range.value(self.front);
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<f64> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for SweepValues {
    fn next_back(&mut self) -> Option<f64> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.range.value(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for SweepValues {}

impl FusedIterator for SweepValues {}

/// One solved point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Swept parameter value (Mach number or throttle percent).
    pub parameter: f64,
    pub result: CycleResult,
}

impl<A: Atmosphere> Turbojet<A> {
    /// Solves each Mach number of `range` at a fixed altitude and turbine-inlet temperature.
    pub fn mach_sweep(
        &self,
        altitude: Length,
        turbine_inlet_temperature: ThermodynamicTemperature,
        range: SweepRange,
    ) -> impl ExactSizeIterator<Item = SweepPoint> + Clone {
        range.values().map(move |mach| SweepPoint {
            parameter: mach,
            result: self.solve(FlightInputs::new(altitude, mach, turbine_inlet_temperature)),
        })
    }

    /// Solves each throttle position of `range`, in percent, at a fixed altitude and Mach number.
    ///
    /// Positions are mapped to turbine-inlet temperatures through `throttle`.
    pub fn throttle_sweep(
        &self,
        altitude: Length,
        mach: f64,
        throttle: ThrottleMap,
        range: SweepRange,
    ) -> impl ExactSizeIterator<Item = SweepPoint> + Clone {
        range.values().map(move |position| {
            let t4 = throttle.turbine_inlet_temperature(Ratio::new::<percent>(position));
            SweepPoint {
                parameter: position,
                result: self.solve(FlightInputs::new(altitude, mach, t4)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        length::foot, mass_rate::kilogram_per_second, thermodynamic_temperature::kelvin,
    };

    #[test]
    fn includes_endpoint_despite_rounding() {
        let range = SweepRange::new(0.0, 2.5, 0.05).unwrap();

        assert_eq!(range, SweepRange::mach());
        assert_eq!(range.len(), 51);
        assert_relative_eq!(range.values().last().unwrap(), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn default_throttle_range() {
        let values: Vec<f64> = SweepRange::throttle_percent().into_iter().collect();

        assert_eq!(values.len(), 51);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[25], 50.0);
        assert_eq!(values[50], 100.0);
        assert_eq!(SweepRange::new(0.0, 100.0, 2.0), Ok(SweepRange::throttle_percent()));
    }

    #[test]
    fn end_between_grid_points_is_excluded() {
        let range = SweepRange::new(0.0, 1.0, 0.3).unwrap();
        let values: Vec<f64> = range.values().collect();

        assert_eq!(values.len(), 4);
        assert_relative_eq!(values[3], 0.9, epsilon = 1e-12);
    }

    #[test]
    fn single_point_range() {
        let range = SweepRange::new(0.8, 0.8, 0.1).unwrap();
        assert_eq!(range.values().collect::<Vec<_>>(), vec![0.8]);
    }

    #[test]
    fn rejects_invalid_ranges() {
        assert_eq!(SweepRange::new(0.0, 1.0, 0.0), Err(SweepError::Step(0.0)));
        assert_eq!(
            SweepRange::new(1.0, 0.0, 0.1),
            Err(SweepError::Reversed {
                start: 1.0,
                end: 0.0
            })
        );
        assert!(matches!(
            SweepRange::new(0.0, f64::INFINITY, 0.1),
            Err(SweepError::NonFiniteBound { .. })
        ));
        assert_eq!(
            SweepRange::new(0.0, 1.0, 1e-12),
            Err(SweepError::TooManyPoints)
        );
    }

    #[test]
    fn values_are_restartable_and_double_ended() {
        let range = SweepRange::mach();
        let mut values = range.values();

        assert_eq!(values.len(), 51);
        assert_eq!(values.next(), Some(0.0));
        assert_relative_eq!(values.next_back().unwrap(), 2.5, epsilon = 1e-12);
        assert_eq!(values.len(), 49);
        assert_relative_eq!(values.nth(1).unwrap(), 0.1, epsilon = 1e-12);

        assert_eq!(range.values().count(), 51);
        assert_eq!(values.nth(1_000), None);
        assert_eq!(values.next(), None);
    }

    #[test]
    fn mach_sweep_is_lazy_and_ordered() {
        let engine = Turbojet::default();
        let sweep = engine.mach_sweep(
            Length::new::<foot>(20_000.0),
            ThermodynamicTemperature::new::<kelvin>(1300.0),
            SweepRange::new(0.0, 1.0, 0.25).unwrap(),
        );

        assert_eq!(sweep.len(), 5);

        let points: Vec<SweepPoint> = sweep.collect();
        for (point, mach) in points.iter().zip([0.0, 0.25, 0.5, 0.75, 1.0]) {
            assert_relative_eq!(point.parameter, mach);
            assert_relative_eq!(point.result.inputs.mach, mach);
        }
    }

    #[test]
    fn throttle_sweep_maps_positions_to_temperature() {
        let engine = Turbojet::default();
        let points: Vec<SweepPoint> = engine
            .throttle_sweep(
                Length::new::<foot>(0.0),
                0.5,
                ThrottleMap::default(),
                SweepRange::new(0.0, 100.0, 50.0).unwrap(),
            )
            .collect();

        let temperatures: Vec<f64> = points
            .iter()
            .map(|p| p.result.inputs.turbine_inlet_temperature.get::<kelvin>())
            .collect();
        assert_eq!(temperatures.len(), 3);
        assert_relative_eq!(temperatures[0], 800.0);
        assert_relative_eq!(temperatures[1], 1300.0, epsilon = 1e-9);
        assert_relative_eq!(temperatures[2], 1800.0, epsilon = 1e-9);

        let fuel: Vec<f64> = points
            .iter()
            .map(|p| p.result.performance.fuel_mass_rate.get::<kilogram_per_second>())
            .collect();
        assert!(fuel.windows(2).all(|pair| pair[1] > pair[0]));
    }
}
