use std::cmp::Ordering;
use std::fmt;

use log::{
    debug,
    error,
    trace
};

use crate::function::mathfunction::MathFunction;
use crate::function::sample::Sample;

use super::tabulatedfunctionerror::TabulatedFunctionError;

/// Absolute tolerance for locating a sample by value and for detecting
/// zero-width segments.
pub const VALUE_TOLERANCE: f64 = 1e-10;

pub const MIN_SAMPLES: usize = 1;

pub type SampleIter<'a> = Box<dyn Iterator<Item = Sample> + 'a>;

// ─────────────────────────────────────────────
// TabulatedFunction
// ─────────────────────────────────────────────

/// A piecewise-linear function sampled at strictly increasing x.
///
/// Storage back-ends provide indexed access, bounds, lookups, the floor
/// search and iteration. Interpolation and extrapolation are provided
/// here once for every back-end.
///
/// Every index taken by the contract is checked against `0..count()`.
/// `x` is immutable after construction; `y` may be replaced per index.
pub trait TabulatedFunction: MathFunction + fmt::Debug + fmt::Display {
    fn backend_name(&self) -> &'static str;

    fn count(&self) -> usize;

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError>;

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError>;

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError>;

    fn left_bound(&self) -> f64;

    fn right_bound(&self) -> f64;

    /// First index whose x is within [`VALUE_TOLERANCE`] of `x`.
    fn index_of_x(&self, x: f64) -> Option<usize>;

    /// First index whose y is within [`VALUE_TOLERANCE`] of `y`.
    fn index_of_y(&self, y: f64) -> Option<usize>;

    /// Largest `i` with `x(i) <= x`, clamped to `[0, count - 2]`.
    fn floor_index_of_x(&self, x: f64) -> usize;

    fn iter(&self) -> SampleIter<'_>;

    fn sample(&self, index: usize) -> Result<Sample, TabulatedFunctionError> {
        Ok(Sample::new(self.x(index)?, self.y(index)?))
    }

    fn samples(&self) -> Vec<Sample> {
        self.iter().collect()
    }

    fn evaluate(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        if self.count() == 1 {
            return self.y(0);
        }
        if x < self.left_bound() {
            trace!("x = {} left of {}, extrapolating", x, self.left_bound());
            return self.extrapolate_left(x);
        }
        if x > self.right_bound() {
            trace!("x = {} right of {}, extrapolating", x, self.right_bound());
            return self.extrapolate_right(x);
        }
        let floor_index = self.floor_index_of_x(x);
        self.interpolate(x, floor_index)
    }

    /// Linear interpolation on the segment starting at `floor_index`.
    ///
    /// Fails with `InterpolationRange` when `x` is not inside
    /// `[x(floor_index), x(floor_index + 1)]`.
    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        if floor_index >= self.count().saturating_sub(1) {
            error!("floor index {} has no right neighbour (count {})", floor_index, self.count());
            return Err(TabulatedFunctionError::InterpolationRange {
                x,
                floor_index,
                left: self.left_bound(),
                right: self.right_bound(),
            });
        }
        let lhs = self.sample(floor_index)?;
        let rhs = self.sample(floor_index + 1)?;
        if x < lhs.x() || x > rhs.x() {
            error!("x = {} outside segment {} [{}, {}]", x, floor_index, lhs.x(), rhs.x());
            return Err(TabulatedFunctionError::InterpolationRange {
                x,
                floor_index,
                left: lhs.x(),
                right: rhs.x(),
            });
        }
        Ok(linear(x, &lhs, &rhs))
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        if self.count() == 1 {
            return self.y(0);
        }
        Ok(linear(x, &self.sample(0)?, &self.sample(1)?))
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        let count = self.count();
        if count == 1 {
            return self.y(0);
        }
        Ok(linear(x, &self.sample(count - 2)?, &self.sample(count - 1)?))
    }
}

// ─────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────

/// Value of the line through `lhs` and `rhs` at `x`; a segment narrower
/// than [`VALUE_TOLERANCE`] is a flat step at `lhs.y()`.
pub fn linear(x: f64, lhs: &Sample, rhs: &Sample) -> f64 {
    let width = rhs.x() - lhs.x();
    if width.abs() < VALUE_TOLERANCE {
        lhs.y()
    } else {
        lhs.y() + (x - lhs.x()) * (rhs.y() - lhs.y()) / width
    }
}

pub(crate) fn position_within_tolerance<I>(values: I, target: f64) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .position(|value| (value - target).abs() < VALUE_TOLERANCE)
}

/// Left-to-right scan for the first x greater than `x`.
pub(crate) fn floor_index<I>(xs: I, count: usize, x: f64) -> usize
where
    I: IntoIterator<Item = f64>,
{
    let last_segment = count.saturating_sub(2);
    let first_greater = xs.into_iter().position(|xi| xi > x).unwrap_or(count);
    first_greater.saturating_sub(1).min(last_segment)
}

pub(crate) fn check_index(index: usize, count: usize) -> Result<(), TabulatedFunctionError> {
    if index < count {
        Ok(())
    } else {
        error!("index {} out of range (count {})", index, count);
        Err(TabulatedFunctionError::IndexOutOfRange { index, count })
    }
}

pub(crate) fn validate(x_values: &[f64], y_values: &[f64]) -> Result<(), TabulatedFunctionError> {
    if x_values.len() != y_values.len() {
        error!("arrays differ in length: x {}, y {}", x_values.len(), y_values.len());
        return Err(TabulatedFunctionError::UnequalLength {
            x_len: x_values.len(),
            y_len: y_values.len(),
        });
    }
    if x_values.len() < MIN_SAMPLES {
        error!("{} points given, need {}", x_values.len(), MIN_SAMPLES);
        return Err(TabulatedFunctionError::InsufficientPoints {
            got: x_values.len(),
            need: MIN_SAMPLES,
        });
    }
    for (index, pair) in x_values.windows(2).enumerate() {
        if pair[1].partial_cmp(&pair[0]) != Some(Ordering::Greater) {
            error!("x not increasing at index {}: {} <= {}", index + 1, pair[1], pair[0]);
            return Err(TabulatedFunctionError::NonIncreasingX {
                index: index + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

/// Samples `source` at `count` equally spaced knots over `[from, to]`.
///
/// Bounds given in reverse order are swapped; `from == to` repeats the
/// single x `count` times.
pub(crate) fn tabulate<S>(
    source: &S,
    from: f64,
    to: f64,
    count: usize,
) -> Result<(Vec<f64>, Vec<f64>), TabulatedFunctionError>
where
    S: MathFunction + ?Sized,
{
    if count < MIN_SAMPLES {
        error!("cannot tabulate {} points", count);
        return Err(TabulatedFunctionError::InsufficientPoints { got: count, need: MIN_SAMPLES });
    }
    let (from, to) = if from > to {
        debug!("swapping bounds {} and {}", from, to);
        (to, from)
    } else {
        (from, to)
    };

    let x_values: Vec<f64> = if from == to || count == 1 {
        vec![from; count]
    } else {
        let step = (to - from) / (count - 1) as f64;
        (0..count).map(|i| from + i as f64 * step).collect()
    };
    let y_values = x_values.iter().map(|&x| source.apply(x)).collect();
    Ok((x_values, y_values))
}

/// `MathFunction::apply` for tabulated functions.
///
/// `evaluate` only fails if the floor search breaks its own window
/// invariant; that is reported as NaN.
pub(crate) fn apply_or_nan<T>(function: &T, x: f64) -> f64
where
    T: TabulatedFunction + ?Sized,
{
    function.evaluate(x).unwrap_or_else(|err| {
        error!("evaluation at {} failed: {}", x, err);
        f64::NAN
    })
}

/// `<BackendName> size = <count>` followed by one `[x; y]` row per sample.
///
/// Values print with `{:?}`: plain decimals with at least one fractional
/// digit, switching to exponent notation (`1e-5`, `1e16`) when the
/// magnitude is below `1e-4` or at least `1e16`.
pub(crate) fn write_summary<T>(function: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    T: TabulatedFunction + ?Sized,
{
    writeln!(f, "{} size = {}", function.backend_name(), function.count())?;
    for sample in function.iter() {
        writeln!(f, "[{:?}; {:?}]", sample.x(), sample.y())?;
    }
    Ok(())
}
