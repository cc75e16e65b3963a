use std::fmt;

use log::{
    debug,
    info,
    trace
};
use nalgebra::DVector;

use crate::function::mathfunction::MathFunction;
use crate::function::sample::Sample;

use super::tabulatedfunction::{
    apply_or_nan,
    check_index,
    floor_index,
    position_within_tolerance,
    tabulate,
    validate,
    write_summary,
    SampleIter,
    TabulatedFunction
};
use super::tabulatedfunctionerror::TabulatedFunctionError;

/// Contiguous storage: two parallel vectors of equal, fixed length.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTabulatedFunction {
    x_values: DVector<f64>,
    y_values: DVector<f64>
}

impl ArrayTabulatedFunction {
    /// Copies `x_values` and `y_values`; `x_values` must be strictly increasing.
    pub fn new(x_values: &[f64], y_values: &[f64]) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        validate(x_values, y_values)?;
        let function = Self::from_vecs(x_values.to_vec(), y_values.to_vec());
        info!("ArrayTabulatedFunction created with {} points", function.count());
        Ok(function)
    }

    pub fn from_function<S>(
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<ArrayTabulatedFunction, TabulatedFunctionError>
    where
        S: MathFunction + ?Sized,
    {
        let (x_values, y_values) = tabulate(source, from, to, count)?;
        let function = Self::from_vecs(x_values, y_values);
        info!("ArrayTabulatedFunction tabulated over [{}, {}] with {} points",
              function.left_bound(), function.right_bound(), function.count());
        Ok(function)
    }

    /// Builds from samples taken from an existing function, skipping the
    /// ordering check.
    pub(crate) fn from_samples(samples: &[Sample]) -> ArrayTabulatedFunction {
        let x_values = samples.iter().map(Sample::x).collect();
        let y_values = samples.iter().map(Sample::y).collect();
        Self::from_vecs(x_values, y_values)
    }

    fn from_vecs(x_values: Vec<f64>, y_values: Vec<f64>) -> ArrayTabulatedFunction {
        ArrayTabulatedFunction {
            x_values: DVector::from_vec(x_values),
            y_values: DVector::from_vec(y_values),
        }
    }

    pub fn x_values(&self) -> &[f64] {
        self.x_values.as_slice()
    }

    pub fn y_values(&self) -> &[f64] {
        self.y_values.as_slice()
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn backend_name(&self) -> &'static str {
        "ArrayTabulatedFunction"
    }

    fn count(&self) -> usize {
        self.x_values.len()
    }

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        check_index(index, self.count())?;
        Ok(self.x_values[index])
    }

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        check_index(index, self.count())?;
        Ok(self.y_values[index])
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        debug!("y[{}]: {} -> {}", index, self.y_values[index], value);
        self.y_values[index] = value;
        Ok(())
    }

    fn left_bound(&self) -> f64 {
        self.x_values[0]
    }

    fn right_bound(&self) -> f64 {
        self.x_values[self.count() - 1]
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        position_within_tolerance(self.x_values.iter().copied(), x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        position_within_tolerance(self.y_values.iter().copied(), y)
    }

    fn floor_index_of_x(&self, x: f64) -> usize {
        let index = floor_index(self.x_values.iter().copied(), self.count(), x);
        trace!("floor index of {} is {}", x, index);
        index
    }

    fn iter(&self) -> SampleIter<'_> {
        Box::new(
            self.x_values
                .iter()
                .zip(self.y_values.iter())
                .map(|(&x, &y)| Sample::new(x, y)),
        )
    }
}

impl MathFunction for ArrayTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        apply_or_nan(self, x)
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}
