use log::{
    debug,
    error,
    info
};

use crate::function::sample::Sample;
use crate::function::tabulatedfunction::tabulatedfunction::{
    TabulatedFunction,
    VALUE_TOLERANCE
};
use crate::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;

use super::operationerror::OperationError;

/// Elementwise arithmetic on functions that share an x grid.
///
/// Inputs are read through a snapshot and never modified; results are
/// fresh functions built by the configured factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabulatedFunctionOperationService {
    factory: TabulatedFunctionFactory
}

impl TabulatedFunctionOperationService {
    pub fn new(factory: TabulatedFunctionFactory) -> TabulatedFunctionOperationService {
        TabulatedFunctionOperationService { factory }
    }

    pub fn factory(&self) -> TabulatedFunctionFactory {
        self.factory
    }

    pub fn set_factory(&mut self, factory: TabulatedFunctionFactory) {
        self.factory = factory;
    }

    pub fn add(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError> {
        info!("add: {} + {}", a.backend_name(), b.backend_name());
        self.combine(a, b, |u, v| u + v)
    }

    pub fn subtract(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError> {
        info!("subtract: {} - {}", a.backend_name(), b.backend_name());
        self.combine(a, b, |u, v| u - v)
    }

    pub fn multiply(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError> {
        info!("multiply: {} * {}", a.backend_name(), b.backend_name());
        self.combine(a, b, |u, v| u * v)
    }

    /// Fails with `DivisionByZero` if any `|b.y(i)|` is below the value
    /// tolerance.
    pub fn divide(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError> {
        info!("divide: {} / {}", a.backend_name(), b.backend_name());
        self.do_operation(a, b, |index, lhs, rhs| {
            if rhs.y().abs() < VALUE_TOLERANCE {
                error!("division by zero at index {} (x = {})", index, rhs.x());
                return Err(OperationError::DivisionByZero {
                    index,
                    x: rhs.x(),
                    denominator: rhs.y(),
                });
            }
            Ok(lhs.y() / rhs.y())
        })
    }

    /// Applies `op` to the y values of `a` and `b` index by index.
    pub fn combine<F>(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
        op: F,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.do_operation(a, b, |_, lhs, rhs| Ok(op(lhs.y(), rhs.y())))
    }

    fn do_operation<F>(
        &self,
        a: &dyn TabulatedFunction,
        b: &dyn TabulatedFunction,
        op: F,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError>
    where
        F: Fn(usize, &Sample, &Sample) -> Result<f64, OperationError>,
    {
        if a.count() != b.count() {
            error!("count mismatch: {} vs {}", a.count(), b.count());
            return Err(OperationError::CountMismatch { left: a.count(), right: b.count() });
        }

        let lhs_samples = a.samples();
        let rhs_samples = b.samples();
        let mut result = Vec::with_capacity(lhs_samples.len());
        for (index, (lhs, rhs)) in lhs_samples.iter().zip(rhs_samples.iter()).enumerate() {
            if (lhs.x() - rhs.x()).abs() > VALUE_TOLERANCE {
                error!("x mismatch at index {}: {} vs {}", index, lhs.x(), rhs.x());
                return Err(OperationError::GridMismatch { index, left: lhs.x(), right: rhs.x() });
            }
            result.push(Sample::new(lhs.x(), op(index, lhs, rhs)?));
        }

        let function = self.factory.assemble(&result)?;
        debug!("operation produced {} with {} points", function.backend_name(), function.count());
        Ok(function)
    }
}
