use log::{
    debug,
    error
};
use serde::{
    Deserialize,
    Serialize
};

use crate::function::mathfunction::MathFunction;

use super::differentialoperator::DifferentialOperator;
use super::operationerror::OperationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteppingScheme {
    /// `(f(x) - f(x - h)) / h`
    Left,
    /// `(f(x + h) - f(x)) / h`
    Right,
    /// `(f(x + h) - f(x - h)) / 2h`
    #[default]
    Central,
}

fn check_step(step: f64) -> Result<f64, OperationError> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        error!("rejected differentiation step {}", step);
        Err(OperationError::InvalidStep { got: step })
    }
}

/// Finite-difference derivative of any scalar function with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteppingDifferentialOperator {
    scheme: SteppingScheme,
    step: f64
}

impl SteppingDifferentialOperator {
    pub fn new(scheme: SteppingScheme, step: f64) -> Result<SteppingDifferentialOperator, OperationError> {
        let step = check_step(step)?;
        debug!("{:?} stepping operator with h = {}", scheme, step);
        Ok(SteppingDifferentialOperator { scheme, step })
    }

    pub fn left(step: f64) -> Result<SteppingDifferentialOperator, OperationError> {
        Self::new(SteppingScheme::Left, step)
    }

    pub fn right(step: f64) -> Result<SteppingDifferentialOperator, OperationError> {
        Self::new(SteppingScheme::Right, step)
    }

    pub fn central(step: f64) -> Result<SteppingDifferentialOperator, OperationError> {
        Self::new(SteppingScheme::Central, step)
    }

    pub fn scheme(&self) -> SteppingScheme {
        self.scheme
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Leaves the current step in place on error.
    pub fn set_step(&mut self, step: f64) -> Result<(), OperationError> {
        self.step = check_step(step)?;
        Ok(())
    }
}

impl<F> DifferentialOperator<F> for SteppingDifferentialOperator
where
    F: MathFunction,
{
    type Output = SteppingDerivative<F>;

    fn derive(&self, function: F) -> SteppingDerivative<F> {
        SteppingDerivative {
            function,
            scheme: self.scheme,
            step: self.step,
        }
    }
}

/// The derivative built by a [`SteppingDifferentialOperator`]; evaluates
/// the wrapped function lazily on every call.
#[derive(Debug, Clone)]
pub struct SteppingDerivative<F> {
    function: F,
    scheme: SteppingScheme,
    step: f64,
}

impl<F> SteppingDerivative<F> {
    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn scheme(&self) -> SteppingScheme {
        self.scheme
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl<F> MathFunction for SteppingDerivative<F>
where
    F: MathFunction,
{
    fn apply(&self, x: f64) -> f64 {
        let h = self.step;
        let f = &self.function;
        match self.scheme {
            SteppingScheme::Left => (f.apply(x) - f.apply(x - h)) / h,
            SteppingScheme::Right => (f.apply(x + h) - f.apply(x)) / h,
            SteppingScheme::Central => (f.apply(x + h) - f.apply(x - h)) / (2.0 * h),
        }
    }
}
