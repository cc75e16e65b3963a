use thiserror::Error;

use crate::function::tabulatedfunction::tabulatedfunctionerror::TabulatedFunctionError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("inconsistent functions: {left} points vs {right} points")]
    CountMismatch { left: usize, right: usize },

    #[error("inconsistent functions: x differs at index {index} ({left} vs {right})")]
    GridMismatch { index: usize, left: f64, right: f64 },

    #[error("division by zero at index {index} (x = {x}, denominator = {denominator})")]
    DivisionByZero { index: usize, x: f64, denominator: f64 },

    #[error("invalid step {got}: must be finite and > 0")]
    InvalidStep { got: f64 },

    #[error(transparent)]
    Function(#[from] TabulatedFunctionError),
}

impl OperationError {
    pub fn is_inconsistent(&self) -> bool {
        matches!(
            self,
            OperationError::CountMismatch { .. } | OperationError::GridMismatch { .. }
        )
    }
}
