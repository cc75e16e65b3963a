use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabulatedFunctionError {
    #[error("unequal length: x has {x_len} elements, y has {y_len}")]
    UnequalLength { x_len: usize, y_len: usize },

    #[error("insufficient points: got {got}, need at least {need}")]
    InsufficientPoints { got: usize, need: usize },

    #[error("x-values must be strictly increasing: x[{index}] = {current} follows {previous}")]
    NonIncreasingX { index: usize, previous: f64, current: f64 },

    #[error("index {index} out of range for function with {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("x = {x} lies outside interpolation segment {floor_index} [{left}, {right}]")]
    InterpolationRange { x: f64, floor_index: usize, left: f64, right: f64 },
}

impl TabulatedFunctionError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TabulatedFunctionError::UnequalLength { .. }
                | TabulatedFunctionError::InsufficientPoints { .. }
                | TabulatedFunctionError::NonIncreasingX { .. }
        )
    }
}
