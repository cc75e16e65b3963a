use log::{
    debug,
    error,
    info
};

use crate::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
use crate::function::sample::Sample;
use crate::function::tabulatedfunction::tabulatedfunction::{
    TabulatedFunction,
    VALUE_TOLERANCE
};
use crate::function::tabulatedfunction::tabulatedfunctionerror::TabulatedFunctionError;
use crate::function::tabulatedfunction::tabulatedfunctionfactory::TabulatedFunctionFactory;

use super::differentialoperator::DifferentialOperator;
use super::operationerror::OperationError;

/// Forward-difference derivative of a tabulated function.
///
/// The result keeps the x grid of the input. Slot `i` holds the slope of
/// segment `[i, i + 1]`; the last slot repeats the slope before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabulatedDifferentialOperator {
    factory: TabulatedFunctionFactory
}

impl TabulatedDifferentialOperator {
    pub fn new(factory: TabulatedFunctionFactory) -> TabulatedDifferentialOperator {
        TabulatedDifferentialOperator { factory }
    }

    pub fn factory(&self) -> TabulatedFunctionFactory {
        self.factory
    }

    pub fn set_factory(&mut self, factory: TabulatedFunctionFactory) {
        self.factory = factory;
    }

    /// Derives while holding the decorator's lock, so no writer can
    /// interleave with the snapshot.
    pub fn derive_synchronously(
        &self,
        function: &SynchronizedTabulatedFunction,
    ) -> Result<Box<dyn TabulatedFunction>, OperationError> {
        function.do_synchronously(|inner| self.derive(&*inner))
    }
}

impl<'a, 'f> DifferentialOperator<&'a (dyn TabulatedFunction + 'f)> for TabulatedDifferentialOperator {
    type Output = Result<Box<dyn TabulatedFunction>, OperationError>;

    fn derive(&self, function: &'a (dyn TabulatedFunction + 'f)) -> Self::Output {
        let samples = function.samples();
        if samples.len() < 2 {
            error!("cannot differentiate {} point(s)", samples.len());
            return Err(TabulatedFunctionError::InsufficientPoints { got: samples.len(), need: 2 }.into());
        }
        info!("deriving {} with {} points", function.backend_name(), samples.len());

        let mut derivative: Vec<Sample> = samples
            .windows(2)
            .map(|pair| Sample::new(pair[0].x(), forward_slope(&pair[0], &pair[1])))
            .collect();
        let last_slope = derivative[derivative.len() - 1].y();
        derivative.push(Sample::new(samples[samples.len() - 1].x(), last_slope));

        let result = self.factory.assemble(&derivative)?;
        debug!("derivative built as {}", result.backend_name());
        Ok(result)
    }
}

fn forward_slope(lhs: &Sample, rhs: &Sample) -> f64 {
    if (rhs.x() - lhs.x()).abs() < VALUE_TOLERANCE {
        0.0
    } else {
        Sample::slope(lhs, rhs)
    }
}
