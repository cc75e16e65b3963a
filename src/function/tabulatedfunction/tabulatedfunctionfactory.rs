use serde::{
    Deserialize,
    Serialize
};

use crate::function::mathfunction::MathFunction;
use crate::function::sample::Sample;

use super::arraytabulatedfunction::ArrayTabulatedFunction;
use super::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use super::tabulatedfunction::TabulatedFunction;
use super::tabulatedfunctionerror::TabulatedFunctionError;

/// Selects the storage back-end of newly built functions.
///
/// Consumers hold a factory and never name a concrete storage type; the
/// choice changes the representation of results, never their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabulatedFunctionFactory {
    #[default]
    Array,
    LinkedList,
}

impl TabulatedFunctionFactory {
    pub fn create(
        &self,
        x_values: &[f64],
        y_values: &[f64],
    ) -> Result<Box<dyn TabulatedFunction>, TabulatedFunctionError> {
        Ok(match self {
            TabulatedFunctionFactory::Array => {
                Box::new(ArrayTabulatedFunction::new(x_values, y_values)?)
            }
            TabulatedFunctionFactory::LinkedList => {
                Box::new(LinkedListTabulatedFunction::new(x_values, y_values)?)
            }
        })
    }

    pub fn create_from_function<S>(
        &self,
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<Box<dyn TabulatedFunction>, TabulatedFunctionError>
    where
        S: MathFunction + ?Sized,
    {
        Ok(match self {
            TabulatedFunctionFactory::Array => {
                Box::new(ArrayTabulatedFunction::from_function(source, from, to, count)?)
            }
            TabulatedFunctionFactory::LinkedList => {
                Box::new(LinkedListTabulatedFunction::from_function(source, from, to, count)?)
            }
        })
    }

    /// Builds from a grid already held by a valid function; only the
    /// sample count is checked.
    pub(crate) fn assemble(
        &self,
        samples: &[Sample],
    ) -> Result<Box<dyn TabulatedFunction>, TabulatedFunctionError> {
        if samples.is_empty() {
            return Err(TabulatedFunctionError::InsufficientPoints { got: 0, need: 1 });
        }
        Ok(match self {
            TabulatedFunctionFactory::Array => Box::new(ArrayTabulatedFunction::from_samples(samples)),
            TabulatedFunctionFactory::LinkedList => {
                Box::new(LinkedListTabulatedFunction::from_samples(samples))
            }
        })
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            TabulatedFunctionFactory::Array => "ArrayTabulatedFunction",
            TabulatedFunctionFactory::LinkedList => "LinkedListTabulatedFunction",
        }
    }

    /// The factory whose functions report `name` as their back-end.
    pub fn from_backend_name(name: &str) -> Option<TabulatedFunctionFactory> {
        [TabulatedFunctionFactory::Array, TabulatedFunctionFactory::LinkedList]
            .into_iter()
            .find(|factory| factory.backend_name() == name)
    }
}
