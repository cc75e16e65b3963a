use std::fmt;
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError
};

use log::{
    debug,
    trace
};

use crate::function::mathfunction::MathFunction;
use crate::function::sample::Sample;
use crate::function::tabulatedfunction::tabulatedfunction::{
    SampleIter,
    TabulatedFunction
};
use crate::function::tabulatedfunction::tabulatedfunctionerror::TabulatedFunctionError;

/// Serializes every access to one tabulated function behind a single lock.
///
/// Each accessor takes the lock for its own duration only. A sequence of
/// calls that must look atomic to other threads goes through
/// [`do_synchronously`](Self::do_synchronously), which holds the same lock
/// for the whole closure.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use tabulated::concurrent::synchronizedtabulatedfunction::SynchronizedTabulatedFunction;
/// use tabulated::function::tabulatedfunction::arraytabulatedfunction::ArrayTabulatedFunction;
/// use tabulated::function::tabulatedfunction::tabulatedfunction::TabulatedFunction;
///
/// let function = ArrayTabulatedFunction::new(&[0.0, 1.0], &[1.0, 2.0]).unwrap();
/// let shared = Arc::new(SynchronizedTabulatedFunction::new(function));
///
/// let worker = Arc::clone(&shared);
/// thread::spawn(move || {
///     worker.do_synchronously(|f| {
///         for i in 0..f.count() {
///             let y = f.y(i).unwrap();
///             f.set_y(i, y * 10.0).unwrap();
///         }
///     });
/// }).join().unwrap();
///
/// assert_eq!(shared.y(1).unwrap(), 20.0);
/// ```
#[derive(Debug)]
pub struct SynchronizedTabulatedFunction {
    function: Mutex<Box<dyn TabulatedFunction>>
}

impl SynchronizedTabulatedFunction {
    pub fn new<F>(function: F) -> SynchronizedTabulatedFunction
    where
        F: TabulatedFunction + 'static,
    {
        Self::from_boxed(Box::new(function))
    }

    pub fn from_boxed(function: Box<dyn TabulatedFunction>) -> SynchronizedTabulatedFunction {
        debug!("synchronizing {} with {} points", function.backend_name(), function.count());
        SynchronizedTabulatedFunction { function: Mutex::new(function) }
    }

    // Every write is a single y store; a poisoned guard is still consistent.
    fn lock(&self) -> MutexGuard<'_, Box<dyn TabulatedFunction>> {
        self.function.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `operation` with exclusive access to the wrapped function.
    pub fn do_synchronously<R, F>(&self, operation: F) -> R
    where
        F: FnOnce(&mut dyn TabulatedFunction) -> R,
    {
        let mut guard = self.lock();
        trace!("transaction started on {}", guard.backend_name());
        let result = operation(&mut **guard);
        trace!("transaction finished on {}", guard.backend_name());
        result
    }

    pub fn into_inner(self) -> Box<dyn TabulatedFunction> {
        self.function.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// `&self` counterpart of [`TabulatedFunction::set_y`] for shared handles.
    pub fn set_y(&self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        self.lock().set_y(index, value)
    }
}

// Every method takes the lock once, so composite reads such as `evaluate`
// see a single consistent state.
impl TabulatedFunction for SynchronizedTabulatedFunction {
    fn backend_name(&self) -> &'static str {
        self.lock().backend_name()
    }

    fn count(&self) -> usize {
        self.lock().count()
    }

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.lock().x(index)
    }

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.lock().y(index)
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        self.function
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .set_y(index, value)
    }

    fn left_bound(&self) -> f64 {
        self.lock().left_bound()
    }

    fn right_bound(&self) -> f64 {
        self.lock().right_bound()
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        self.lock().index_of_x(x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        self.lock().index_of_y(y)
    }

    fn floor_index_of_x(&self, x: f64) -> usize {
        self.lock().floor_index_of_x(x)
    }

    /// Iterates over a snapshot taken under the lock.
    fn iter(&self) -> SampleIter<'_> {
        Box::new(self.samples().into_iter())
    }

    fn sample(&self, index: usize) -> Result<Sample, TabulatedFunctionError> {
        self.lock().sample(index)
    }

    fn samples(&self) -> Vec<Sample> {
        self.lock().samples()
    }

    fn evaluate(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.lock().evaluate(x)
    }

    fn interpolate(&self, x: f64, floor_index: usize) -> Result<f64, TabulatedFunctionError> {
        self.lock().interpolate(x, floor_index)
    }

    fn extrapolate_left(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.lock().extrapolate_left(x)
    }

    fn extrapolate_right(&self, x: f64) -> Result<f64, TabulatedFunctionError> {
        self.lock().extrapolate_right(x)
    }
}

impl MathFunction for SynchronizedTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        self.lock().apply(x)
    }
}

impl fmt::Display for SynchronizedTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lock())
    }
}
