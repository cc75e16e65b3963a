/// A scalar function of one variable.
///
/// `Send + Sync` is a supertrait so sources can be sampled from any thread
/// and boxed behind `Arc`.
pub trait MathFunction: Send + Sync {
    fn apply(&self, x: f64) -> f64;

    /// `next(self(x))`
    fn and_then<G>(self, next: G) -> CompositeFunction<Self, G>
    where
        Self: Sized,
        G: MathFunction,
    {
        CompositeFunction::new(self, next)
    }
}

impl<F> MathFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn apply(&self, x: f64) -> f64 {
        self(x)
    }
}

// ─────────────────────────────────────────────
// Basic sources
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFunction;

impl MathFunction for IdentityFunction {
    fn apply(&self, x: f64) -> f64 {
        x
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqrFunction;

impl MathFunction for SqrFunction {
    fn apply(&self, x: f64) -> f64 {
        x * x
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConstantFunction {
    value: f64
}

impl ConstantFunction {
    pub fn new(value: f64) -> ConstantFunction {
        ConstantFunction { value }
    }

    pub fn zero() -> ConstantFunction {
        ConstantFunction::new(0.0)
    }

    pub fn unit() -> ConstantFunction {
        ConstantFunction::new(1.0)
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl MathFunction for ConstantFunction {
    fn apply(&self, _x: f64) -> f64 {
        self.value
    }
}

// ─────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct CompositeFunction<F, G> {
    first: F,
    second: G
}

impl<F, G> CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    pub fn new(first: F, second: G) -> CompositeFunction<F, G> {
        CompositeFunction { first, second }
    }

    pub fn first(&self) -> &F {
        &self.first
    }

    pub fn second(&self) -> &G {
        &self.second
    }
}

impl<F, G> MathFunction for CompositeFunction<F, G>
where
    F: MathFunction,
    G: MathFunction,
{
    fn apply(&self, x: f64) -> f64 {
        self.second.apply(self.first.apply(x))
    }
}
