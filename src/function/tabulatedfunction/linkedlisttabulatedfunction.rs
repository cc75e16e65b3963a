use std::fmt;
use std::sync::atomic::{
    AtomicU64,
    Ordering
};

use log::{
    debug,
    info,
    trace
};

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

// ─────────────────────────────────────────────
// Node chain
// ─────────────────────────────────────────────
//
// Nodes live in an arena and are linked into a circular doubly linked
// chain: `nodes[head].prev` is the tail. Positions are reached only by
// following links, starting from whichever of head, tail or the last
// accessed node is closest.

#[derive(Debug, Clone, Copy)]
struct Node {
    sample: Sample,
    prev: usize,
    next: usize,
}

/// `(position << 32) | node`, or `NO_CURSOR`.
const NO_CURSOR: u64 = u64::MAX;

fn pack_cursor(position: usize, node: usize) -> Option<u64> {
    let position = u32::try_from(position).ok()?;
    let node = u32::try_from(node).ok()?;
    Some((u64::from(position) << 32) | u64::from(node))
}

fn unpack_cursor(packed: u64) -> Option<(usize, usize)> {
    if packed == NO_CURSOR {
        None
    } else {
        Some(((packed >> 32) as usize, (packed & u64::from(u32::MAX)) as usize))
    }
}

/// Node-chain storage with a cached cursor on the last touched node, so
/// sequential access walks one link per step.
#[derive(Debug)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<Node>,
    head: usize,
    last_accessed: AtomicU64,
}

impl LinkedListTabulatedFunction {
    /// Copies `x_values` and `y_values`; `x_values` must be strictly increasing.
    pub fn new(
        x_values: &[f64],
        y_values: &[f64],
    ) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        validate(x_values, y_values)?;
        let function = Self::from_pairs(x_values.iter().copied().zip(y_values.iter().copied()));
        info!("LinkedListTabulatedFunction created with {} points", function.count());
        Ok(function)
    }

    pub fn from_function<S>(
        source: &S,
        from: f64,
        to: f64,
        count: usize,
    ) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError>
    where
        S: MathFunction + ?Sized,
    {
        let (x_values, y_values) = tabulate(source, from, to, count)?;
        let function = Self::from_pairs(x_values.into_iter().zip(y_values));
        info!("LinkedListTabulatedFunction tabulated over [{}, {}] with {} points",
              function.left_bound(), function.right_bound(), function.count());
        Ok(function)
    }

    pub(crate) fn from_samples(samples: &[Sample]) -> LinkedListTabulatedFunction {
        Self::from_pairs(samples.iter().map(|sample| (sample.x(), sample.y())))
    }

    fn from_pairs<I>(pairs: I) -> LinkedListTabulatedFunction
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut function = LinkedListTabulatedFunction {
            nodes: Vec::new(),
            head: 0,
            last_accessed: AtomicU64::new(NO_CURSOR),
        };
        for (x, y) in pairs {
            function.add_node(x, y);
        }
        function
    }

    fn add_node(&mut self, x: f64, y: f64) {
        let id = self.nodes.len();
        if self.nodes.is_empty() {
            self.nodes.push(Node { sample: Sample::new(x, y), prev: id, next: id });
            self.head = id;
        } else {
            let tail = self.nodes[self.head].prev;
            self.nodes.push(Node { sample: Sample::new(x, y), prev: tail, next: self.head });
            self.nodes[tail].next = id;
            let head = self.head;
            self.nodes[head].prev = id;
        }
    }

    fn tail(&self) -> usize {
        self.nodes[self.head].prev
    }

    fn cursor(&self) -> Option<(usize, usize)> {
        unpack_cursor(self.last_accessed.load(Ordering::Relaxed))
    }

    fn remember(&self, position: usize, node: usize) {
        if let Some(packed) = pack_cursor(position, node) {
            self.last_accessed.store(packed, Ordering::Relaxed);
        }
    }

    /// Node id holding position `index`.
    fn locate(&self, index: usize) -> Result<usize, TabulatedFunctionError> {
        let count = self.count();
        check_index(index, count)?;

        let mut start = (0, self.head);
        if count - 1 - index < index {
            start = (count - 1, self.tail());
        }
        if let Some((position, node)) = self.cursor() {
            if position < count && position.abs_diff(index) < start.0.abs_diff(index) {
                start = (position, node);
            }
        }

        let (mut position, mut node) = start;
        while position < index {
            node = self.nodes[node].next;
            position += 1;
        }
        while position > index {
            node = self.nodes[node].prev;
            position -= 1;
        }
        self.remember(index, node);
        Ok(node)
    }
}

impl Clone for LinkedListTabulatedFunction {
    fn clone(&self) -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction {
            nodes: self.nodes.clone(),
            head: self.head,
            last_accessed: AtomicU64::new(self.last_accessed.load(Ordering::Relaxed)),
        }
    }
}

struct Chain<'a> {
    nodes: &'a [Node],
    node: usize,
    remaining: usize,
}

impl Iterator for Chain<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.remaining == 0 {
            return None;
        }
        let current = &self.nodes[self.node];
        self.node = current.next;
        self.remaining -= 1;
        Some(current.sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn backend_name(&self) -> &'static str {
        "LinkedListTabulatedFunction"
    }

    fn count(&self) -> usize {
        self.nodes.len()
    }

    fn x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        Ok(self.nodes[self.locate(index)?].sample.x())
    }

    fn y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        Ok(self.nodes[self.locate(index)?].sample.y())
    }

    fn set_y(&mut self, index: usize, value: f64) -> Result<(), TabulatedFunctionError> {
        let node = self.locate(index)?;
        let old = self.nodes[node].sample;
        debug!("y[{}]: {} -> {}", index, old.y(), value);
        self.nodes[node].sample = Sample::new(old.x(), value);
        Ok(())
    }

    fn left_bound(&self) -> f64 {
        self.nodes[self.head].sample.x()
    }

    fn right_bound(&self) -> f64 {
        self.nodes[self.tail()].sample.x()
    }

    fn index_of_x(&self, x: f64) -> Option<usize> {
        position_within_tolerance(self.iter().map(|sample| sample.x()), x)
    }

    fn index_of_y(&self, y: f64) -> Option<usize> {
        position_within_tolerance(self.iter().map(|sample| sample.y()), y)
    }

    fn floor_index_of_x(&self, x: f64) -> usize {
        let index = floor_index(self.iter().map(|sample| sample.x()), self.count(), x);
        trace!("floor index of {} is {}", x, index);
        index
    }

    fn iter(&self) -> SampleIter<'_> {
        Box::new(Chain {
            nodes: &self.nodes,
            node: self.head,
            remaining: self.nodes.len(),
        })
    }

    fn sample(&self, index: usize) -> Result<Sample, TabulatedFunctionError> {
        Ok(self.nodes[self.locate(index)?].sample)
    }
}

impl MathFunction for LinkedListTabulatedFunction {
    fn apply(&self, x: f64) -> f64 {
        apply_or_nan(self, x)
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}
