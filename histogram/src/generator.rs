//! Generators produce the bucket boundaries for a histogram.
//!
//! A generator is stateful and only moves forward: each call to
//! [`Generator::next_bucket`] returns the bucket following the previous one.
//! The histogram calls the generator exactly once per requested bucket, so
//! generators which never run out are fine.

use crate::{BuildError, Bucket, Value};

/// Produces successive buckets for a histogram.
///
/// A mutable reference to a generator is also a generator, which lets the
/// caller keep using it after a histogram is built. Closures can be used
/// through [`from_fn`].
pub trait Generator<T: Value> {
    /// Produce the next bucket, advancing the generator.
    fn next_bucket(&mut self) -> Result<Bucket<T>, BuildError>;
}

impl<T: Value, G: Generator<T> + ?Sized> Generator<T> for &mut G {
    fn next_bucket(&mut self) -> Result<Bucket<T>, BuildError> {
        (**self).next_bucket()
    }
}

/// Creates a generator which calls the closure for each bucket.
pub fn from_fn<T, F>(f: F) -> FromFn<F>
where
    T: Value,
    F: FnMut() -> Result<Bucket<T>, BuildError>,
{
    FromFn(f)
}

/// A generator backed by a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<T, F> Generator<T> for FromFn<F>
where
    T: Value,
    F: FnMut() -> Result<Bucket<T>, BuildError>,
{
    fn next_bucket(&mut self) -> Result<Bucket<T>, BuildError> {
        (self.0)()
    }
}

/// Generates buckets of a width which grows by a constant factor on each call.
///
/// With a growth of `1.0` all buckets have the same width.
#[derive(Clone, Debug)]
pub struct GrowingWidthGenerator<T> {
    growth: f64,
    start: T,
    width: f64,
}

impl<T: Value> GrowingWidthGenerator<T> {
    /// Create a generator whose first bucket is `start..start + width` and
    /// where each subsequent bucket is `growth` times wider than the previous.
    pub fn new(start: T, width: T, growth: f64) -> Self {
        Self {
            growth,
            start,
            width: width.as_i128() as f64,
        }
    }

    /// Create a generator of buckets which all have the same width.
    pub fn fixed(start: T, width: T) -> Self {
        Self::new(start, width, 1.0)
    }
}

impl<T: Value> Generator<T> for GrowingWidthGenerator<T> {
    fn next_bucket(&mut self) -> Result<Bucket<T>, BuildError> {
        let start = self.start;
        let end = start.saturating_add(T::from_f64(self.width));

        self.start = end;
        self.width *= self.growth;

        Ok(Bucket::new(start, end))
    }
}

/// Generates buckets from a sequence of boundaries, where each bucket covers
/// `boundaries[i]..boundaries[i + 1]`.
#[derive(Clone, Debug)]
pub struct FixedInputGenerator<T> {
    boundaries: Vec<T>,
    index: usize,
}

impl<T: Value> FixedInputGenerator<T> {
    /// Create a generator from a sequence of bucket boundaries, which should be
    /// in ascending order.
    pub fn new(boundaries: impl Into<Vec<T>>) -> Self {
        Self {
            boundaries: boundaries.into(),
            index: 0,
        }
    }
}

impl<T: Value> Generator<T> for FixedInputGenerator<T> {
    /// Returns [`BuildError::GeneratorOverflow`] once fewer than two
    /// boundaries remain.
    fn next_bucket(&mut self) -> Result<Bucket<T>, BuildError> {
        if self.index + 1 >= self.boundaries.len() {
            return Err(BuildError::GeneratorOverflow);
        }

        let start = self.boundaries[self.index];
        self.index += 1;
        let end = self.boundaries[self.index];

        Ok(Bucket::new(start, end))
    }
}

/// Generates buckets covering `base^i..base^(i + 1)`, incrementing `i` on each
/// call.
#[derive(Clone, Debug)]
pub struct ExponentialGenerator {
    exponent: u64,
    base: f64,
}

impl ExponentialGenerator {
    /// Create a generator whose first bucket is
    /// `base^exponent..base^(exponent + 1)`.
    pub fn new(exponent: u64, base: f64) -> Self {
        Self { exponent, base }
    }
}

impl Default for ExponentialGenerator {
    /// Powers of two, starting from `2^0`.
    fn default() -> Self {
        Self::new(0, 2.0)
    }
}

impl<T: Value> Generator<T> for ExponentialGenerator {
    fn next_bucket(&mut self) -> Result<Bucket<T>, BuildError> {
        let start = T::from_f64(self.base.powf(self.exponent as f64));
        self.exponent += 1;
        let end = T::from_f64(self.base.powf(self.exponent as f64));

        Ok(Bucket::new(start, end))
    }
}
