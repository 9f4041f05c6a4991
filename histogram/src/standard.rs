use crate::generator::{ExponentialGenerator, Generator};
use crate::{Bucket, BuildError, Value};
use core::fmt;
use log::{debug, trace};

/// The number of buckets requested from the generator when none is specified.
pub const DEFAULT_BUCKETS: usize = 30;

/// A histogram which counts values into buckets produced by a [`Generator`].
///
/// The buckets are contiguous, sorted, and always span the whole domain of
/// `T`, so every value is counted by exactly one bucket. Each bucket has its
/// own atomic counter, which allows recording from many threads at once
/// through a shared reference.
///
/// Reads which span buckets, such as [`Histogram::total`] and
/// [`Histogram::reset`], visit the buckets one at a time. They are not atomic
/// with respect to concurrent writers.
#[derive(Debug)]
pub struct Histogram<T> {
    buckets: Box<[Bucket<T>]>,
}

impl<T: Value> Histogram<T> {
    /// Construct a new histogram with `n` buckets covering consecutive powers
    /// of two, starting with `1..2`. Values outside of those buckets are
    /// counted by a bucket added at either edge of the domain.
    pub fn new(n: usize) -> Result<Self, BuildError> {
        Self::with_generator(ExponentialGenerator::default(), n)
    }

    /// Construct a new histogram by calling the generator `n` times.
    ///
    /// If the generated buckets do not start at `T::MIN` or do not end at
    /// `T::MAX`, one more bucket is added at that edge. Construction fails if
    /// the generator fails, or if its buckets overlap, leave gaps, or are out
    /// of order.
    pub fn with_generator<G: Generator<T>>(
        mut generator: G,
        n: usize,
    ) -> Result<Self, BuildError> {
        if n == 0 {
            return Err(BuildError::NoBuckets);
        }

        let mut buckets = Vec::with_capacity(n + 2);
        for _ in 0..n {
            buckets.push(generator.next_bucket()?);
        }

        // a bucket for the smallest values, if there isn't one already
        let first = buckets[0].start();
        if first > T::MIN {
            trace!("adding bucket [{}, {})", T::MIN, first);
            buckets.insert(0, Bucket::new(T::MIN, first));
        }

        // and one which reaches to the largest value
        let last = buckets[buckets.len() - 1].end();
        if last < T::MAX {
            trace!("adding bucket [{}, {})", last, T::MAX);
            buckets.push(Bucket::new(last, T::MAX));
        }

        verify(&buckets)?;

        if let Some(bucket) = buckets.last_mut() {
            bucket.set_terminal();
        }

        debug!("histogram built with {} buckets", buckets.len());

        Ok(Self {
            buckets: buckets.into(),
        })
    }

    /// Increment the counter for the bucket corresponding to the provided value
    /// by one.
    pub fn increment(&self, value: T) {
        self.add(value, 1)
    }

    /// Add some count to the counter for the bucket corresponding to the
    /// provided value.
    pub fn add(&self, value: T, count: u64) {
        match self.find(value) {
            Some(index) => self.buckets[index].increment(count),
            None => unreachable!("value {value} is not covered by any bucket"),
        }
    }

    /// Returns the bucket which counts the provided value.
    ///
    /// Every value belongs to some bucket, so this only returns `None` if the
    /// histogram is broken.
    pub fn get_bucket(&self, value: T) -> Option<&Bucket<T>> {
        self.find(value).map(|index| &self.buckets[index])
    }

    /// Set the count for every bucket to zero.
    pub fn reset(&self) {
        for bucket in self.buckets.iter() {
            bucket.set(0);
        }
    }

    /// Returns the sum of the counts across all buckets.
    pub fn total(&self) -> u64 {
        self.buckets
            .iter()
            .fold(0, |total, bucket| total.wrapping_add(bucket.count()))
    }

    /// Returns the number of buckets, including any added at the edges of the
    /// domain.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false, a histogram has at least one bucket.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Get a reference to the buckets, in ascending order.
    pub fn as_slice(&self) -> &[Bucket<T>] {
        &self.buckets
    }

    /// Returns an iterator across the buckets in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    fn find(&self, value: T) -> Option<usize> {
        if value == T::MAX {
            return Some(self.buckets.len() - 1);
        }

        // the first bucket which ends after the value
        let index = self.buckets.partition_point(|bucket| bucket.end() <= value);

        self.buckets
            .get(index)
            .filter(|bucket| bucket.accepts(value))
            .map(|_| index)
    }
}

/// Checks that the buckets are in order and cover the domain without gaps or
/// overlaps. Every bucket must be non-empty, except for `[MAX, MAX)` buckets
/// produced by generators which saturate.
fn verify<T: Value>(buckets: &[Bucket<T>]) -> Result<(), BuildError> {
    let mut prev = T::MIN;

    for (index, bucket) in buckets.iter().enumerate() {
        if bucket.start() != prev {
            return Err(BuildError::Discontiguous {
                index,
                expected: prev.as_i128(),
                found: bucket.start().as_i128(),
            });
        }

        if bucket.end() < bucket.start() {
            return Err(BuildError::Inverted {
                index,
                start: bucket.start().as_i128(),
                end: bucket.end().as_i128(),
            });
        }

        // only saturated buckets at the top of the domain may be empty
        if bucket.end() == bucket.start() && bucket.start() != T::MAX {
            return Err(BuildError::Empty {
                index,
                value: bucket.start().as_i128(),
            });
        }

        prev = bucket.end();
    }

    if prev != T::MAX {
        return Err(BuildError::Incomplete {
            end: prev.as_i128(),
        });
    }

    Ok(())
}

impl<T: Value> fmt::Display for Histogram<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{Histogram: ")?;
        for (index, bucket) in self.buckets.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{bucket}")?;
        }
        write!(f, "}}")
    }
}

impl<'a, T> IntoIterator for &'a Histogram<T> {
    type Item = &'a Bucket<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            iter: self.buckets.iter(),
        }
    }
}

/// An iterator across the histogram buckets.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    iter: core::slice::Iter<'a, Bucket<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Bucket<T>;

    fn next(&mut self) -> Option<<Self as std::iter::Iterator>::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
