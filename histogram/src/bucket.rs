//! Buckets represent a half-open range of values and a count of observations
//! within that range.

use crate::Value;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// A bucket covers the values `start..end` and counts how many observations
/// fell into that range.
///
/// The boundaries are fixed once the bucket is created. The count is an atomic
/// counter which may be incremented concurrently from any number of threads.
#[derive(Debug)]
pub struct Bucket<T> {
    start: T,
    end: T,
    count: AtomicU64,
    terminal: bool,
}

impl<T: Value> Bucket<T> {
    /// Create an empty bucket covering `start..end`.
    pub fn new(start: T, end: T) -> Self {
        Self {
            start,
            end,
            count: AtomicU64::new(0),
            terminal: false,
        }
    }

    /// Returns the inclusive lower bound for the bucket.
    pub fn start(&self) -> T {
        self.start
    }

    /// Returns the exclusive upper bound for the bucket.
    pub fn end(&self) -> T {
        self.end
    }

    /// Returns the range for the bucket.
    pub fn range(&self) -> core::ops::Range<T> {
        self.start..self.end
    }

    /// Returns the number of observations within the bucket's range.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Returns true if the value is counted by this bucket.
    ///
    /// The last bucket of a histogram also accepts the maximum value of the
    /// domain, which the half-open range would otherwise leave uncovered.
    pub fn accepts(&self, value: T) -> bool {
        value >= self.start && (value < self.end || (self.terminal && value == T::MAX))
    }

    /// The counter wraps on overflow.
    pub(crate) fn increment(&self, amount: u64) {
        self.count.fetch_add(amount, Ordering::Relaxed);
    }

    pub(crate) fn set(&self, value: u64) {
        self.count.store(value, Ordering::Relaxed);
    }

    pub(crate) fn set_terminal(&mut self) {
        self.terminal = true;
    }
}

impl<T: Value> fmt::Display for Bucket<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) = {}", self.start, self.end, self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts() {
        let bucket = Bucket::new(10_u64, 20);
        assert!(!bucket.accepts(9));
        assert!(bucket.accepts(10));
        assert!(bucket.accepts(19));
        assert!(!bucket.accepts(20));
        assert!(!bucket.accepts(u64::MAX));
    }

    #[test]
    fn terminal_accepts_max() {
        let mut bucket = Bucket::new(200_u8, 255);
        assert!(!bucket.accepts(255));
        bucket.set_terminal();
        assert!(bucket.accepts(254));
        assert!(bucket.accepts(255));
        assert!(!bucket.accepts(199));
    }

    #[test]
    fn empty_range() {
        let bucket = Bucket::new(5_i32, 5);
        assert!(!bucket.accepts(4));
        assert!(!bucket.accepts(5));
    }

    #[test]
    fn count() {
        let bucket = Bucket::new(0_u32, 1);
        assert_eq!(bucket.count(), 0);
        bucket.increment(3);
        bucket.increment(4);
        assert_eq!(bucket.count(), 7);
        bucket.set(0);
        assert_eq!(bucket.count(), 0);

        bucket.set(u64::MAX);
        bucket.increment(2);
        assert_eq!(bucket.count(), 1);
    }

    #[test]
    fn display() {
        let bucket = Bucket::new(-3_i64, 8);
        bucket.increment(2);
        assert_eq!(format!("{bucket}"), "[-3, 8) = 2");
    }
}
