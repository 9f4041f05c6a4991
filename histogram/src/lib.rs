// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! This crate provides a histogram which counts occurrences of values in
//! buckets, along with a timer which records how long a block of code took.
//!
//! The bucket boundaries come from a [`Generator`]. Three are provided:
//!
//! * [`GrowingWidthGenerator`] - buckets whose width grows by a constant
//!   factor, or stays fixed
//! * [`FixedInputGenerator`] - buckets between consecutive values of a
//!   provided sequence
//! * [`ExponentialGenerator`] - buckets between consecutive powers of a base
//!
//! Whatever the generator produces, the histogram adds buckets at the edges so
//! that every value of the domain is counted by exactly one bucket. Buckets
//! use atomic counters, so a histogram can be shared and written to from many
//! threads without locking.

mod bucket;
mod errors;
mod generator;
mod standard;
mod timer;
mod value;

pub use bucket::Bucket;
pub use errors::BuildError;
pub use generator::{
    from_fn, ExponentialGenerator, FixedInputGenerator, FromFn, Generator, GrowingWidthGenerator,
};
pub use standard::{Histogram, Iter, DEFAULT_BUCKETS};
pub use timer::{BlockTimer, Clock, GenericBlockTimer, MonotonicClock, Record};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // run some test cases for various histogram sizes
    fn num_buckets() {
        let histogram = Histogram::<u64>::new(10).unwrap();
        assert_eq!(histogram.len(), 12);

        let histogram = Histogram::<u64>::new(64).unwrap();
        assert_eq!(histogram.len(), 65);

        let histogram = Histogram::<i32>::new(DEFAULT_BUCKETS).unwrap();
        assert_eq!(histogram.len(), 32);

        let histogram =
            Histogram::with_generator(GrowingWidthGenerator::fixed(0_u32, 10), 5).unwrap();
        assert_eq!(histogram.len(), 6);

        let histogram =
            Histogram::with_generator(FixedInputGenerator::new(vec![i16::MIN, 0, i16::MAX]), 2)
                .unwrap();
        assert_eq!(histogram.len(), 2);
    }

    #[test]
    fn covers_domain() {
        let histograms: Vec<Histogram<u8>> = vec![
            Histogram::new(DEFAULT_BUCKETS).unwrap(),
            Histogram::new(3).unwrap(),
            Histogram::with_generator(GrowingWidthGenerator::new(10_u8, 3, 1.5), 8).unwrap(),
            Histogram::with_generator(FixedInputGenerator::new(vec![0_u8, 1, 100, 255]), 3)
                .unwrap(),
            Histogram::with_generator(ExponentialGenerator::new(1, 3.0), 6).unwrap(),
        ];

        for histogram in &histograms {
            let buckets = histogram.as_slice();

            assert_eq!(buckets[0].start(), u8::MIN);
            assert_eq!(buckets[buckets.len() - 1].end(), u8::MAX);
            for pair in buckets.windows(2) {
                assert_eq!(pair[0].end(), pair[1].start());
                assert!(pair[0].start() <= pair[1].start());
            }

            for value in u8::MIN..=u8::MAX {
                let accepting: Vec<usize> = buckets
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| b.accepts(value))
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(accepting.len(), 1, "value {value} in {histogram}");

                let bucket = histogram.get_bucket(value).unwrap();
                assert!(core::ptr::eq(bucket, &buckets[accepting[0]]));
            }

            assert!(buckets[buckets.len() - 1].accepts(u8::MAX));
        }
    }
}
