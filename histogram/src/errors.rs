use thiserror::Error;

/// Errors returned for histogram construction.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq)]
pub enum BuildError {
    #[error("a histogram needs at least one bucket")]
    NoBuckets,
    #[error("generator would overflow its input sequence")]
    GeneratorOverflow,
    #[error("bucket {index} starts at {found}, expected {expected}")]
    Discontiguous {
        index: usize,
        expected: i128,
        found: i128,
    },
    #[error("bucket {index} ends at {end} which is before its start {start}")]
    Inverted { index: usize, start: i128, end: i128 },
    #[error("bucket {index} is empty at {value}")]
    Empty { index: usize, value: i128 },
    #[error("buckets end at {end} and do not reach the maximum value")]
    Incomplete { end: i128 },
}
