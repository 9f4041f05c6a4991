//! Times blocks of code and records the elapsed time into a histogram.
//!
//! A [`GenericBlockTimer`] takes a timestamp when it is created and records
//! the elapsed time when it is dropped, which happens on every path out of
//! the enclosing scope, including early returns and unwinding.
//!
//! ```
//! use binned_histogram::{BlockTimer, Histogram};
//!
//! let histogram = Histogram::<u64>::new(30).unwrap();
//!
//! {
//!     let _timer = BlockTimer::new(Some(&histogram), Some("work"), None);
//!     // do some work
//! }
//!
//! assert_eq!(histogram.total(), 1);
//! ```

use crate::{Histogram, Value};
use clocksource::precise::Instant;
use log::warn;
use std::io::Write;
use std::sync::OnceLock;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// A monotonic source of nanosecond timestamps.
pub trait Clock {
    /// Returns the current reading in nanoseconds. Readings never decrease.
    fn now(&self) -> u64;
}

/// The system monotonic clock, read through `clocksource`.
///
/// Readings are nanoseconds since the first time any `MonotonicClock` was
/// read in this process.
#[derive(Copy, Clone, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        static ORIGIN: OnceLock<Instant> = OnceLock::new();

        ORIGIN.get_or_init(Instant::now).elapsed().as_nanos()
    }
}

/// A destination for block timings.
pub trait Record {
    /// Count one observation of the value, in microseconds.
    fn record(&self, value: u64);
}

impl<T: Value> Record for Histogram<T> {
    fn record(&self, value: u64) {
        self.increment(T::saturating_from_u64(value))
    }
}

/// Times a block and records the result in microseconds when dropped.
///
/// If `THRESHOLD_MS` is greater than zero, a block which takes longer than
/// `THRESHOLD_MS` milliseconds logs a warning. This requires that the timer
/// has a name.
///
/// Warnings are emitted with [`log::warn!`], so they are only visible once the
/// application has installed a logger (for example `ringlog`). Without one
/// they are discarded.
///
/// When both a name and an output are given, each timing is also written to
/// the output as `name\tnanoseconds`.
#[must_use]
pub struct GenericBlockTimer<'a, H: Record + ?Sized, const THRESHOLD_MS: u64> {
    dest: Option<&'a H>,
    start: u64,
    name: Option<&'a str>,
    out: Option<&'a mut dyn Write>,
    clock: &'a dyn Clock,
}

/// Records into a `Histogram<u64>` and warns about blocks slower than 10ms.
pub type BlockTimer<'a> = GenericBlockTimer<'a, Histogram<u64>, 10>;

impl<'a, H, const THRESHOLD_MS: u64> GenericBlockTimer<'a, H, THRESHOLD_MS>
where
    H: Record + ?Sized,
{
    /// Start timing a block using the system monotonic clock.
    ///
    /// * `dest` receives the elapsed time in microseconds
    /// * `name` identifies the block in the output and in slow block warnings
    /// * `out` receives a line for each timing, when a name is also given
    pub fn new(
        dest: Option<&'a H>,
        name: Option<&'a str>,
        out: Option<&'a mut dyn Write>,
    ) -> Self {
        Self::with_clock(dest, name, out, &MonotonicClock)
    }

    /// Start timing a block using the provided clock.
    pub fn with_clock(
        dest: Option<&'a H>,
        name: Option<&'a str>,
        out: Option<&'a mut dyn Write>,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            dest,
            start: clock.now(),
            name,
            out,
            clock,
        }
    }

    /// Report a block which took `spent` nanoseconds.
    ///
    /// Failures writing to `out` are ignored.
    pub fn log<W: Write + ?Sized>(spent: u64, name: Option<&str>, out: Option<&mut W>) {
        if let (Some(out), Some(name)) = (out, name) {
            let _ = writeln!(out, "{name}\t{spent}");
        }

        if THRESHOLD_MS > 0 {
            let msec = spent / NANOS_PER_MILLI;
            if let Some(name) = name {
                if msec > THRESHOLD_MS {
                    warn!("BlockTimer<{name}> took too long: {msec}ms");
                }
            }
        }
    }
}

impl<H, const THRESHOLD_MS: u64> Drop for GenericBlockTimer<'_, H, THRESHOLD_MS>
where
    H: Record + ?Sized,
{
    fn drop(&mut self) {
        let spent = self.clock.now().saturating_sub(self.start);

        if let Some(dest) = self.dest {
            dest.record(spent / NANOS_PER_MICRO);
        }

        Self::log(spent, self.name, self.out.as_deref_mut());
    }
}
