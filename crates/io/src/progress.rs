//!
//! A utility to print progress information for procedures of which the
//! number of steps is not known in advance, without writing too many messages.
//!

use std::time::Duration;
use std::time::Instant;

/// A time-based progress tracker that prints messages at regular intervals.
pub struct TimeProgress<F: Fn(T), T> {
    interval: Duration,
    last_update: Instant,
    message: F,
    _marker: std::marker::PhantomData<T>,
}

impl<F: Fn(T), T> TimeProgress<F, T> {
    /// Create a new time-based progress tracker with a given interval in seconds.
    pub fn new(message: F, interval_seconds: u64) -> TimeProgress<F, T> {
        TimeProgress {
            message,
            interval: Duration::from_secs(interval_seconds),
            last_update: Instant::now(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Calls the message with the given object when the interval has passed
    /// since the last message.
    pub fn print(&mut self, object: T) {
        let now = Instant::now();
        if now.duration_since(self.last_update) >= self.interval {
            (self.message)(object);
            self.last_update = now;
        }
    }
}
