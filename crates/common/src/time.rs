//! Time abstraction for testability
//!
//! Provides a trait-based approach to time operations that allows for
//! deterministic testing without relying on actual time passage. The
//! credential-expiry logic depends on wall clock time; injecting a
//! [`Clock`] keeps those code paths testable.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use gatelink_common::time::{Clock, MockClock, SystemClock};
//!
//! // Use system clock in production
//! let clock = SystemClock;
//! let now = clock.system_time();
//!
//! // Use mock clock in tests
//! let mock = MockClock::new();
//! let start = mock.system_time();
//! mock.advance(Duration::from_secs(5));
//! let end = mock.system_time();
//! assert_eq!(end.duration_since(start).unwrap(), Duration::from_secs(5));
//! ```

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Trait for time operations to enable testing
///
/// This trait provides an abstraction over wall clock time, allowing code
/// to work with either real system time or mocked time for testing.
pub trait Clock: Send + Sync {
    /// Get current system time (wall clock)
    fn system_time(&self) -> SystemTime;

    /// Get milliseconds since UNIX epoch
    ///
    /// Convenience method for getting the current time as milliseconds
    /// since the UNIX epoch (January 1, 1970).
    fn millis_since_epoch(&self) -> u64 {
        self.system_time().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }

    /// Get the current wall clock time as a UTC datetime
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.system_time())
    }
}

/// Real system clock implementation
///
/// Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Mock clock for deterministic testing
///
/// The clock starts at the current real time but only moves when
/// [`MockClock::advance`] is called, making expiry tests deterministic
/// and fast.
#[derive(Debug, Clone)]
pub struct MockClock {
    base: SystemTime,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Create a new mock clock anchored at the current real time
    pub fn new() -> Self {
        Self { base: SystemTime::now(), elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Create a mock clock anchored at a specific wall clock time
    pub fn at(base: SystemTime) -> Self {
        Self { base, elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *elapsed += duration;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn system_time(&self) -> SystemTime {
        let elapsed = *self.elapsed.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.base + elapsed
    }
}
