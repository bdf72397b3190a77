use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// Flake epoch: Wednesday, January 1, 2014 00:00:00 UTC
///
/// Keeps the 41-bit millisecond timestamp in range until 2083.
pub const FLAKE_EPOCH: Duration = Duration::from_millis(1_388_534_400_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. The unit is **milliseconds** relative to the
/// implementation's epoch.
///
/// Implementations are not required to be monotonic. A clock that steps
/// backwards is handled by the generator, which holds its last timestamp
/// until the clock catches up.
///
/// # Example
///
/// ```
/// use flakeid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// A time source backed by [`SystemTime`], offset to a custom epoch.
///
/// Every call reads the real-time clock, so NTP steps and manual adjustments
/// are visible to callers. If the system clock reads earlier than the epoch,
/// the clock reports `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemClock {
    epoch: Duration,
}

impl Default for SystemClock {
    /// Constructs a clock aligned to [`FLAKE_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(FLAKE_EPOCH)
    }
}

impl SystemClock {
    /// Constructs a clock using `epoch` (a [`Duration`] since 1970-01-01 UTC)
    /// as the origin (t = 0).
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }

    /// The configured epoch as a duration since the Unix epoch.
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        let since_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        since_unix.saturating_sub(self.epoch).as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flake_epoch_is_2014() {
        // 44 years (11 of them leap) after 1970-01-01
        let days = 44 * 365 + 11;
        assert_eq!(FLAKE_EPOCH.as_millis(), days * 86_400_000);
    }

    #[test]
    fn system_clock_is_relative_to_epoch() {
        let flake = SystemClock::default().current_millis();
        let unix = SystemClock::with_epoch(Duration::ZERO).current_millis();
        let delta = unix - flake;
        // Two separate clock reads; allow for a slow scheduler.
        let epoch = FLAKE_EPOCH.as_millis() as u64;
        assert!(delta >= epoch && delta < epoch + 1_000);
    }

    #[test]
    fn epoch_in_the_future_saturates() {
        let clock = SystemClock::with_epoch(Duration::from_secs(u64::MAX / 2));
        assert_eq!(clock.current_millis(), 0);
    }

    #[test]
    fn shared_clock_delegates() {
        struct FixedTime;
        impl TimeSource for FixedTime {
            fn current_millis(&self) -> u64 {
                7
            }
        }
        let shared = Arc::new(FixedTime);
        assert_eq!(shared.current_millis(), 7);
        assert_eq!((&FixedTime).current_millis(), 7);
    }
}
