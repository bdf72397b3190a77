use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{
    mutex::{Mutex, lock_state},
    step,
};
use crate::{
    FlakeGenerator, FlakeId, HostId, HostResolutionError, HostResolver, NetworkResolver,
    SystemClock, TimeSource,
};

/// A lock-based Flake ID generator suitable for multi-threaded environments.
///
/// The last emitted ID (timestamp, host ID and sequence packed together), or
/// `None` before the first call, is the generator's entire state. It lives in
/// an [`Arc<Mutex<_>>`], so every call observes and replaces it as a unit.
/// Cloning the generator yields another handle to the same state, not a
/// second generator.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Never fails after construction
/// - ✅ Tolerates clocks that step backwards
///
/// ## Recommended When
/// - IDs are requested from more than one thread
/// - A single generator is shared through application context
///
/// ## See Also
/// - [`BasicFlakeGenerator`]
///
/// [`BasicFlakeGenerator`]: crate::BasicFlakeGenerator
#[derive(Clone, Debug)]
pub struct LockFlakeGenerator<T: TimeSource = SystemClock> {
    state: Arc<Mutex<Option<FlakeId>>>,
    host: HostId,
    time: T,
}

impl LockFlakeGenerator<SystemClock> {
    /// Creates a generator using the [`NetworkResolver`] and the wall clock
    /// anchored at [`FLAKE_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`HostResolutionError`] if the host ID cannot be resolved.
    ///
    /// [`FLAKE_EPOCH`]: crate::FLAKE_EPOCH
    pub fn from_environment() -> Result<Self, HostResolutionError> {
        Self::new(&NetworkResolver, SystemClock::default())
    }
}

impl<T: TimeSource> LockFlakeGenerator<T> {
    /// Creates a new [`LockFlakeGenerator`], resolving the host ID once.
    ///
    /// Nothing has been emitted yet, so the first ID carries the clock's
    /// current reading and sequence 0.
    ///
    /// # Errors
    ///
    /// Returns whatever [`HostResolutionError`] the resolver reports. The
    /// generator is not built in that case.
    ///
    /// # Example
    /// ```
    /// use flakeid::{LockFlakeGenerator, SystemClock};
    /// use std::net::Ipv4Addr;
    ///
    /// let generator = LockFlakeGenerator::new(&Ipv4Addr::new(10, 0, 0, 7), SystemClock::default())?;
    /// let id = generator.next_id();
    /// assert_eq!(id.host_id(), u64::from(generator.host_id()));
    /// # Ok::<(), flakeid::HostResolutionError>(())
    /// ```
    pub fn new<R>(resolver: &R, time: T) -> Result<Self, HostResolutionError>
    where
        R: HostResolver + ?Sized,
    {
        let host = resolver.resolve()?;
        Ok(Self::with_host_id(host, time))
    }

    /// Creates a new generator for an already known host ID.
    pub fn with_host_id(host: HostId, time: T) -> Self {
        Self::with_state(None, host, time)
    }

    /// Creates a generator from explicit component values.
    ///
    /// This is useful when resuming from a persisted last ID: the next call
    /// will never produce anything at or below `(timestamp, sequence)`.
    ///
    /// In typical use cases, you should prefer [`Self::new`].
    pub fn from_components(timestamp: u64, host: HostId, sequence: u64, time: T) -> Self {
        let id = FlakeId::from_components(timestamp, u64::from(host), sequence);
        Self::with_state(Some(id), host, time)
    }

    fn with_state(state: Option<FlakeId>, host: HostId, time: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            host,
            time,
        }
    }

    /// Generates the next ID.
    ///
    /// The clock is read and the state advanced while holding the lock, so
    /// concurrent callers are strictly serialized.
    ///
    /// # Example
    /// ```
    /// use flakeid::{FixedHost, HostId, LockFlakeGenerator, TimeSource};
    ///
    /// struct FixedTime;
    /// impl TimeSource for FixedTime {
    ///     fn current_millis(&self) -> u64 {
    ///         1000
    ///     }
    /// }
    ///
    /// let host = FixedHost::new(HostId::new(5)?);
    /// let generator = LockFlakeGenerator::new(&host, FixedTime)?;
    ///
    /// let id = generator.next_id();
    /// assert_eq!((id.timestamp(), id.host_id(), id.sequence()), (1000, 5, 0));
    /// let id = generator.next_id();
    /// assert_eq!((id.timestamp(), id.host_id(), id.sequence()), (1000, 5, 1));
    /// # Ok::<(), flakeid::HostResolutionError>(())
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> FlakeId {
        let mut state = lock_state(&self.state);
        let next = step(*state, self.host, self.time.current_millis());
        *state = Some(next);
        next
    }

    /// The most recently generated ID, or the resume point passed to
    /// [`Self::from_components`]. `None` for a fresh generator.
    pub fn last_id(&self) -> Option<FlakeId> {
        *lock_state(&self.state)
    }

    pub fn host_id(&self) -> HostId {
        self.host
    }

    pub fn time(&self) -> &T {
        &self.time
    }
}

impl<T: TimeSource> FlakeGenerator for LockFlakeGenerator<T> {
    fn next_id(&self) -> FlakeId {
        self.next_id()
    }

    fn host_id(&self) -> HostId {
        self.host
    }
}
