use core::cell::Cell;

use super::step;
use crate::{
    FlakeGenerator, FlakeId, HostId, HostResolutionError, HostResolver, SystemClock, TimeSource,
};

/// A non-concurrent Flake ID generator suitable for single-threaded owners.
///
/// Same transition as [`LockFlakeGenerator`], with the state in a [`Cell`]
/// instead of behind a mutex. It is `!Sync`, so the compiler rejects sharing
/// it across threads.
///
/// [`LockFlakeGenerator`]: crate::LockFlakeGenerator
#[derive(Debug)]
pub struct BasicFlakeGenerator<T: TimeSource = SystemClock> {
    state: Cell<Option<FlakeId>>,
    host: HostId,
    time: T,
}

impl<T: TimeSource> BasicFlakeGenerator<T> {
    /// Creates a new [`BasicFlakeGenerator`], resolving the host ID once.
    ///
    /// # Errors
    ///
    /// Returns whatever [`HostResolutionError`] the resolver reports.
    pub fn new<R>(resolver: &R, time: T) -> Result<Self, HostResolutionError>
    where
        R: HostResolver + ?Sized,
    {
        let host = resolver.resolve()?;
        Ok(Self::with_host_id(host, time))
    }

    pub fn with_host_id(host: HostId, time: T) -> Self {
        Self {
            state: Cell::new(None),
            host,
            time,
        }
    }

    /// Creates a generator from explicit component values, e.g. a persisted
    /// last ID.
    pub fn from_components(timestamp: u64, host: HostId, sequence: u64, time: T) -> Self {
        Self {
            state: Cell::new(Some(FlakeId::from_components(
                timestamp,
                u64::from(host),
                sequence,
            ))),
            host,
            time,
        }
    }

    pub fn next_id(&self) -> FlakeId {
        let next = step(self.state.get(), self.host, self.time.current_millis());
        self.state.set(Some(next));
        next
    }

    pub fn last_id(&self) -> Option<FlakeId> {
        self.state.get()
    }

    pub fn host_id(&self) -> HostId {
        self.host
    }
}

impl<T: TimeSource> FlakeGenerator for BasicFlakeGenerator<T> {
    fn next_id(&self) -> FlakeId {
        self.next_id()
    }

    fn host_id(&self) -> HostId {
        self.host
    }
}
