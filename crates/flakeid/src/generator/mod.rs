mod basic;
mod interface;
mod lock;
mod mutex;

pub use basic::*;
pub use interface::*;
pub use lock::*;

use crate::{FlakeId, HostId};
use core::cmp::Ordering;

/// The sequencer transition shared by every generator.
///
/// Given the last emitted ID and the current clock reading, returns the next
/// ID:
///
/// - a newer timestamp rolls over to sequence 0,
/// - the same (or an older) timestamp increments the sequence, holding the
///   last timestamp so IDs never move backwards,
/// - an exhausted sequence advances the timestamp by one millisecond ahead of
///   the clock instead of blocking.
#[inline]
pub(crate) fn advance(prev: FlakeId, now: u64) -> FlakeId {
    match now.cmp(&prev.timestamp()) {
        Ordering::Greater => prev.rollover_to_timestamp(now),
        Ordering::Equal => next_in_tick(prev),
        Ordering::Less => cold_clock_behind(prev, now),
    }
}

/// Steps a generator's state. A generator that has not emitted anything yet
/// starts at sequence 0 for whatever the clock reads, including 0.
#[inline]
pub(crate) fn step(prev: Option<FlakeId>, host: HostId, now: u64) -> FlakeId {
    match prev {
        Some(prev) => advance(prev, now),
        None => FlakeId::from_components(now, u64::from(host), 0),
    }
}

#[inline]
fn next_in_tick(prev: FlakeId) -> FlakeId {
    if prev.has_sequence_room() {
        prev.increment_sequence()
    } else {
        cold_sequence_exhausted(prev)
    }
}

#[cold]
#[inline(never)]
fn cold_clock_behind(prev: FlakeId, _now: u64) -> FlakeId {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        now = _now,
        last = prev.timestamp(),
        "clock behind last timestamp; holding"
    );
    next_in_tick(prev)
}

#[cold]
#[inline(never)]
fn cold_sequence_exhausted(prev: FlakeId) -> FlakeId {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        timestamp = prev.timestamp(),
        "sequence exhausted; advancing to next tick"
    );
    prev.rollover_to_timestamp(prev.timestamp() + 1)
}
