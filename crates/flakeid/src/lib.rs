//! Coordination-free, roughly time-ordered 64-bit identifiers.
//!
//! A [`FlakeId`] packs three fields, most-significant first:
//!
//! ```text
//!  Bit Index:  63             23 22             13 12             0
//!              +----------------+-----------------+---------------+
//!  Field:      | timestamp (41) |  host ID (10)   | sequence (13) |
//!              +----------------+-----------------+---------------+
//!              |<----- MSB ---------- 64 bits --------- LSB ----->|
//! ```
//!
//! The host ID is resolved once when a generator is built (see
//! [`HostResolver`]) and the timestamp is read from a [`TimeSource`] on every
//! call. Generators never fail after construction: clock regressions and
//! sequence exhaustion are absorbed by the sequencer.
//!
//! ```
//! use flakeid::{FixedHost, HostId, LockFlakeGenerator, SystemClock};
//!
//! let host = FixedHost::new(HostId::new(5).unwrap());
//! let generator = LockFlakeGenerator::new(&host, SystemClock::default()).unwrap();
//!
//! let a = generator.next_id();
//! let b = generator.next_id();
//! assert!(a < b);
//! assert_eq!(a.host_id(), 5);
//! ```

#[cfg(feature = "base62")]
pub mod base62;
mod error;
mod generator;
mod host;
mod id;
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::host::*;
pub use crate::id::*;
pub use crate::time::*;
