use crate::{FlakeId, HostId};

/// A minimal interface for generating Flake IDs.
///
/// Generation is infallible: the only fallible step, host resolution,
/// happens when the generator is constructed.
pub trait FlakeGenerator {
    /// Generates the next ID.
    ///
    /// Within one generator, `(timestamp, sequence)` never decreases and the
    /// host ID field is always [`FlakeGenerator::host_id`].
    fn next_id(&self) -> FlakeId;

    /// The host ID stamped into every generated ID.
    fn host_id(&self) -> HostId;
}
