/// Errors raised while resolving the host identity of a generator.
///
/// These only surface at construction time. Once a generator exists,
/// [`FlakeGenerator::next_id`] cannot fail.
///
/// [`FlakeGenerator::next_id`]: crate::FlakeGenerator::next_id
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HostResolutionError {
    /// The OS random number generator could not supply a substitute address
    /// after both hostname lookup and the interface scan came up empty.
    #[error("failed to read random bytes for a fallback host address")]
    Entropy(#[source] rand::rand_core::OsError),

    /// An explicit host ID does not fit in the 10-bit host field.
    #[error("host id {0} exceeds the maximum of {max}", max = crate::FlakeId::MAX_HOST_ID)]
    OutOfRange(u64),
}

/// Errors that can occur while decoding a textual or binary projection of a
/// [`FlakeId`].
///
/// [`FlakeId`]: crate::FlakeId
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input (or the decoded payload) has the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Human readable description of the accepted length.
        expected: &'static str,
        /// The length that was observed.
        actual: usize,
    },

    /// The input contains a character outside the codec's alphabet.
    #[error("invalid byte 0x{byte:02x} at index {index}")]
    InvalidChar {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },
}
