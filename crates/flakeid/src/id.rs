use crate::{DecodeError, FLAKE_EPOCH};
use core::fmt;

/// A 64-bit Flake ID.
///
/// - 41 bits timestamp (ms since [`FLAKE_EPOCH`])
/// - 10 bits host ID
/// - 13 bits sequence
///
/// ```text
///  Bit Index:  63             23 22             13 12             0
///              +----------------+-----------------+---------------+
///  Field:      | timestamp (41) |  host ID (10)   | sequence (13) |
///              +----------------+-----------------+---------------+
///              |<----- MSB ---------- 64 bits --------- LSB ----->|
/// ```
///
/// Ordering and equality are those of the raw integer, so IDs from one
/// generator sort by `(timestamp, sequence)`.
///
/// # Example
///
/// ```
/// use flakeid::FlakeId;
///
/// let id = FlakeId::from_components(1000, 5, 2);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.host_id(), 5);
/// assert_eq!(id.sequence(), 2);
/// assert_eq!(id.to_raw(), (1000 << 23) | (5 << 13) | 2);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlakeId {
    id: u64,
}

impl FlakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 41;

    /// Width of the host ID field.
    pub const HOST_ID_BITS: u32 = 10;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 13;

    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 23
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 10-bit host ID field. Occupies bits 13
    /// through 22.
    pub const HOST_ID_MASK: u64 = (1 << Self::HOST_ID_BITS) - 1;

    /// Bitmask for extracting the 13-bit sequence field. Occupies bits 0
    /// through 12.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 23).
    pub const TIMESTAMP_SHIFT: u32 = Self::HOST_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the host ID to its correct position (bit 13).
    pub const HOST_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    pub const MAX_TIMESTAMP: u64 = Self::TIMESTAMP_MASK;
    pub const MAX_HOST_ID: u64 = Self::HOST_ID_MASK;
    pub const MAX_SEQUENCE: u64 = Self::SEQUENCE_MASK;

    /// Packs the three fields into an ID. Each value is masked to its field
    /// width, so out-of-range input never bleeds into a neighbouring field.
    pub const fn from_components(timestamp: u64, host_id: u64, sequence: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let host_id = (host_id & Self::HOST_ID_MASK) << Self::HOST_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | host_id | sequence,
        }
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the host ID from the packed ID.
    pub const fn host_id(&self) -> u64 {
        (self.id >> Self::HOST_ID_SHIFT) & Self::HOST_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// The timestamp field as milliseconds since the Unix epoch, assuming the
    /// ID was produced against [`FLAKE_EPOCH`].
    pub const fn unix_millis(&self) -> u64 {
        self.timestamp() + FLAKE_EPOCH.as_millis() as u64
    }

    /// Returns true if the sequence can be incremented within the current
    /// tick.
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::MAX_SEQUENCE
    }

    /// Returns a new ID with the sequence incremented.
    pub const fn increment_sequence(&self) -> Self {
        Self::from_components(self.timestamp(), self.host_id(), self.sequence() + 1)
    }

    /// Returns a new ID for a newer timestamp with sequence reset to zero.
    pub const fn rollover_to_timestamp(&self, timestamp: u64) -> Self {
        Self::from_components(timestamp, self.host_id(), 0)
    }

    /// The little-endian byte projection of the raw value.
    pub const fn to_le_bytes(&self) -> [u8; 8] {
        self.id.to_le_bytes()
    }

    pub const fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self::from_raw(u64::from_le_bytes(bytes))
    }

    /// Decodes the little-endian projection from a slice, which must be
    /// exactly 8 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidLength`] for any other length.
    pub fn try_from_le_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let bytes: [u8; 8] = bytes.try_into().map_err(|_| DecodeError::InvalidLength {
            expected: "8 bytes",
            actual: bytes.len(),
        })?;
        Ok(Self::from_le_bytes(bytes))
    }

    /// Returns the ID as 16 zero-padded lowercase hexadecimal digits.
    pub fn to_hex(&self) -> String {
        format!("{self:016x}")
    }

    /// Parses 1 to 16 hexadecimal digits (either case) into an ID.
    ///
    /// Shorter, unpadded input is accepted so values printed without
    /// padding still round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidLength`] for empty or over-long input
    /// and [`DecodeError::InvalidChar`] for anything that is not a hex digit.
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        if s.is_empty() || s.len() > 16 {
            return Err(DecodeError::InvalidLength {
                expected: "1 to 16 hex digits",
                actual: s.len(),
            });
        }
        let mut raw = 0u64;
        for (index, byte) in s.bytes().enumerate() {
            let digit = match byte {
                b'0'..=b'9' => byte - b'0',
                b'a'..=b'f' => byte - b'a' + 10,
                b'A'..=b'F' => byte - b'A' + 10,
                _ => return Err(DecodeError::InvalidChar { byte, index }),
            };
            raw = (raw << 4) | u64::from(digit);
        }
        Ok(Self::from_raw(raw))
    }

    /// Returns the ID as a zero-padded 20-digit decimal string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<u64> for FlakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<FlakeId> for u64 {
    fn from(id: FlakeId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::LowerHex for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.id, f)
    }
}

impl fmt::UpperHex for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.id, f)
    }
}

impl fmt::Debug for FlakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlakeId")
            .field("id", &format_args!("0x{:016x}", self.id))
            .field("timestamp", &self.timestamp())
            .field("host_id", &self.host_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
