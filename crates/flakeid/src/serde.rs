//! `#[serde(with = ...)]` adapters for [`FlakeId`] fields.
//!
//! ```
//! use flakeid::{FlakeId, serde::as_hex};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Row {
//!     #[serde(with = "as_hex")]
//!     id: FlakeId,
//! }
//! ```
//!
//! [`FlakeId`]: crate::FlakeId

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::FlakeId;

    /// Serialize an ID as its native `u64` representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &FlakeId, s: S) -> Result<S::Ok, S::Error> {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its native `u64` representation. Every `u64` is
    /// a structurally valid ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<FlakeId, D::Error> {
        u64::deserialize(d).map(FlakeId::from_raw)
    }
}

pub mod as_hex {
    use super::{Deserializer, Serializer};
    use crate::FlakeId;

    /// Serialize an ID as 16 lowercase hexadecimal digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &FlakeId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&id.to_hex())
    }

    /// Deserialize an ID from hexadecimal text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not 1 to 16 hexadecimal digits.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<FlakeId, D::Error> {
        d.deserialize_str(super::TextVisitor {
            expecting: "a hexadecimal flake id",
            decode: FlakeId::from_hex,
        })
    }
}

#[cfg(feature = "base62")]
pub mod as_base62 {
    use super::{Deserializer, Serializer};
    use crate::FlakeId;

    /// Serialize an ID as base62 text of its little-endian bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &FlakeId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&id.to_base62())
    }

    /// Deserialize an ID from base62 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the text does
    /// not decode to exactly 8 bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<FlakeId, D::Error> {
        d.deserialize_str(super::TextVisitor {
            expecting: "a base62 flake id",
            decode: FlakeId::from_base62,
        })
    }
}

struct TextVisitor {
    expecting: &'static str,
    decode: fn(&str) -> Result<crate::FlakeId, crate::DecodeError>,
}

impl serde::de::Visitor<'_> for TextVisitor {
    type Value = crate::FlakeId;

    fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
        formatter.write_str(self.expecting)
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        (self.decode)(v).map_err(serde::de::Error::custom)
    }
}
