//! Canonical object encoding
//!
//! Every object is hashed and stored as `<kind> <payload-length>\0<payload>`.
//! The encoding is byte-exact: the length is written in decimal with no padding and
//! the kind is always lowercase, so any deviation yields a different object ID.

use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::OBJECT_ID_BYTES;
use bytes::Bytes;
use sha1::{Digest, Sha1};

pub trait Packable {
    /// Raw payload bytes, without the canonical header
    fn payload(&self) -> Bytes;
}

pub trait Unpackable {
    fn deserialize(payload: &[u8]) -> ObjectResult<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn serialize(&self) -> Bytes {
        encode(self.object_type(), &self.payload())
    }

    fn object_id(&self) -> ObjectId {
        digest(&self.serialize())
    }
}

/// Build the canonical encoding of a payload of the given kind
pub fn encode(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut encoded = Vec::with_capacity(header.len() + payload.len());
    encoded.extend_from_slice(header.as_bytes());
    encoded.extend_from_slice(payload);

    encoded.into()
}

/// SHA-1 of a canonical encoding
pub fn digest(encoded: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(encoded);

    let mut raw = [0u8; OBJECT_ID_BYTES];
    raw.copy_from_slice(&hasher.finalize());
    ObjectId::from_digest(&raw)
}

/// Split a canonical encoding back into its kind and payload
///
/// The declared length must match the payload that follows the header.
pub fn decode(encoded: Bytes) -> ObjectResult<(ObjectType, Bytes)> {
    let nul = encoded
        .iter()
        .position(|&byte| byte == 0)
        .ok_or_else(|| ObjectError::decode("missing NUL after object header"))?;

    let header = std::str::from_utf8(&encoded[..nul])
        .map_err(|_| ObjectError::decode("object header is not valid UTF-8"))?;
    let (kind, size) = header
        .split_once(' ')
        .ok_or_else(|| ObjectError::decode(format!("malformed object header {header:?}")))?;

    let object_type = ObjectType::try_from(kind)?;
    let size = size
        .parse::<usize>()
        .map_err(|_| ObjectError::decode(format!("non-numeric object length {size:?}")))?;

    let payload = encoded.slice(nul + 1..);
    if payload.len() != size {
        return Err(ObjectError::decode(format!(
            "object declares {size} bytes but carries {}",
            payload.len()
        )));
    }

    Ok((object_type, payload))
}
