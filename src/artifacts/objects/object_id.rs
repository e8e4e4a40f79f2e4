//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings of a 20-byte SHA-1
//! digest computed over an object's canonical encoding.
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use std::io;
use std::path::PathBuf;

/// Object identifier (SHA-1 digest in hex form)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from its hex form
    ///
    /// Uppercase digits are accepted and normalized to lowercase.
    pub fn try_parse(id: impl AsRef<str>) -> ObjectResult<Self> {
        let id = id.as_ref().trim();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectError::invalid_input(format!(
                "invalid object ID length {} for {:?}",
                id.len(),
                id
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ObjectError::invalid_input(format!(
                "invalid object ID characters: {id}"
            )));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a raw 20-byte digest
    pub fn from_digest(digest: &[u8; OBJECT_ID_BYTES]) -> Self {
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Raw 20-byte form, as embedded in tree entries
    pub fn to_digest(&self) -> [u8; OBJECT_ID_BYTES] {
        let mut digest = [0u8; OBJECT_ID_BYTES];

        // the hex form is validated on construction
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&self.0[2 * i..2 * i + 2], 16).unwrap_or_default();
        }

        digest
    }

    /// Read an object ID from binary format (20 bytes)
    ///
    /// Running out of input before 20 bytes are read is a decode error.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> ObjectResult<Self> {
        let mut digest = [0u8; OBJECT_ID_BYTES];

        reader.read_exact(&mut digest).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => ObjectError::decode("truncated object ID"),
            _ => ObjectError::decode(format!("unable to read object ID: {err}")),
        })?;

        Ok(Self::from_digest(&digest))
    }

    /// Convert to file system path for object storage
    ///
    /// `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}
