//! Object types and their canonical encoding
//!
//! All content is stored as objects identified by SHA-1 hashes:
//!
//! - **Blob**: File content or a symlink target (raw bytes)
//! - **Tree**: Directory listing (modes, names, and object IDs)
//! - **Commit**: Snapshot with metadata (tree, optional parent, author, message)
//!
//! Every object is hashed and stored in the format `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod error;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_BYTES: usize = OBJECT_ID_LENGTH / 2;
