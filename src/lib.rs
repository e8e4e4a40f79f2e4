//! cairn - a minimal content-addressable object store
//!
//! Payloads are stored as immutable objects named by the SHA-1 of their canonical
//! encoding. Directory snapshots (trees) and commit records are composed bottom-up
//! out of lower-level objects.
//!
//! - `areas`: on-disk areas of a repository (object database, refs, workspace)
//! - `artifacts`: object types and their encodings
//! - `commands`: plumbing and porcelain commands on top of a `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
