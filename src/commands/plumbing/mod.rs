//! Plumbing commands (low-level object operations)
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob's ID and optionally store it
//! - `cat-file`: Print an object's payload, kind or size
//! - `ls-tree`: List the entries of a tree object
//! - `write-tree`: Snapshot the working directory into tree objects
//! - `commit-tree`: Create a commit object from a tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
