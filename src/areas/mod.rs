//! Core repository components
//!
//! - `database`: Object database storing blobs, trees, and commits
//! - `refs`: Reference management (HEAD and branches)
//! - `repository`: Repository root and coordination of the other areas
//! - `workspace`: Working directory access and tree snapshots

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
