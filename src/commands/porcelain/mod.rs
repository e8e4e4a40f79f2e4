//! Porcelain commands (user-facing workflows)
//!
//! ## Commands
//!
//! - `init`: Create the metadata directory
//! - `commit`: Snapshot the working directory and advance the current branch

pub mod commit;
pub mod init;
