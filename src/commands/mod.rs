//! Command implementations
//!
//! Every command is an `impl Repository` block, split the way git splits its own
//! surface:
//!
//! - `plumbing`: direct object manipulation (hash-object, cat-file, ls-tree, write-tree,
//!   commit-tree)
//! - `porcelain`: user-facing workflows (init, commit)
//!
//! Commands come in pairs where it matters: a core method returning a typed value, and
//! the command method that calls it and prints the result to the repository writer.

pub mod plumbing;
pub mod porcelain;
