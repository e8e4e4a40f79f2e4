//! Object model
//!
//! - `identity`: commit identity and clock sources
//! - `objects`: object types (blob, tree, commit) and the canonical encoding

pub mod identity;
pub mod objects;
