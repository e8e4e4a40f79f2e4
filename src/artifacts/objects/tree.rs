//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files and symlinks
//! (blobs) and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries built through [`Tree::from_entries`] are sorted by ascending byte order of
//! their names, so two directories with the same content always serialize to the same
//! bytes. Trees read back from the database keep the order they were stored in.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

/// A single `(mode, name, oid)` record of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries given in any order
    ///
    /// Names must be single, non-empty path segments and unique within the tree.
    pub fn from_entries(entries: impl IntoIterator<Item = TreeEntry>) -> ObjectResult<Self> {
        let mut entries = entries.into_iter().collect::<Vec<_>>();

        for entry in &entries {
            if entry.name.is_empty()
                || entry.name == "."
                || entry.name == ".."
                || entry.name.contains(['/', '\0'])
            {
                return Err(ObjectError::invalid_input(format!(
                    "invalid tree entry name {:?}",
                    entry.name
                )));
            }
        }

        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

        if let Some(pair) = entries.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(ObjectError::invalid_input(format!(
                "duplicate tree entry name {:?}",
                pair[0].name
            )));
        }

        Ok(Tree { entries })
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> impl Iterator<Item = TreeEntry> {
        self.entries.into_iter()
    }

    /// Entry names in stored order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// One `<mode> <kind> <oid>\t<name>` line per entry
    pub fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode,
                    entry.mode.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Packable for Tree {
    fn payload(&self) -> Bytes {
        let mut content = Vec::new();

        for entry in &self.entries {
            content.extend_from_slice(entry.mode.as_str().as_bytes());
            content.push(b' ');
            content.extend_from_slice(entry.name.as_bytes());
            content.push(0);
            content.extend_from_slice(&entry.oid.to_digest());
        }

        content.into()
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: &[u8]) -> ObjectResult<Self> {
        let mut entries = Vec::new();
        let mut rest = payload;

        while !rest.is_empty() {
            let nul = rest
                .iter()
                .position(|&byte| byte == 0)
                .ok_or_else(|| ObjectError::decode("unexpected EOF in tree entry header"))?;

            let header = std::str::from_utf8(&rest[..nul])
                .map_err(|_| ObjectError::decode("tree entry header is not valid UTF-8"))?;
            let (mode, name) = header.split_once(' ').ok_or_else(|| {
                ObjectError::decode(format!("malformed tree entry header {header:?}"))
            })?;
            let mode = EntryMode::try_from(mode)?;

            rest = &rest[nul + 1..];
            let oid = ObjectId::read_h40_from(&mut rest)?;

            entries.push(TreeEntry::new(mode, name.to_string(), oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
