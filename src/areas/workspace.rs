//! Working directory access and directory-to-tree snapshots

use crate::areas::database::Database;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name of the repository metadata directory, never part of a snapshot
pub const METADATA_DIR: &str = ".git";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

/// A directory whose entries are still being collected
#[derive(Debug, new)]
struct PendingTree {
    name: String,
    #[new(default)]
    entries: Vec<TreeEntry>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Read a file relative to the workspace root (absolute paths are used as-is)
    pub fn read_file(&self, file_path: &Path) -> ObjectResult<Bytes> {
        let file_path = self.path.join(file_path);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .map_err(|err| ObjectError::persistence(file_path, err))
    }

    /// Snapshot a directory into tree objects, returning the root tree's ID
    ///
    /// The walk is pre-order; each directory keeps a pending frame on an explicit
    /// stack and is stored as soon as the walk leaves it, so children are always
    /// stored before their parent and nesting depth does not grow the call stack.
    pub fn build_tree(&self, dir_path: &Path, database: &Database) -> ObjectResult<ObjectId> {
        let root = self.path.join(dir_path);
        if !root.is_dir() {
            return Err(ObjectError::invalid_input(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != METADATA_DIR);

        let mut stack: Vec<PendingTree> = Vec::new();

        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                ObjectError::persistence(path, err.into())
            })?;
            let depth = entry.depth();

            // everything deeper than this entry's parent is complete
            while stack.len() > depth {
                Self::close_tree(&mut stack, database)?;
            }

            if depth == 0 {
                stack.push(PendingTree::new(String::new()));
                continue;
            }

            let name = Self::entry_name(&entry)?;
            if entry.file_type().is_dir() {
                stack.push(PendingTree::new(name));
            } else {
                let (mode, oid) = self.store_leaf(&entry, database)?;
                tracing::trace!(%mode, %oid, path = %entry.path().display(), "snapshotted entry");

                if let Some(parent) = stack.last_mut() {
                    parent.entries.push(TreeEntry::new(mode, name, oid));
                }
            }
        }

        while stack.len() > 1 {
            Self::close_tree(&mut stack, database)?;
        }

        let root_tree = stack
            .pop()
            .ok_or_else(|| ObjectError::invalid_input("directory walk yielded no root"))?;
        let tree = Tree::from_entries(root_tree.entries)?;
        let oid = database.store(&tree)?;
        tracing::debug!(%oid, path = %root.display(), entries = tree.entries().len(), "stored root tree");

        Ok(oid)
    }

    /// Store the innermost pending directory and record it in its parent
    fn close_tree(stack: &mut Vec<PendingTree>, database: &Database) -> ObjectResult<()> {
        let Some(pending) = stack.pop() else {
            return Ok(());
        };

        let tree = Tree::from_entries(pending.entries)?;
        let oid = database.store(&tree)?;
        tracing::debug!(%oid, name = %pending.name, entries = tree.entries().len(), "stored tree");

        if let Some(parent) = stack.last_mut() {
            parent
                .entries
                .push(TreeEntry::new(EntryMode::Directory, pending.name, oid));
        }

        Ok(())
    }

    /// Store a file or symlink as a blob and classify its mode
    fn store_leaf(&self, entry: &DirEntry, database: &Database) -> ObjectResult<(EntryMode, ObjectId)> {
        let path = entry.path();
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            let target =
                std::fs::read_link(path).map_err(|err| ObjectError::persistence(path, err))?;
            let oid = database.put(ObjectType::Blob, target.as_os_str().as_encoded_bytes())?;

            return Ok((EntryMode::Symlink, oid));
        }

        if file_type.is_file() {
            let mode = if path.is_executable() {
                FileMode::Executable
            } else {
                FileMode::Regular
            };
            let content = self.read_file(path)?;
            let oid = database.put(ObjectType::Blob, &content)?;

            return Ok((mode.into(), oid));
        }

        Err(ObjectError::invalid_input(format!(
            "unsupported file type at {}",
            path.display()
        )))
    }

    fn entry_name(entry: &DirEntry) -> ObjectResult<String> {
        entry
            .file_name()
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ObjectError::invalid_input(format!(
                    "file name is not valid UTF-8: {}",
                    PathBuf::from(entry.file_name()).display()
                ))
            })
    }
}
