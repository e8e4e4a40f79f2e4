//! References (HEAD and branches)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: containing a 40-character commit ID
//! - Symbolic: `ref: <path>` pointing to another reference (e.g. HEAD -> refs/heads/master)
//!
//! Ref files are replaced atomically: the new content is written to a temporary file
//! next to the ref and renamed over it.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch HEAD points to in a fresh repository
pub const DEFAULT_BRANCH: &str = "master";

/// Symbolic chains longer than this are treated as a loop
const MAX_SYMREF_DEPTH: usize = 5;

/// Path of a reference relative to the metadata directory, e.g. `refs/heads/master`
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    fn to_relative_path(&self) -> anyhow::Result<PathBuf> {
        let path = PathBuf::from(&self.0);

        if !path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            anyhow::bail!("invalid reference path {:?}", self.0);
        }

        Ok(path)
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsed content of a reference file
#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    SymRef(SymRefName),
    Oid(ObjectId),
}

impl SymRefOrOid {
    /// `None` when the file is missing or empty
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {}", path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(SymRefName::new(
                symref_match[1].trim().to_string(),
            ))))
        } else {
            let oid = ObjectId::try_parse(content)
                .with_context(|| format!("corrupt ref file at {}", path.display()))?;
            Ok(Some(SymRefOrOid::Oid(oid)))
        }
    }
}

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    /// Follow HEAD through symbolic references to the ref that holds a commit ID
    ///
    /// Returns HEAD itself when it is detached.
    pub fn current_ref(&self) -> anyhow::Result<SymRefName> {
        let mut current = SymRefName::new(HEAD_REF_NAME.to_string());

        for _ in 0..MAX_SYMREF_DEPTH {
            let path = self.path.join(current.to_relative_path()?);

            match SymRefOrOid::read_symref_or_oid(&path)? {
                Some(SymRefOrOid::SymRef(target)) => current = target,
                Some(SymRefOrOid::Oid(_)) | None => return Ok(current),
            }
        }

        anyhow::bail!("symbolic reference chain starting at HEAD is too deep")
    }

    /// Commit ID the current branch points to, `None` before the first commit
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        let current = self.current_ref()?;
        let path = self.path.join(current.to_relative_path()?);

        match SymRefOrOid::read_symref_or_oid(&path)? {
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            Some(SymRefOrOid::SymRef(_)) | None => Ok(None),
        }
    }

    /// Point the current branch (or a detached HEAD) at a new commit
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let current = self.current_ref()?;
        let path = self.path.join(current.to_relative_path()?);

        self.update_ref_file(&path, &format!("{oid}\n"))?;
        tracing::debug!(reference = %current, %oid, "updated reference");

        Ok(())
    }

    /// Make HEAD a symbolic reference to `refs/heads/<branch>`
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), &format!("ref: refs/heads/{branch}\n"))
    }

    fn update_ref_file(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("invalid ref path {}", path.display()))?;
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create parent directories for ref file at {}", path.display())
        })?;

        let mut temp_file = tempfile::Builder::new()
            .prefix("tmp-ref-")
            .tempfile_in(parent)
            .with_context(|| format!("failed to create temporary ref in {}", parent.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .with_context(|| format!("failed to write ref file at {}", path.display()))?;
        temp_file
            .persist(path)
            .with_context(|| format!("failed to replace ref file at {}", path.display()))?;

        Ok(())
    }
}
