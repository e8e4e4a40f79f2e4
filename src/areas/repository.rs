use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::{METADATA_DIR, Workspace};
use crate::artifacts::identity::{Clock, EnvIdentity, IdentityProvider, SystemClock};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// A repository rooted at an explicit working directory
///
/// Every path the commands touch is derived from `path`; nothing is resolved
/// against the process's current directory.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    identity: Box<dyn IdentityProvider>,
    clock: Box<dyn Clock>,
}

impl Repository {
    /// Open a repository rooted at an existing directory; nothing is created on disk
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve repository root {}", path.display()))?;
        if !path.is_dir() {
            anyhow::bail!("repository root {} is not a directory", path.display());
        }

        let git_path = path.join(METADATA_DIR);
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
            identity: Box::new(EnvIdentity),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_identity(mut self, identity: Box<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn git_path(&self) -> Box<Path> {
        self.path.join(METADATA_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Fail unless the metadata directory has been initialized
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.git_path().is_dir() {
            anyhow::bail!(
                "not a repository: {} does not exist (run `cairn init` first)",
                self.git_path().display()
            );
        }

        Ok(())
    }
}
