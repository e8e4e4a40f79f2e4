use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create the metadata directory; re-running it keeps existing objects and HEAD
    pub fn init(&mut self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .git/refs/heads directory")?;

        if !self.refs().head_path().exists() {
            self.refs()
                .set_head(DEFAULT_BRANCH)
                .context("Failed to create initial HEAD reference")?;
        }

        tracing::info!(path = %self.git_path().display(), "initialized repository");
        write!(
            self.writer(),
            "Initialized empty Git repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}
