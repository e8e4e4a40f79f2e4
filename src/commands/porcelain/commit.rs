use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Snapshot the working directory and advance the current branch to the new commit
    pub fn commit(&mut self, message: impl AsRef<[u8]>) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let tree_id = self.build_tree(Path::new(""))?;
        let parent = self.refs().read_head()?;

        let commit_id = self.create_commit(tree_id, parent, message)?;
        self.refs().update_head(&commit_id)?;

        write!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
