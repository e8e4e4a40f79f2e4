use crate::areas::repository::Repository;
use crate::artifacts::objects::error::ObjectResult;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Snapshot a directory (relative to the repository root) into tree objects
    pub fn build_tree(&self, dir_path: &Path) -> ObjectResult<ObjectId> {
        self.workspace().build_tree(dir_path, self.database())
    }

    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let tree_id = self.build_tree(Path::new(""))?;
        write!(self.writer(), "{tree_id}")?;

        Ok(())
    }
}
