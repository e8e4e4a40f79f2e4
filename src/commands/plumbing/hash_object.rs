use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Blob ID of a file's content, stored in the database only when `write` is set
    pub fn hash_file(&self, file_path: &Path, write: bool) -> anyhow::Result<ObjectId> {
        let content = self
            .workspace()
            .read_file(file_path)
            .with_context(|| format!("cannot read {}", file_path.display()))?;
        let blob = Blob::new(content);

        if !write {
            return Ok(blob.object_id());
        }

        self.ensure_initialized()?;
        Ok(self.database().store(&blob)?)
    }

    pub fn hash_object(&mut self, file_path: &Path, write: bool) -> anyhow::Result<()> {
        let object_id = self.hash_file(file_path, write)?;

        write!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
