use crate::areas::repository::Repository;
use crate::artifacts::objects::error::ObjectResult;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::Write;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatFileMode {
    /// The raw payload
    #[default]
    Pretty,
    /// The object kind
    Type,
    /// The payload size in bytes
    Size,
}

impl Repository {
    /// Payload of a stored object, kind discarded
    pub fn cat(&self, object_id: &ObjectId) -> ObjectResult<Bytes> {
        let (_, payload) = self.database().get(object_id)?;

        Ok(payload)
    }

    pub fn cat_file(&mut self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let object_id = ObjectId::try_parse(object_id)?;

        match mode {
            CatFileMode::Pretty => {
                let payload = self.cat(&object_id)?;
                self.writer().write_all(&payload)?;
            }
            CatFileMode::Type => {
                let (object_type, _) = self.database().get(&object_id)?;
                writeln!(self.writer(), "{object_type}")?;
            }
            CatFileMode::Size => {
                let (_, payload) = self.database().get(&object_id)?;
                writeln!(self.writer(), "{}", payload.len())?;
            }
        }

        Ok(())
    }
}
