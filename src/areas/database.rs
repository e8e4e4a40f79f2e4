//! Object database
//!
//! Objects live under `objects/<first-2-hex>/<remaining-38-hex>`, each file holding
//! the zlib-compressed canonical encoding. Writes are create-if-absent: an object
//! that is already present is never rewritten, and a new object only becomes
//! visible under its final name once it is fully written.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object::{Object, Unpackable, decode, digest, encode};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store an object, returning its ID
    pub fn store(&self, object: &impl Object) -> ObjectResult<ObjectId> {
        self.put(object.object_type(), &object.payload())
    }

    /// Store a payload of the given kind, returning its ID
    ///
    /// Storing the same content twice is a successful no-op.
    pub fn put(&self, object_type: ObjectType, payload: &[u8]) -> ObjectResult<ObjectId> {
        let encoded = encode(object_type, payload);
        let object_id = digest(&encoded);
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object_type, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, &encoded)?;
        tracing::debug!(oid = %object_id, kind = %object_type, size = payload.len(), "stored object");

        Ok(object_id)
    }

    /// Load an object's kind and payload
    pub fn get(&self, object_id: &ObjectId) -> ObjectResult<(ObjectType, Bytes)> {
        let encoded = self.read_object(object_id)?;

        decode(encoded)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> ObjectResult<Option<Blob>> {
        self.parse_object_as(object_id, ObjectType::Blob)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> ObjectResult<Option<Tree>> {
        self.parse_object_as(object_id, ObjectType::Tree)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> ObjectResult<Option<Commit>> {
        self.parse_object_as(object_id, ObjectType::Commit)
    }

    /// Parse the object if it has the expected kind, `None` otherwise
    fn parse_object_as<T: Unpackable>(
        &self,
        object_id: &ObjectId,
        expected: ObjectType,
    ) -> ObjectResult<Option<T>> {
        let (object_type, payload) = self.get(object_id)?;

        if object_type != expected {
            tracing::debug!(oid = %object_id, %object_type, %expected, "object kind mismatch");
            return Ok(None);
        }

        T::deserialize(&payload).map(Some)
    }

    fn read_object(&self, object_id: &ObjectId) -> ObjectResult<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        let object_content = std::fs::read(&object_path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ObjectError::NotFound(object_id.clone()),
            _ => ObjectError::persistence(&object_path, err),
        })?;

        Self::decompress(&object_content)
    }

    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> ObjectResult<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            ObjectError::invalid_input(format!("invalid object path {}", object_path.display()))
        })?;

        std::fs::create_dir_all(object_dir)
            .map_err(|err| ObjectError::persistence(object_dir, err))?;

        let object_content = Self::compress(object_content)
            .map_err(|err| ObjectError::persistence(object_path, err))?;

        // write next to the final location, then move into place without clobbering
        let mut temp_file = tempfile::Builder::new()
            .prefix("tmp-obj-")
            .tempfile_in(object_dir)
            .map_err(|err| ObjectError::persistence(object_dir, err))?;

        temp_file
            .write_all(&object_content)
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|err| ObjectError::persistence(temp_file.path(), err))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp_file
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o444))
                .map_err(|err| ObjectError::persistence(temp_file.path(), err))?;
        }

        match temp_file.persist_noclobber(object_path) {
            Ok(_) => Ok(()),
            Err(err) if err.error.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %object_path.display(), "object created concurrently");
                Ok(())
            }
            Err(err) => Err(ObjectError::persistence(object_path, err.error)),
        }
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;

        encoder.finish()
    }

    fn decompress(data: &[u8]) -> ObjectResult<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|err| ObjectError::decode(format!("unable to decompress object: {err}")))?;

        Ok(decompressed_content.into())
    }
}
