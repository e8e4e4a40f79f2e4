use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Errors surfaced by the object layer.
///
/// "Already exists" while creating an object is not represented here: it is the
/// normal deduplication signal and never leaves the database.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("object {0} not found")]
    NotFound(ObjectId),

    #[error("unable to decode object: {0}")]
    Decode(String),

    #[error("storage failure at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ObjectError {
    pub fn decode(reason: impl Into<String>) -> Self {
        ObjectError::Decode(reason.into())
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        ObjectError::InvalidInput(reason.into())
    }

    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ObjectError::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type ObjectResult<T> = Result<T, ObjectError>;
