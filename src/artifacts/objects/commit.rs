//! Commit object
//!
//! Commits represent snapshots of a directory at a specific point in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - An optional parent commit ID
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>          (omitted for root commits)
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! The message is always stored newline-terminated.

use crate::artifacts::identity::Identity;
use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::borrow::Cow;

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    pub fn new(identity: Identity, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name: identity.name,
            email: identity.email,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// `Name <email> <unix-seconds> <+hhmm>`
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

impl TryFrom<&str> for Author {
    type Error = ObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Split from the right: timezone and timestamp never contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(ObjectError::decode(format!("invalid author line {value:?}")));
        }

        let timezone = parts[0];
        let seconds = parts[1]
            .parse::<i64>()
            .map_err(|_| ObjectError::decode(format!("invalid timestamp {:?}", parts[1])))?;
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| ObjectError::decode("invalid author line: missing '<'"))?;
        let email_end = name_email
            .rfind('>')
            .filter(|&end| end > email_start)
            .ok_or_else(|| ObjectError::decode("invalid author line: missing '>'"))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        let offset = parse_timezone(timezone)?;
        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| ObjectError::decode(format!("timestamp {seconds} out of range")))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Parse a `+hhmm` / `-hhmm` offset
fn parse_timezone(timezone: &str) -> ObjectResult<FixedOffset> {
    let invalid = || ObjectError::decode(format!("invalid timezone {timezone:?}"));

    let (sign, digits) = match timezone.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => return Err(invalid()),
    };
    if digits.len() != 4 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours = digits[..2].parse::<i32>().map_err(|_| invalid())?;
    let minutes = digits[2..].parse::<i32>().map_err(|_| invalid())?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    committer: Author,
    /// Opaque bytes; only the headers have to be UTF-8
    message: Bytes,
}

impl Commit {
    /// Assemble a commit record; the identity is used for both author and committer
    pub fn build(
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        message: impl AsRef<[u8]>,
        identity: Identity,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        let author = Author::new(identity, timestamp);

        let mut message = message.as_ref().to_vec();
        if !message.ends_with(b"\n") {
            message.push(b'\n');
        }

        Commit {
            tree_oid,
            parent,
            author: author.clone(),
            committer: author,
            message: message.into(),
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// First line of the message, with invalid UTF-8 replaced
    pub fn short_message(&self) -> Cow<'_, str> {
        let first_line = self.message.split(|&byte| byte == b'\n').next().unwrap_or_default();

        String::from_utf8_lossy(first_line)
    }
}

impl Packable for Commit {
    fn payload(&self) -> Bytes {
        let mut content = format!("tree {}\n", self.tree_oid);
        if let Some(parent) = &self.parent {
            content.push_str(&format!("parent {parent}\n"));
        }
        content.push_str(&format!("author {}\n", self.author.display()));
        content.push_str(&format!("committer {}\n", self.committer.display()));
        content.push('\n');

        let mut payload = content.into_bytes();
        payload.extend_from_slice(&self.message);

        payload.into()
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: &[u8]) -> ObjectResult<Self> {
        let separator = payload
            .windows(2)
            .position(|pair| pair == b"\n\n")
            .ok_or_else(|| ObjectError::decode("commit object has no message separator"))?;
        let headers = std::str::from_utf8(&payload[..separator])
            .map_err(|_| ObjectError::decode("commit headers are not valid UTF-8"))?;
        let message = &payload[separator + 2..];
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| ObjectError::decode("commit object: missing tree line"))?;
        let tree_oid = ObjectId::try_parse(tree_oid)
            .map_err(|err| ObjectError::decode(format!("commit object: {err}")))?;

        let mut next_line = lines
            .next()
            .ok_or_else(|| ObjectError::decode("commit object: missing author line"))?;

        let mut parent = None;
        if let Some(parent_oid) = next_line.strip_prefix("parent") {
            // an empty parent value is read as a root commit
            let parent_oid = parent_oid.trim();
            if !parent_oid.is_empty() {
                parent = Some(
                    ObjectId::try_parse(parent_oid)
                        .map_err(|err| ObjectError::decode(format!("commit object: {err}")))?,
                );
            }

            next_line = lines
                .next()
                .ok_or_else(|| ObjectError::decode("commit object: missing author line"))?;
        }

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| ObjectError::decode("commit object: invalid author line"))?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| ObjectError::decode("commit object: missing committer line"))?;
        let committer = Author::try_from(committer)?;

        Ok(Commit {
            tree_oid,
            parent,
            author,
            committer,
            message: Bytes::copy_from_slice(message),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
