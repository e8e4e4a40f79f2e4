use crate::areas::repository::Repository;
use crate::artifacts::identity::Identity;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::error::ObjectResult;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use std::io::Write;

impl Repository {
    /// Format and store a commit; identity and timestamp are taken as given
    pub fn build_commit(
        &self,
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        message: impl AsRef<[u8]>,
        identity: Identity,
        timestamp: DateTime<FixedOffset>,
    ) -> ObjectResult<ObjectId> {
        let commit = Commit::build(tree_oid, parent, message, identity, timestamp);

        self.database().store(&commit)
    }

    /// Store a commit authored by the repository's identity at the clock's current time
    ///
    /// The tree must be a stored tree and the parent, if any, a stored commit.
    pub fn create_commit(
        &self,
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        message: impl AsRef<[u8]>,
    ) -> anyhow::Result<ObjectId> {
        if self.database().parse_object_as_tree(&tree_oid)?.is_none() {
            anyhow::bail!("{tree_oid} is not a tree");
        }
        if let Some(parent) = &parent
            && self.database().parse_object_as_commit(parent)?.is_none()
        {
            anyhow::bail!("{parent} is not a commit");
        }

        let identity = self
            .identity()
            .identity()
            .context("cannot determine commit author")?;
        identity.validate()?;
        let timestamp = self.clock().now();

        let commit_id = self.build_commit(tree_oid, parent.clone(), message, identity, timestamp)?;
        tracing::info!(oid = %commit_id, root = parent.is_none(), "created commit");

        Ok(commit_id)
    }

    pub fn commit_tree(
        &mut self,
        tree_oid: &str,
        parent: Option<&str>,
        message: impl AsRef<[u8]>,
    ) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let tree_oid = ObjectId::try_parse(tree_oid)?;
        // an empty parent argument stands for "no parent"
        let parent = parent
            .filter(|parent| !parent.trim().is_empty())
            .map(ObjectId::try_parse)
            .transpose()?;

        let commit_id = self.create_commit(tree_oid, parent, message)?;
        write!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
