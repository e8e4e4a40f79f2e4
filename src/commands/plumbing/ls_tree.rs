use crate::areas::repository::Repository;
use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use std::io::Write;

impl Repository {
    /// Parse a stored tree, entries in stored order
    pub fn read_tree(&self, object_id: &ObjectId) -> ObjectResult<Tree> {
        self.database()
            .parse_object_as_tree(object_id)?
            .ok_or_else(|| ObjectError::invalid_input(format!("{object_id} is not a tree")))
    }

    pub fn list_tree_names(&self, object_id: &ObjectId) -> ObjectResult<Vec<String>> {
        let tree = self.read_tree(object_id)?;

        Ok(tree.into_entries().map(|entry| entry.name).collect())
    }

    pub fn ls_tree(&mut self, object_id: &str, name_only: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let object_id = ObjectId::try_parse(object_id)?;

        if name_only {
            for name in self.list_tree_names(&object_id)? {
                writeln!(self.writer(), "{name}")?;
            }
        } else {
            let tree = self.read_tree(&object_id)?;
            let listing = tree.display();
            if !listing.is_empty() {
                writeln!(self.writer(), "{listing}")?;
            }
        }

        Ok(())
    }
}
