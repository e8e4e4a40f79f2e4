use crate::common::command::{init_repository_dir, run_cairn_command};
use crate::common::{EMPTY_TREE_OID, stored_object_ids};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn empty_repository_writes_empty_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_cairn_command(dir.path(), &["write-tree"])
        .assert()
        .success()
        .stdout(predicate::eq(EMPTY_TREE_OID));

    pretty_assertions::assert_eq!(stored_object_ids(dir.path()), vec![EMPTY_TREE_OID]);
}
