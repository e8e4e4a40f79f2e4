use crate::common::command::{init_repository_dir, run_cairn_command};
use crate::common::{HELLO_BLOB_OID, stored_object_ids};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn hash_without_write_stores_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    dir.child("hello.txt").write_str("hello\n")?;

    run_cairn_command(dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout(predicate::eq(HELLO_BLOB_OID));

    assert!(stored_object_ids(dir.path()).is_empty());

    Ok(())
}
