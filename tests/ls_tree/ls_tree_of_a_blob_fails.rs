use crate::common::HELLO_BLOB_OID;
use crate::common::command::{init_repository_dir, run_cairn_command};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn ls_tree_of_a_blob_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    dir.child("hello.txt").write_str("hello\n")?;
    run_cairn_command(dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    run_cairn_command(dir.path(), &["ls-tree", HELLO_BLOB_OID])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a tree"));

    Ok(())
}
