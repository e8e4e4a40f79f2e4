use crate::common::command::{repository_dir, run_cairn_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn write_tree_requires_initialized_repository(repository_dir: TempDir) {
    run_cairn_command(repository_dir.path(), &["write-tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a repository"));

    assert!(!repository_dir.path().join(".git").exists());
}
