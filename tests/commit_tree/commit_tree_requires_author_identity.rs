use crate::common::command::{cairn_write_tree, init_repository_dir, run_cairn_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_tree_requires_author_identity(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let tree = cairn_write_tree(dir.path())?;

    run_cairn_command(dir.path(), &["commit-tree", &tree, "-m", "anonymous"])
        .env_remove("GIT_AUTHOR_NAME")
        .env_remove("GIT_AUTHOR_EMAIL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GIT_AUTHOR_NAME"));

    Ok(())
}
