use crate::common::command::{cairn_write_tree, init_repository_dir, run_cairn_command_as_author};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn commit_tree_does_not_move_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let tree = cairn_write_tree(dir.path())?;

    run_cairn_command_as_author(dir.path(), &["commit-tree", &tree, "-m", "detached"])
        .assert()
        .success();

    assert!(!dir.path().join(".git/refs/heads/master").exists());
    pretty_assertions::assert_eq!(
        std::fs::read_to_string(dir.path().join(".git/HEAD"))?,
        "ref: refs/heads/master\n"
    );

    Ok(())
}
