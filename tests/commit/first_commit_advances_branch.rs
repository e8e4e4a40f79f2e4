use crate::common::command::{
    cairn_commit, cairn_write_tree, get_head_commit_sha, get_parent_commit_id,
    populated_repository_dir, run_cairn_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn first_commit_advances_branch(
    populated_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = populated_repository_dir;

    let assert = cairn_commit(dir.path(), "Initial commit")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}$")?);
    let commit = crate::common::stdout_of(&assert)?;

    pretty_assertions::assert_eq!(
        std::fs::read_to_string(dir.path().join(".git/refs/heads/master"))?,
        format!("{commit}\n")
    );
    pretty_assertions::assert_eq!(get_head_commit_sha(dir.path())?, commit);
    pretty_assertions::assert_eq!(get_parent_commit_id(dir.path(), &commit)?, None);

    let tree = cairn_write_tree(dir.path())?;
    run_cairn_command(dir.path(), &["cat-file", "-p", &commit])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("tree {tree}\n")))
        .stdout(predicate::str::ends_with("\n\nInitial commit\n"));

    Ok(())
}
