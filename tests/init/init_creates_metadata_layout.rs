use crate::common::command::{repository_dir, run_cairn_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_creates_metadata_layout(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = repository_dir.path().canonicalize()?.join(".git");

    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Initialized empty Git repository in "))
        .stdout(predicate::str::contains(git_dir.display().to_string()));

    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").join("heads").is_dir());
    pretty_assertions::assert_eq!(
        std::fs::read_to_string(git_dir.join("HEAD"))?,
        "ref: refs/heads/master\n"
    );

    Ok(())
}
