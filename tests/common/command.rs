use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
/// `%Y-%m-%d %H:%M:%S %z`, 1672574400 seconds since the epoch
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_cairn_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// An initialized repository holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn populated_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let root = init_repository_dir.path();
    write_file(FileSpec::new(root.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(root.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        root.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    init_repository_dir
}

pub fn run_cairn_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("cairn").expect("Failed to find cairn binary");
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// A command run with a fixed author and date
pub fn run_cairn_command_as_author(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = run_cairn_command(dir, args);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

pub fn cairn_commit(dir: &Path, message: &str) -> Command {
    run_cairn_command_as_author(dir, &["commit", "-m", message])
}

pub fn cairn_write_tree(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let assert = run_cairn_command(dir, &["write-tree"]).assert().success();

    crate::common::stdout_of(&assert)
}

/// Current branch tip, following HEAD when it is symbolic
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".git").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".git").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}

/// Parent recorded in a commit object, if any
pub fn get_parent_commit_id(
    dir: &Path,
    commit_id: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let assert = run_cairn_command(dir, &["cat-file", "-p", commit_id])
        .assert()
        .success();
    let payload = crate::common::stdout_of(&assert)?;

    Ok(payload
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("parent "))
        .map(str::to_string))
}
