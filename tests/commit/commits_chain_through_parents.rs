use crate::common::command::{
    cairn_commit, get_head_commit_sha, get_parent_commit_id, init_repository_dir,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn commits_chain_through_parents(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    let mut commits: Vec<String> = Vec::new();

    for (index, message) in ["First commit", "Second commit", "Third commit"]
        .into_iter()
        .enumerate()
    {
        write_file(FileSpec::new(
            dir.path().join(format!("file{index}.txt")),
            format!("content {index}"),
        ));

        let assert = cairn_commit(dir.path(), message).assert().success();
        let commit = crate::common::stdout_of(&assert)?;

        pretty_assertions::assert_eq!(
            get_parent_commit_id(dir.path(), &commit)?,
            commits.last().cloned()
        );
        pretty_assertions::assert_eq!(get_head_commit_sha(dir.path())?, commit);
        commits.push(commit);
    }

    Ok(())
}
