use crate::common::command::{init_repository_dir, run_cairn_command};
use crate::common::stored_object_ids;
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use rstest::rstest;

#[rstest]
fn hashing_twice_stores_one_object(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    dir.child("first.txt").write_str("same content")?;
    dir.child("second.txt").write_str("same content")?;

    let first = run_cairn_command(dir.path(), &["hash-object", "-w", "first.txt"])
        .assert()
        .success();
    let object_path = dir.path().join(".git").join("objects");
    let before = stored_object_ids(dir.path());
    let stored_bytes = std::fs::read(
        object_path
            .join(&before[0][..2])
            .join(&before[0][2..]),
    )?;

    let second = run_cairn_command(dir.path(), &["hash-object", "-w", "second.txt"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(
        first.get_output().stdout,
        second.get_output().stdout
    );
    pretty_assertions::assert_eq!(stored_object_ids(dir.path()), before);
    pretty_assertions::assert_eq!(
        std::fs::read(object_path.join(&before[0][..2]).join(&before[0][2..]))?,
        stored_bytes
    );

    Ok(())
}
