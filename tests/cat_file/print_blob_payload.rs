use crate::common::command::{init_repository_dir, run_cairn_command};
use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteBin, PathChild};
use rstest::rstest;

#[rstest]
fn print_blob_payload(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir;
    // binary content survives untouched, including NUL and a missing trailing newline
    let content: &[u8] = b"\x00\x01binary\xffpayload";
    dir.child("data.bin").write_binary(content)?;

    let assert = run_cairn_command(dir.path(), &["hash-object", "-w", "data.bin"])
        .assert()
        .success();
    let oid = crate::common::stdout_of(&assert)?;

    run_cairn_command(dir.path(), &["cat-file", "-p", &oid])
        .assert()
        .success()
        .stdout(content);

    Ok(())
}
