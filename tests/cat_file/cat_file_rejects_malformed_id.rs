use crate::common::command::{init_repository_dir, run_cairn_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case("not-hex")]
#[case("ce01362")]
#[case("zz013625030ba8dba906f756967f9e9ca394464a")]
fn cat_file_rejects_malformed_id(init_repository_dir: TempDir, #[case] object_id: &str) {
    run_cairn_command(init_repository_dir.path(), &["cat-file", "-p", object_id])
        .assert()
        .failure();
}
