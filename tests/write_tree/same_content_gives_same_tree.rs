use crate::common::command::{cairn_write_tree, run_cairn_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;

#[test]
fn same_content_gives_same_tree() -> Result<(), Box<dyn std::error::Error>> {
    let files = [("z.txt", "last"), ("m/inner.txt", "middle"), ("a.txt", "first")];

    let forward = TempDir::new()?;
    let backward = TempDir::new()?;
    for dir in [&forward, &backward] {
        run_cairn_command(dir.path(), &["init"]).assert().success();
    }
    for (name, content) in files {
        write_file(FileSpec::new(forward.path().join(name), content.to_string()));
    }
    for (name, content) in files.iter().rev() {
        write_file(FileSpec::new(backward.path().join(name), content.to_string()));
    }

    let first = cairn_write_tree(forward.path())?;
    pretty_assertions::assert_eq!(cairn_write_tree(forward.path())?, first);
    pretty_assertions::assert_eq!(cairn_write_tree(backward.path())?, first);

    Ok(())
}
