use anyhow::Context;
use cairn::areas::repository::Repository;
use cairn::artifacts::identity::clock_from_env;
use cairn::commands::plumbing::cat_file::CatFileMode;
use clap::{ArgGroup, Parser, Subcommand};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cairn",
    version,
    about = "A minimal content-addressable object store",
    long_about = "Stores files, directory snapshots and commits as immutable, \
    content-addressed objects in a git-compatible `.git/objects` layout.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    /// Repository root (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the `.git` metadata directory in the repository root, \
        or in the given path relative to it."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, kind or size of an object",
        long_about = "This command prints information about an object in the repository. \
        It requires the ID of the object to be specified.",
        group(ArgGroup::new("mode").args(["pretty", "kind", "size"]).required(true))
    )]
    CatFile {
        #[arg(short = 'p', help = "Print the raw payload")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object kind")]
        kind: bool,
        #[arg(short = 's', help = "Print the payload size in bytes")]
        size: bool,
        #[arg(index = 1, help = "The object ID")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database",
        long_about = "This command computes the blob ID of a file's content and, with `-w`, \
        stores the blob in the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree object in stored order."
    )]
    LsTree {
        #[arg(long, help = "List only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree ID")]
        tree: String,
    },
    #[command(
        name = "write-tree",
        about = "Snapshot the working directory into tree objects",
        long_about = "This command stores every file below the repository root as a blob and \
        every directory as a tree, skipping `.git`, and prints the root tree's ID."
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object from a tree",
        long_about = "This command creates a commit for the given tree, with an optional parent. \
        The author is read from GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree ID")]
        tree: String,
        #[arg(short, long, help = "The parent commit ID")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: OsString,
    },
    #[command(
        name = "commit",
        about = "Record a snapshot of the working directory",
        long_about = "This command snapshots the working directory, creates a commit whose parent \
        is the current branch tip and advances the branch to it."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: OsString,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fatal: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let root = match cli.repo {
        Some(repo) => cwd.join(repo),
        None => cwd.clone(),
    };
    tracing::debug!(root = %root.display(), "resolved repository root");

    let open = |path: &Path| -> anyhow::Result<Repository> {
        Ok(Repository::new(path, Box::new(std::io::stdout()))?.with_clock(clock_from_env()))
    };

    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => root.join(path),
                None => root,
            };
            // init is the only command that may create the repository root
            std::fs::create_dir_all(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            open(&path)?.init()
        }
        Commands::CatFile {
            pretty: _,
            kind,
            size,
            object,
        } => {
            let mode = if kind {
                CatFileMode::Type
            } else if size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };
            open(&root)?.cat_file(&object, mode)
        }
        Commands::HashObject { write, file } => open(&root)?.hash_object(&cwd.join(file), write),
        Commands::LsTree { name_only, tree } => open(&root)?.ls_tree(&tree, name_only),
        Commands::WriteTree => open(&root)?.write_tree(),
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => open(&root)?.commit_tree(&tree, parent.as_deref(), message_bytes(&message)),
        Commands::Commit { message } => open(&root)?.commit(message_bytes(&message)),
    }
}

/// Commit messages are stored as given; argv is not required to be UTF-8
fn message_bytes(message: &OsStr) -> Vec<u8> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        message.as_bytes().to_vec()
    }
    #[cfg(not(unix))]
    {
        message.to_string_lossy().into_owned().into_bytes()
    }
}
