use std::io;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use pwned_cli::{Error, resolve_files, run_check, run_search};
use pwned_list::SearchKey;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pwned")]
#[command(about = "A tool to search the Pwned Password list efficiently")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks files to be the correct Pwned Password list format
    Check {
        /// Show progress within the files
        #[arg(short, long)]
        progress: bool,

        /// List files (default: $PWNED_PASSWORDS_FILES)
        files: Vec<PathBuf>,
    },

    /// Runs a binary search for a hash in the Pwned Password list
    Search {
        #[command(flatten)]
        target: Target,

        /// List files (default: $PWNED_PASSWORDS_FILES)
        files: Vec<PathBuf>,
    },
}

/// What to search for. Exactly one of the two must be given.
#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    /// SHA-1 hash to look for, in hexadecimal notation
    #[arg(long, value_parser = SearchKey::parse)]
    hash: Option<SearchKey>,

    /// Plaintext password to hash and look for
    #[arg(long)]
    password: Option<String>,
}

impl Target {
    fn into_key(self) -> SearchKey {
        let Target { hash, password } = self;
        hash.unwrap_or_else(|| SearchKey::from_password(password.as_deref().unwrap_or_default()))
    }
}

fn main() -> Result<(), Error> {
    // Logs go to stderr; stdout carries the per-file status lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();
    let mut out = io::stdout().lock();

    match args.command {
        Command::Check { progress, files } => {
            let files = resolve_files(files)?;
            run_check(&mut out, &files, progress)
        }
        Command::Search { target, files } => {
            let files = resolve_files(files)?;
            run_search(&mut out, &files, &target.into_key()).map(|_| ())
        }
    }
}
