//! Command-line front end for checking and searching Pwned Passwords list files.
//!
//! Files are processed one at a time in the order given. A check keeps going
//! after a bad file and fails at the end; a search stops at the first match
//! or the first error.

pub mod error;
pub mod progress;

use std::io::Write;
use std::path::PathBuf;

use pwned_list::{FileMatch, NoProgress, RecordCount, SearchKey, check_file, list_paths_from_env, search_file};
use tracing::info;

pub use error::Error;
pub use progress::SpinnerProgress;

/// Uses `files` if any were given, otherwise the PWNED_PASSWORDS_FILES list.
pub fn resolve_files(files: Vec<PathBuf>) -> Result<Vec<PathBuf>, Error> {
    let files = if files.is_empty() { list_paths_from_env() } else { files };
    if files.is_empty() {
        return Err(Error::NoFiles);
    }
    Ok(files)
}

/// Checks each file, writing one status line per file to `out`.
pub fn run_check<W: Write>(out: &mut W, files: &[PathBuf], progress: bool) -> Result<(), Error> {
    let mut failed = 0usize;

    for path in files {
        write!(out, "checking file {:?}: ", path)?;
        out.flush()?;

        let result = if progress {
            let mut spinner = SpinnerProgress::new();
            let result = check_file(path, &mut spinner);
            spinner.finish();
            result
        } else {
            check_file(path, &mut NoProgress)
        };

        match result {
            Ok(count) => writeln!(out, "{} OK", RecordCount(count))?,
            Err(e) => {
                failed += 1;
                writeln!(out, "{}", e)?;
            }
        }
    }

    if failed > 0 {
        return Err(Error::CheckFailed { failed, total: files.len() });
    }
    Ok(())
}

/// Searches each file in turn for `key`, stopping at the first match.
/// Any error aborts the remaining files.
pub fn run_search<W: Write>(out: &mut W, files: &[PathBuf], key: &SearchKey) -> Result<Option<FileMatch>, Error> {
    info!(%key, files = files.len(), "searching");

    for path in files {
        write!(out, "searching file {:?}: ", path)?;
        out.flush()?;

        match search_file(path, key) {
            Ok(Some(found)) => {
                writeln!(out, "hash {} matched! (byte offset {})", found.ordinal(), found.byte_offset())?;
                return Ok(Some(FileMatch { path: path.clone(), found }));
            }
            Ok(None) => writeln!(out, "no match.")?,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                return Err(e.into());
            }
        }
    }

    Ok(None)
}
