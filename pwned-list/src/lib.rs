//! Tools for the Have I Been Pwned "ordered by hash" SHA-1 password list.
//!
//! The list is a text file of fixed 42-byte records: 40 uppercase hex
//! characters followed by CR LF, sorted ascending. Because every record has
//! the same width, record N lives at byte offset N * 42 and the file can be
//! searched in O(log n) seeks without ever being loaded into memory.
//!
//! Two operations are provided:
//!
//! - [`check_file`] streams a file and verifies every record is well formed,
//!   stopping at the first violation.
//! - [`search_file`] binary searches a file for a single hash.

pub mod check;
pub mod error;
pub mod record;
pub mod search;

use std::path::PathBuf;

pub use check::{NoProgress, ProgressCadence, ProgressReporter, RecordCount, check_file, check_reader};
pub use error::{Error, Result};
pub use record::{KEY_LEN, RECORD_SIZE, SearchKey, Violation, check_record, is_valid_record, record_key};
pub use search::{FileMatch, Match, search_file, search_reader};

/// Environment variable holding the default list file(s), separated like `PATH`.
pub const PWNED_FILES_ENV: &str = "PWNED_PASSWORDS_FILES";

/// Returns the list files named by the PWNED_PASSWORDS_FILES environment
/// variable, or an empty list if it is unset.
pub fn list_paths_from_env() -> Vec<PathBuf> {
    std::env::var_os(PWNED_FILES_ENV)
        .map(|paths| std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()).collect())
        .unwrap_or_default()
}
