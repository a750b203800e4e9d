use pwned_list::PWNED_FILES_ENV;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    List(#[from] pwned_list::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No list files given. Pass them as arguments or set {}.", PWNED_FILES_ENV)]
    NoFiles,

    #[error("{failed} of {total} files failed the check")]
    CheckFailed { failed: usize, total: usize },
}
