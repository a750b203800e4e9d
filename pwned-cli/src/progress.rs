use indicatif::{ProgressBar, ProgressStyle};
use pwned_list::{ProgressReporter, RecordCount};

/// Renders the running record count of a check in place on stderr.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg} records")
                .expect("Invalid progress bar template"),
        );
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for SpinnerProgress {
    fn report(&mut self, records: u64) {
        self.bar.set_message(RecordCount(records).to_string());
    }
}
