//! Streaming format check over a whole list file.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{RECORD_SIZE, Record, check_record};

/// Read buffer for file checks. Large enough to amortise syscalls, fixed so
/// memory stays constant regardless of file size.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Receives the running record count while a file is being checked.
pub trait ProgressReporter {
    fn report(&mut self, records: u64);
}

/// Discards progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    #[inline(always)]
    fn report(&mut self, _records: u64) {}
}

/// Decides which counts are worth reporting: every record up to 1000, then
/// every thousand up to a million, then every million.
#[derive(Debug, Clone, Copy)]
pub struct ProgressCadence {
    every: u64,
}

impl Default for ProgressCadence {
    fn default() -> Self {
        Self { every: 1 }
    }
}

impl ProgressCadence {
    const MAX_STEP: u64 = 1_000_000;

    /// Returns true if `count` should be reported. Counts must be fed in
    /// increasing order.
    pub fn tick(&mut self, count: u64) -> bool {
        if count % self.every != 0 {
            return false;
        }
        if count / self.every == 1000 && self.every < Self::MAX_STEP {
            self.every *= 1000;
        }
        true
    }
}

/// A record count rendered with a K or M suffix once it gets large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCount(pub u64);

impl fmt::Display for RecordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            n if n >= 1_000_000 => write!(f, "{}M", n / 1_000_000),
            n if n >= 1000 => write!(f, "{}K", n / 1000),
            n => write!(f, "{}", n),
        }
    }
}

/// Fills `buf` with up to one record, retrying on interruption. Returns the
/// number of bytes read; fewer than RECORD_SIZE means the stream ended.
fn fill_record<R: Read>(reader: &mut R, buf: &mut Record) -> io::Result<usize> {
    let mut total = 0usize;
    while total < RECORD_SIZE {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Checks that a stream consists solely of well-formed records.
///
/// Returns the number of records on success. Stops at the first malformed
/// record, reporting its 1-based index. A stream that ends partway through a
/// record fails with [`Error::Truncated`].
pub fn check_reader<R: Read>(mut reader: R, progress: &mut dyn ProgressReporter) -> Result<u64> {
    let mut buf: Record = [0u8; RECORD_SIZE];
    let mut cadence = ProgressCadence::default();
    let mut count = 0u64;

    loop {
        match fill_record(&mut reader, &mut buf)? {
            0 => return Ok(count),
            RECORD_SIZE => {}
            trailing => return Err(Error::Truncated { records: count, trailing }),
        }

        let index = count + 1;
        if let Err(violation) = check_record(&buf) {
            warn!(index, ?violation, "malformed record");
            return Err(violation.at(index));
        }
        count = index;

        if cadence.tick(count) {
            progress.report(count);
        }
    }
}

/// Opens `path` and checks every record in it. The file is closed on return.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn check_file(path: &Path, progress: &mut dyn ProgressReporter) -> Result<u64> {
    let file = File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    debug!(size = file.metadata()?.len(), "checking file");

    let count = check_reader(BufReader::with_capacity(READ_BUFFER_SIZE, file), progress)?;
    debug!(count, "file ok");
    Ok(count)
}
