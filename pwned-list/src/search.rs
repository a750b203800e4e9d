//! Binary search over a sorted list file using positioned reads.
//!
//! The file is treated as an array of fixed-size records: record N is at byte
//! offset N * 42, so each probe is a single seek plus a 42-byte read and the
//! file is never loaded into memory.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::record::{RECORD_SIZE, Record, SearchKey, record_key};

/// The position of a matching record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// 0-based record index.
    pub index: u64,
}

impl Match {
    /// 1-based line number of the record.
    pub fn ordinal(&self) -> u64 {
        self.index + 1
    }

    pub fn byte_offset(&self) -> u64 {
        self.index * RECORD_SIZE as u64
    }
}

/// A match together with the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    pub path: PathBuf,
    pub found: Match,
}

#[inline]
fn read_record_at<R: Read + Seek>(reader: &mut R, index: u64, buf: &mut Record) -> Result<()> {
    reader.seek(SeekFrom::Start(index * RECORD_SIZE as u64))?;
    reader.read_exact(buf)?;
    Ok(())
}

/// Binary searches a sorted stream of `len` bytes for `key`.
///
/// Converges on the first record whose key is not less than `key`, then
/// re-reads that record to test for an exact match. Any seek or read failure
/// aborts the search.
pub fn search_reader<R: Read + Seek>(reader: &mut R, len: u64, key: &SearchKey) -> Result<Option<Match>> {
    if len % RECORD_SIZE as u64 != 0 {
        return Err(Error::Misaligned { size: len });
    }

    let record_count = len / RECORD_SIZE as u64;
    let search_key = key.as_bytes();
    let mut buf: Record = [0u8; RECORD_SIZE];
    let mut low = 0u64;
    let mut high = record_count;

    while low < high {
        let mid = low + (high - low) / 2;
        read_record_at(reader, mid, &mut buf)?;
        trace!(mid, low, high, "probe");

        if record_key(&buf) < search_key {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    // Every key is smaller than the target.
    if low == record_count {
        return Ok(None);
    }

    read_record_at(reader, low, &mut buf)?;
    Ok((record_key(&buf) == search_key).then_some(Match { index: low }))
}

/// Opens `path` and binary searches it for `key`. The file is closed on return.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display(), key = %key))]
pub fn search_file(path: &Path, key: &SearchKey) -> Result<Option<Match>> {
    let mut file = File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    let len = file.metadata()?.len();
    debug!(len, records = len / RECORD_SIZE as u64, "searching file");

    let found = search_reader(&mut file, len, key)?;
    debug!(?found, "search finished");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    fn key(c: char) -> SearchKey {
        SearchKey::parse(&c.to_string().repeat(40)).unwrap()
    }

    fn list_from(keys: &[SearchKey]) -> Vec<u8> {
        keys.iter().flat_map(|k| [k.as_bytes().as_slice(), b"\r\n".as_slice()].concat()).collect()
    }

    fn search(data: &[u8], key: &SearchKey) -> Result<Option<Match>> {
        search_reader(&mut Cursor::new(data), data.len() as u64, key)
    }

    /// Counts the seeks issued against the wrapped stream.
    struct CountingSeeks<R> {
        inner: R,
        seeks: u32,
    }

    impl<R: Read> Read for CountingSeeks<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl<R: Seek> Seek for CountingSeeks<R> {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.seeks += 1;
            self.inner.seek(pos)
        }
    }

    struct BrokenSeek;

    impl Read for BrokenSeek {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Ok(0)
        }
    }

    impl Seek for BrokenSeek {
        fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
            Err(io::Error::other("seek failed"))
        }
    }

    #[test]
    fn test_three_records() {
        let data = list_from(&[key('A'), key('B'), key('C')]);

        assert_eq!(search(&data, &key('B')).unwrap(), Some(Match { index: 1 }));
        assert_eq!(search(&data, &key('A')).unwrap(), Some(Match { index: 0 }));
        assert_eq!(search(&data, &key('C')).unwrap(), Some(Match { index: 2 }));
        assert_eq!(search(&data, &key('D')).unwrap(), None);
        assert_eq!(search(&data, &key('0')).unwrap(), None);
    }

    #[test]
    fn test_match_position() {
        let found = Match { index: 1 };
        assert_eq!(found.ordinal(), 2);
        assert_eq!(found.byte_offset(), 42);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(search(&[], &key('A')).unwrap(), None);
    }

    #[test]
    fn test_single_record() {
        let data = list_from(&[key('5')]);
        assert_eq!(search(&data, &key('5')).unwrap(), Some(Match { index: 0 }));
        assert_eq!(search(&data, &key('0')).unwrap(), None);
        assert_eq!(search(&data, &key('F')).unwrap(), None);
    }

    #[test]
    fn test_misaligned_length() {
        let data = list_from(&[key('A')]);
        let err = search(&data[..41], &key('A')).unwrap_err();
        assert!(matches!(err, Error::Misaligned { size: 41 }));
    }

    #[test]
    fn test_every_index_found_and_gaps_missed() {
        // Even values only, so every odd value falls between two records.
        let keys: Vec<SearchKey> =
            (0..257u64).map(|i| SearchKey::parse(&format!("{:040X}", i * 2)).unwrap()).collect();
        let data = list_from(&keys);

        for (i, k) in keys.iter().enumerate() {
            assert_eq!(search(&data, k).unwrap(), Some(Match { index: i as u64 }));
        }
        for i in 0..=257u64 {
            let gap = SearchKey::parse(&format!("{:040X}", i * 2 + 1)).unwrap();
            assert_eq!(search(&data, &gap).unwrap(), None);
        }
    }

    #[test]
    fn test_probe_count_is_logarithmic() {
        for n in [1u64, 2, 3, 7, 8, 9, 100, 1000, 1024, 4097] {
            let keys: Vec<SearchKey> =
                (0..n).map(|i| SearchKey::parse(&format!("{:040X}", i * 2)).unwrap()).collect();
            let data = list_from(&keys);
            let bound = (n as f64).log2().ceil() as u32 + 1;

            for target in [0, n / 2, n - 1, n + 3] {
                for value in [target * 2, target * 2 + 1] {
                    let k = SearchKey::parse(&format!("{:040X}", value)).unwrap();
                    let mut reader = CountingSeeks { inner: Cursor::new(&data), seeks: 0 };
                    search_reader(&mut reader, data.len() as u64, &k).unwrap();

                    // The confirming re-read only happens when some key is >= the target,
                    // and it is not a bisection probe.
                    let confirmed = value <= (n - 1) * 2;
                    let probes = reader.seeks - u32::from(confirmed);
                    assert!(probes <= bound, "n={n} value={value} probes={probes} bound={bound}");
                }
            }
        }
    }

    #[test]
    fn test_target_above_every_key_skips_confirming_read() {
        let data = list_from(&[key('1'), key('2'), key('3'), key('4')]);
        let mut reader = CountingSeeks { inner: Cursor::new(&data), seeks: 0 };

        assert_eq!(search_reader(&mut reader, data.len() as u64, &key('F')).unwrap(), None);
        // Probes at index 2 then 3, no re-read past the end.
        assert_eq!(reader.seeks, 2);
    }

    #[test]
    fn test_seek_error_is_fatal() {
        let err = search_reader(&mut BrokenSeek, 42 * 4, &key('A')).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_short_stream_is_fatal() {
        // Claims more records than the stream holds.
        let data = list_from(&[key('A')]);
        let err = search_reader(&mut Cursor::new(&data), 42 * 8, &key('F')).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
