//! The fixed 42-byte record layout of the Pwned Passwords SHA-1 list.
//!
//! Each record is 40 uppercase hex characters followed by `\r\n`. Records are
//! stored back to back with no header, so record N starts at byte N * 42.

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// The length of a record in bytes, terminator included.
pub const RECORD_SIZE: usize = 42;

/// The length of the hex key at the start of each record.
pub const KEY_LEN: usize = 40;

/// Hex lookup table for rendering digests.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

pub type Record = [u8; RECORD_SIZE];

/// The rule a malformed record broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A key byte is outside `[0-9A-F]`.
    InvalidCharacter,
    /// Bytes 40 and 41 are not `\r\n`.
    MissingTerminator,
}

impl Violation {
    /// Attaches the 1-based record index to produce the reportable error.
    pub fn at(self, index: u64) -> Error {
        match self {
            Violation::InvalidCharacter => Error::InvalidCharacter { index },
            Violation::MissingTerminator => Error::MissingTerminator { index },
        }
    }
}

#[inline(always)]
fn is_upper_hex(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'A'..=b'F')
}

/// Checks the byte-level shape of one record. Key characters are checked
/// before the terminator.
#[inline]
pub fn check_record(record: &Record) -> std::result::Result<(), Violation> {
    if !record[..KEY_LEN].iter().copied().all(is_upper_hex) {
        return Err(Violation::InvalidCharacter);
    }
    if &record[KEY_LEN..] != b"\r\n" {
        return Err(Violation::MissingTerminator);
    }
    Ok(())
}

#[inline]
pub fn is_valid_record(record: &Record) -> bool {
    check_record(record).is_ok()
}

/// Returns the hex key of a record. Keys order by unsigned byte comparison.
#[inline(always)]
pub fn record_key(record: &Record) -> &[u8; KEY_LEN] {
    // SAFETY: KEY_LEN < RECORD_SIZE, so the slice is always exactly KEY_LEN bytes.
    unsafe { record[..KEY_LEN].try_into().unwrap_unchecked() }
}

/// A 40-character uppercase hex SHA-1 hash to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchKey([u8; KEY_LEN]);

impl SearchKey {
    /// Parses a hex hash. Lowercase digits are folded to uppercase so the key
    /// matches the list's encoding; anything else is rejected.
    pub fn parse(hex: &str) -> Result<Self> {
        let bytes = hex.as_bytes();
        if bytes.len() != KEY_LEN || !bytes.iter().all(u8::is_ascii_hexdigit) {
            return Err(Error::InvalidSearchKey(hex.to_string()));
        }

        let mut key = [0u8; KEY_LEN];
        for (out, c) in key.iter_mut().zip(bytes) {
            *out = c.to_ascii_uppercase();
        }
        Ok(Self(key))
    }

    /// Renders a raw SHA-1 digest as an uppercase hex key.
    pub fn from_digest(digest: &[u8; 20]) -> Self {
        let mut key = [0u8; KEY_LEN];
        for (i, byte) in digest.iter().enumerate() {
            key[i * 2] = HEX_CHARS[(byte >> 4) as usize];
            key[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
        }
        Self(key)
    }

    /// Hashes a plaintext password into the key it would be listed under.
    pub fn from_password(password: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password.as_bytes());
        let digest: [u8; 20] = hasher.finalize().into();
        Self::from_digest(&digest)
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Only ever holds ASCII hex digits.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl std::fmt::Display for SearchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
