use std::io::{BufWriter, Write};
use std::path::Path;

use pwned_list::SearchKey;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates `count` random SHA-1 keys in sorted order.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_sorted_keys(count: usize) -> Vec<SearchKey> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut keys: Vec<SearchKey> = (0..count)
        .map(|_| {
            let digest: [u8; 20] = rng.r#gen();
            SearchKey::from_digest(&digest)
        })
        .collect();
    keys.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    keys.dedup();
    keys
}

/// Writes keys to `path` in the CRLF list format.
pub fn write_list(path: &Path, keys: &[SearchKey]) {
    let mut out = BufWriter::new(std::fs::File::create(path).expect("create list file"));
    for key in keys {
        out.write_all(key.as_bytes()).unwrap();
        out.write_all(b"\r\n").unwrap();
    }
    out.flush().unwrap();
}
