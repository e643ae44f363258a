pub mod registry;
pub mod term;

use std::cmp::Ordering;

pub use registry::{Registry, comparator, shutdown};
pub use term::{TermComparator, extract_key};

/// Total order over raw keys, as the storage engine sees it.
///
/// The engine records [`name`](Comparator::name) in its metadata and refuses
/// to reopen a database under a different one, so an implementation's order
/// must never change while its name stays the same.
///
/// Implementations are shared across every thread that reads or writes the
/// database, hence `Send + Sync`.
pub trait Comparator: Send + Sync {
    /// Stable identifier persisted alongside the data.
    fn name(&self) -> &'static str;

    /// Three-way comparison of two stored keys.
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;

    /// If `start < limit`, may shorten `start` to any key in `[start, limit)`.
    /// Used to keep index blocks small. Leaving `start` alone is always valid.
    fn find_shortest_separator(&self, start: &mut Vec<u8>, limit: &[u8]);

    /// May replace `key` with any shorter key that is `>= key`.
    fn find_short_successor(&self, key: &mut Vec<u8>);
}

/// The engine's default order: unsigned lexicographic bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytewiseComparator;

impl Comparator for BytewiseComparator {
    fn name(&self) -> &'static str {
        "leveldb.BytewiseComparator"
    }

    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }

    fn find_shortest_separator(&self, start: &mut Vec<u8>, limit: &[u8]) {
        let shared = start
            .iter()
            .zip(limit)
            .take_while(|(s, l)| s == l)
            .count();

        // One is a prefix of the other
        if shared >= start.len().min(limit.len()) {
            return;
        }

        let diff = start[shared];
        if diff < 0xff && diff + 1 < limit[shared] {
            start[shared] += 1;
            start.truncate(shared + 1);
        }
    }

    fn find_short_successor(&self, key: &mut Vec<u8>) {
        if let Some(i) = key.iter().position(|&b| b != 0xff) {
            key[i] += 1;
            key.truncate(i + 1);
        }
    }
}
