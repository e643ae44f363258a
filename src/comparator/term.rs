use std::cmp::Ordering;

use crate::comparator::Comparator;
use crate::error::{Error, Result};
use crate::term::corrupted;
use crate::term::decoder::try_decode_atom_header;

/// Pull the atom key out of an encoded entry.
///
/// Returns the key as a sub-slice of `entry` together with the number of
/// bytes consumed (preamble + key), so `&entry[consumed..]` is the residual
/// vector clock.
///
/// # Panics
/// Panics if the entry is malformed (see [`try_extract_key`]).
pub fn extract_key(entry: &[u8]) -> (&[u8], usize) {
    try_extract_key(entry).unwrap_or_else(|e| corrupted(e))
}

/// Fallible form of [`extract_key`].
pub fn try_extract_key(entry: &[u8]) -> Result<(&[u8], usize)> {
    let mut view = entry;
    let len = try_decode_atom_header(&mut view)?;
    if len > view.len() {
        return Err(Error::Corruption(format!(
            "atom length {len} exceeds remaining {} bytes",
            view.len()
        )));
    }

    let key = &view[..len];
    let consumed = entry.len() - view.len() + len;
    Ok((key, consumed))
}

/// Orders Erlang-term encoded entries `{Atom, VectorClock, ...}` by `Atom`.
///
/// Stateless, so one instance is shared by every thread of the engine
/// (see [`crate::comparator::registry`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct TermComparator;

impl TermComparator {
    /// Identity persisted by the engine. Bump the version suffix whenever the
    /// order changes.
    pub const NAME: &'static str = "etf.AtomKeyComparator.v1";

    pub fn new() -> Self {
        TermComparator
    }
}

impl Comparator for TermComparator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Byte-identical entries are equal. Otherwise the atom keys decide,
    /// compared as unsigned bytes.
    ///
    /// Distinct entries with the same atom always compare `Greater`, in both
    /// directions. That is not antisymmetric; it is the order existing data
    /// was written with.
    ///
    /// # Panics
    /// Panics on a malformed entry. Corrupt keys have no safe position.
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }

        let (key_a, consumed_a) = extract_key(a);
        let (key_b, consumed_b) = extract_key(b);

        match key_a.cmp(key_b) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // TODO: order equal atoms by vector clock, under a new NAME.
        let (_clock_a, _clock_b) = (&a[consumed_a..], &b[consumed_b..]);
        Ordering::Greater
    }

    // Keys are short atoms; separators are never shortened.
    fn find_shortest_separator(&self, _start: &mut Vec<u8>, _limit: &[u8]) {}

    fn find_short_successor(&self, _key: &mut Vec<u8>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &[u8], clock: &[u8]) -> Vec<u8> {
        let mut buf = vec![131, 104, 2, 100, 0, key.len() as u8];
        buf.extend_from_slice(key);
        buf.extend_from_slice(clock);
        buf
    }

    #[test]
    fn extract_key_borrows_from_entry() {
        let e = entry(b"foo", &[108, 0, 0, 0, 0, 106]);
        let (key, consumed) = extract_key(&e);
        assert_eq!(key, b"foo");
        assert_eq!(consumed, 9);
        assert_eq!(&e[consumed..], &[108, 0, 0, 0, 0, 106]);
        assert!(std::ptr::eq(key.as_ptr(), e[6..].as_ptr()));
    }

    #[test]
    fn extract_empty_atom() {
        let e = entry(b"", &[]);
        let (key, consumed) = extract_key(&e);
        assert!(key.is_empty());
        assert_eq!(consumed, 6);
    }

    #[test]
    fn extract_key_rejects_overlong_atom() {
        let mut e = entry(b"foo", &[]);
        e[5] = 10;
        assert!(matches!(try_extract_key(&e), Err(Error::Corruption(_))));
    }

    #[test]
    fn separator_and_successor_are_noops() {
        let mut start = entry(b"aaaa", &[1, 2, 3]);
        let before = start.clone();
        TermComparator.find_shortest_separator(&mut start, &entry(b"zz", &[]));
        assert_eq!(start, before);

        TermComparator.find_short_successor(&mut start);
        assert_eq!(start, before);
    }
}
