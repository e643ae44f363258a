//! # Erlang External Term Format (subset)
//!
//! Only the handful of tags that make up a stored key are understood here:
//!
//! ```text
//! ┌──────┬──────┬───────┬──────┬─────────┬────────────┬──────────────────────┐
//! │ 131  │ 104  │ arity │ 100  │ len(2B) │ atom bytes │ residual (vclock)    │
//! │ (1B) │ (1B) │ (1B)  │ (1B) │         │ (len)      │ 108 │ count(4B) │ …  │
//! └──────┴──────┴───────┴──────┴─────────┴────────────┴──────────────────────┘
//! ```
//!
//! Multi-byte integers in the term format are big endian.

pub mod decoder;

use crate::error::Error;

/// Leading byte of every external term.
pub const FORMAT_VERSION: u8 = 131;

/// Tuple with a 1-byte arity.
pub const SMALL_TUPLE_EXT: u8 = 104;

/// Atom with a 2-byte length.
pub const ATOM_EXT: u8 = 100;

/// List with a 4-byte element count.
pub const LIST_EXT: u8 = 108;

/// version + tuple tag + arity + atom tag + atom length.
pub const ATOM_HEADER_SIZE: usize = 1 + 1 + 1 + 1 + 2;

/// list tag + element count.
pub const LIST_HEADER_SIZE: usize = 1 + 4;

/// Abort on a malformed term.
///
/// Keys reach the comparator from the engine's own files, so a bad tag means
/// the data on disk is already corrupt. There is no ordering that can be
/// returned safely.
#[cold]
pub(crate) fn corrupted(err: Error) -> ! {
    tracing::error!(error = %err, "malformed term in comparator input");
    panic!("{err}")
}
