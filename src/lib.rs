//! # Erlang-term key comparator
//!
//! A custom key order for a sorted, LevelDB-style storage engine whose keys
//! are Erlang external terms of the shape `{Atom, VectorClock, ...}`.
//!
//! ## Core idea
//! The engine sees keys as opaque bytes. Sorting those bytes directly would
//! interleave keys by tuple arity and atom length. Instead, the comparator
//! decodes just enough of the term to find the atom and orders by that,
//! borrowing from the caller's buffer without copying.
//!
//! The order is persisted implicitly in every file the engine writes, so the
//! comparator's [`name`](Comparator::name) is recorded too (see [`meta`]) and
//! a database is never reopened under a different one.

pub mod comparator;
pub mod error;
pub mod meta;
pub mod term;

// Public re-exports for the top-level API
pub use comparator::{BytewiseComparator, Comparator, TermComparator, comparator, shutdown};
pub use error::{Error, Result};
