use std::fmt;
use std::io;

/// Unified error type for the comparator crate.
#[derive(Debug)]
pub enum Error {
    /// IO error while reading or writing the identity record.
    Io(io::Error),
    /// Data corruption detected (bad tag, truncated term, CRC mismatch).
    Corruption(String),
    /// The database was created with a different comparator.
    ComparatorMismatch { stored: String, live: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "IO error: {e}"),
            Error::Corruption(msg) => write!(f, "Corruption: {msg}"),
            Error::ComparatorMismatch { stored, live } => {
                write!(f, "Comparator mismatch: stored {stored}, live {live}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
