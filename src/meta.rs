//! Persisted comparator identity.
//!
//! An engine must never read data with a different order than the one it was
//! written with. The comparator's name is stored once, next to the data, and
//! checked on every reopen.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::comparator::Comparator;
use crate::error::{Error, Result};

/// File name of the identity record inside a database directory.
pub const COMPARATOR_FILE: &str = "COMPARATOR";

const CRC_SIZE: usize = 4;
const NAME_LEN_SIZE: usize = 2;
const HEADER_SIZE: usize = CRC_SIZE + NAME_LEN_SIZE;

/// The stored comparator name.
///
/// On-disk format:
/// ```text
/// ┌──────────┬─────────────┬─────────────┐
/// │ CRC (4B) │ Name len(2B)│ Name (var)  │
/// └──────────┴─────────────┴─────────────┘
/// ```
///
/// CRC covers everything after the CRC field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparatorRecord {
    pub name: String,
}

impl ComparatorRecord {
    pub fn new(name: impl Into<String>) -> Self {
        ComparatorRecord { name: name.into() }
    }

    pub fn encode(&self) -> Vec<u8> {
        let name = self.name.as_bytes();
        let mut buf = Vec::with_capacity(HEADER_SIZE + name.len());

        buf.extend_from_slice(&[0u8; CRC_SIZE]);
        buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
        buf.extend_from_slice(name);

        let crc = crc32fast::hash(&buf[CRC_SIZE..]);
        buf[0..CRC_SIZE].copy_from_slice(&crc.to_le_bytes());
        buf
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Corruption("comparator record too short".into()));
        }

        let stored_crc = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let name_len = u16::from_le_bytes([data[4], data[5]]) as usize;

        let total_len = HEADER_SIZE + name_len;
        if data.len() < total_len {
            return Err(Error::Corruption("comparator record truncated".into()));
        }

        let computed_crc = crc32fast::hash(&data[CRC_SIZE..total_len]);
        if stored_crc != computed_crc {
            return Err(Error::Corruption("comparator record CRC mismatch".into()));
        }

        let name = std::str::from_utf8(&data[HEADER_SIZE..total_len])
            .map_err(|e| Error::Corruption(format!("comparator name not utf-8: {e}")))?;
        Ok(ComparatorRecord::new(name))
    }
}

/// Write the comparator's name into `dir`, replacing any previous record.
pub fn persist_name(dir: &Path, cmp: &dyn Comparator) -> Result<()> {
    let record = ComparatorRecord::new(cmp.name());
    let mut file = File::create(dir.join(COMPARATOR_FILE))?;
    file.write_all(&record.encode())?;
    file.sync_all()?;
    info!(name = cmp.name(), "comparator identity persisted");
    Ok(())
}

/// Read the stored name from `dir`, if a record exists.
pub fn stored_name(dir: &Path) -> Result<Option<String>> {
    match fs::read(dir.join(COMPARATOR_FILE)) {
        Ok(data) => Ok(Some(ComparatorRecord::decode(&data)?.name)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Fail unless `dir` holds a record naming `cmp`.
pub fn check_name(dir: &Path, cmp: &dyn Comparator) -> Result<()> {
    match stored_name(dir)? {
        Some(stored) => verify(stored, cmp),
        None => Err(Error::Corruption(format!(
            "missing {COMPARATOR_FILE} record in {}",
            dir.display()
        ))),
    }
}

/// Verify the stored name if there is one, otherwise record `cmp`.
/// Called when the engine opens a database.
pub fn open_or_create(dir: &Path, cmp: &dyn Comparator) -> Result<()> {
    match stored_name(dir)? {
        Some(stored) => verify(stored, cmp),
        None => persist_name(dir, cmp),
    }
}

fn verify(stored: String, cmp: &dyn Comparator) -> Result<()> {
    if stored != cmp.name() {
        warn!(stored = %stored, live = cmp.name(), "comparator mismatch");
        return Err(Error::ComparatorMismatch {
            stored,
            live: cmp.name().to_string(),
        });
    }
    Ok(())
}
