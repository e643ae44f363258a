//! Zero-copy header decoding.
//!
//! Every function takes the caller's view as `&mut &[u8]` and, on success,
//! moves it past the bytes it consumed. Nothing is copied.

use crate::error::{Error, Result};
use crate::term::{
    ATOM_EXT, ATOM_HEADER_SIZE, FORMAT_VERSION, LIST_EXT, LIST_HEADER_SIZE, SMALL_TUPLE_EXT,
    corrupted,
};

/// Strip the `{atom, ...}` preamble and return the atom's byte length.
///
/// Only the low-order byte of the 2-byte length is honoured, so atoms longer
/// than 255 bytes decode to `len % 256`. Stored keys depend on this, so it
/// must not change under an existing comparator name.
///
/// # Panics
/// Panics if the preamble is malformed (see [`try_decode_atom_header`]).
pub fn decode_atom_header(view: &mut &[u8]) -> usize {
    try_decode_atom_header(view).unwrap_or_else(|e| corrupted(e))
}

/// Fallible form of [`decode_atom_header`]. The view is left untouched on error.
pub fn try_decode_atom_header(view: &mut &[u8]) -> Result<usize> {
    let buf = *view;
    if buf.len() < ATOM_HEADER_SIZE {
        return Err(Error::Corruption(format!(
            "term too short for atom header: {} bytes",
            buf.len()
        )));
    }

    expect_tag(buf[0], FORMAT_VERSION, "format version")?;
    expect_tag(buf[1], SMALL_TUPLE_EXT, "small tuple")?;
    // buf[2] is the tuple arity, not checked
    expect_tag(buf[3], ATOM_EXT, "atom")?;

    // buf[4] is the high byte of the length
    let len = buf[5] as usize;

    *view = &buf[ATOM_HEADER_SIZE..];
    Ok(len)
}

/// Strip a list header and return its element count.
///
/// # Panics
/// Panics if the list tag is missing or the header is truncated.
pub fn decode_list_header(view: &mut &[u8]) -> u32 {
    try_decode_list_header(view).unwrap_or_else(|e| corrupted(e))
}

/// Fallible form of [`decode_list_header`]. The view is left untouched on error.
pub fn try_decode_list_header(view: &mut &[u8]) -> Result<u32> {
    let buf = *view;
    if buf.len() < LIST_HEADER_SIZE {
        return Err(Error::Corruption(format!(
            "term too short for list header: {} bytes",
            buf.len()
        )));
    }

    expect_tag(buf[0], LIST_EXT, "list")?;
    let count = u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]);

    *view = &buf[LIST_HEADER_SIZE..];
    Ok(count)
}

fn expect_tag(got: u8, want: u8, what: &str) -> Result<()> {
    if got != want {
        return Err(Error::Corruption(format!(
            "bad {what} tag: expected {want}, got {got}"
        )));
    }
    Ok(())
}
