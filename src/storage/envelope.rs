//! Whole-row envelopes.
//!
//! A filter stage only sees one key/value pair at a time, so a stage that
//! accepts a row re-emits the entire row as a single value. The next stage
//! decodes it to see the full row again. Every stage boundary adds one layer.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! "KVSE" | version: u8 | row id: u32 len + bytes | entry count: u32 |
//! entry* = family: u32 len + bytes | qualifier: u32 len + bytes | value: u32 len + bytes
//! ```
//!
//! The envelope is stored under `(row id, ENVELOPE_FAMILY, "")`, so envelopes
//! keep the scan order of the rows they carry.

use crate::storage::cell::{Cell, Column, Key};
use crate::storage::error::EnvelopeError;
use crate::storage::row::Row;

/// The column family of the synthetic key an envelope is stored under.
pub const ENVELOPE_FAMILY: &[u8] = b"\0envelope";

const MAGIC: &[u8; 4] = b"KVSE";
const VERSION: u8 = 1;
const LENGTH_WIDTH: usize = 4;

pub(crate) fn envelope_column() -> Column {
    Column::new(ENVELOPE_FAMILY, "")
}

/// Encodes every entry of the row into one cell.
///
/// # Returns
///
/// * `Ok(Cell)` - The envelope, keyed by the row identifier.
/// * `Err(EnvelopeError::TooLarge)` - If a field or the entry count exceeds `u32::MAX`.
pub fn encode_row(row: &Row) -> Result<Cell, EnvelopeError> {
    let mut value = Vec::with_capacity(envelope_size(row));
    value.extend_from_slice(MAGIC);
    value.push(VERSION);
    put_field(&mut value, row.row_id())?;
    put_length(&mut value, row.entry_count())?;
    for (column, entry) in row.entries() {
        put_field(&mut value, column.family())?;
        put_field(&mut value, column.qualifier())?;
        put_field(&mut value, entry)?;
    }
    Ok(Cell::new(Key::new(row.row_id(), envelope_column()), value))
}

/// Decodes one envelope layer back into the row it carries.
///
/// # Returns
///
/// * `Ok(Row)` - The row, exactly as it was encoded.
/// * `Err(EnvelopeError::NotAnEnvelope)` - If the pair is plain data, not an envelope.
/// * `Err(EnvelopeError)` - If the envelope is damaged.
pub fn decode_row(key: &Key, value: &[u8]) -> Result<Row, EnvelopeError> {
    if !is_envelope(key, value) {
        return Err(EnvelopeError::NotAnEnvelope);
    }

    let mut reader = EnvelopeReader::new(&value[MAGIC.len()..]);
    let version = reader.u8()?;
    if version != VERSION {
        return Err(EnvelopeError::UnsupportedVersion(version));
    }

    let row_id = reader.field()?;
    if row_id != key.row() {
        return Err(EnvelopeError::RowIdMismatch);
    }

    let entry_count = reader.u32()?;
    let mut row = Row::empty(row_id);
    for _ in 0..entry_count {
        let family = reader.field()?;
        let qualifier = reader.field()?;
        let entry = reader.field()?;
        row.insert(Column::new(family, qualifier), entry.to_vec());
    }

    reader.finish()?;
    Ok(row)
}

/// Returns `true` if the pair looks like an envelope: envelope key and envelope header.
pub fn is_envelope(key: &Key, value: &[u8]) -> bool {
    key.column() == &envelope_column() && value.starts_with(MAGIC)
}

fn envelope_size(row: &Row) -> usize {
    let entries: usize = row
        .entries()
        .map(|(column, entry)| {
            3 * LENGTH_WIDTH + column.family().len() + column.qualifier().len() + entry.len()
        })
        .sum();
    MAGIC.len() + 1 + LENGTH_WIDTH + row.row_id().len() + LENGTH_WIDTH + entries
}

fn put_field(buffer: &mut Vec<u8>, field: &[u8]) -> Result<(), EnvelopeError> {
    put_length(buffer, field.len())?;
    buffer.extend_from_slice(field);
    Ok(())
}

fn put_length(buffer: &mut Vec<u8>, length: usize) -> Result<(), EnvelopeError> {
    let length = u32::try_from(length).map_err(|_| EnvelopeError::TooLarge(length))?;
    buffer.extend_from_slice(&length.to_be_bytes());
    Ok(())
}

struct EnvelopeReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> EnvelopeReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], EnvelopeError> {
        let available = self.bytes.len() - self.position;
        if needed > available {
            return Err(EnvelopeError::Truncated { needed, available });
        }
        let slice = &self.bytes[self.position..self.position + needed];
        self.position += needed;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, EnvelopeError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, EnvelopeError> {
        let mut bytes = [0u8; LENGTH_WIDTH];
        bytes.copy_from_slice(self.take(LENGTH_WIDTH)?);
        Ok(u32::from_be_bytes(bytes))
    }

    fn field(&mut self) -> Result<&'a [u8], EnvelopeError> {
        let length = self.u32()? as usize;
        self.take(length)
    }

    fn finish(self) -> Result<(), EnvelopeError> {
        let remaining = self.bytes.len() - self.position;
        if remaining > 0 {
            return Err(EnvelopeError::TrailingBytes(remaining));
        }
        Ok(())
    }
}
