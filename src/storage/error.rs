use std::fmt::{Display, Formatter};

/// Represents errors that can occur while decoding a row envelope.
#[derive(Debug, PartialEq)]
pub enum EnvelopeError {
    /// The key/value pair is not an envelope: its key is not the envelope key,
    /// or its value does not start with the envelope header.
    NotAnEnvelope,
    /// The envelope was written by an unknown format version.
    UnsupportedVersion(u8),
    /// The envelope ended before a field was complete.
    Truncated {
        /// The number of bytes the field needed.
        needed: usize,
        /// The number of bytes left in the envelope.
        available: usize,
    },
    /// Bytes were left over after the last entry.
    TrailingBytes(usize),
    /// The row identifier in the key differs from the one inside the envelope.
    RowIdMismatch,
    /// A field length or entry count does not fit the 32-bit length prefix.
    TooLarge(usize),
}

impl Display for EnvelopeError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::NotAnEnvelope => write!(formatter, "value is not a row envelope"),
            EnvelopeError::UnsupportedVersion(version) => {
                write!(formatter, "unsupported envelope version {}", version)
            }
            EnvelopeError::Truncated { needed, available } => write!(
                formatter,
                "envelope truncated: needed {} bytes, {} available",
                needed, available
            ),
            EnvelopeError::TrailingBytes(count) => {
                write!(formatter, "{} trailing bytes after the last envelope entry", count)
            }
            EnvelopeError::RowIdMismatch => {
                write!(formatter, "envelope key and envelope body name different rows")
            }
            EnvelopeError::TooLarge(length) => write!(
                formatter,
                "length {} does not fit a 32-bit envelope length prefix",
                length
            ),
        }
    }
}

impl std::error::Error for EnvelopeError {}
