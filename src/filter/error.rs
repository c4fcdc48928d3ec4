use crate::compare::error::CompareError;
use crate::storage::error::EnvelopeError;
use std::fmt::{Display, Formatter};

/// Represents errors that can occur while setting up or running a filtered scan.
#[derive(Debug, PartialEq)]
pub enum FilterError {
    /// Errors raised by a stage's comparator or operator, at setup or during evaluation.
    Compare(CompareError),
    /// Errors raised while decoding a row envelope.
    Envelope(EnvelopeError),
    /// A stage option required to build the stage is absent.
    MissingOption(String),
    /// A stage option is present but cannot be parsed.
    InvalidOption {
        /// The option name.
        name: String,
        /// The rejected value.
        value: String,
    },
    /// Stage ordinals must be exactly `0..N`; carries the ordinals that were given.
    InvalidStageOrdinals(Vec<usize>),
    /// The number of envelope layers decoded differs from the number applied.
    DecodeLayerMismatch {
        /// The number of layers the caller asked to decode.
        layers: usize,
    },
}

impl Display for FilterError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::Compare(error) => write!(formatter, "{}", error),
            FilterError::Envelope(error) => write!(formatter, "{}", error),
            FilterError::MissingOption(name) => {
                write!(formatter, "missing stage option '{}'", name)
            }
            FilterError::InvalidOption { name, value } => {
                write!(formatter, "invalid value '{}' for stage option '{}'", value, name)
            }
            FilterError::InvalidStageOrdinals(ordinals) => write!(
                formatter,
                "stage ordinals {:?} are not a contiguous sequence starting at 0",
                ordinals
            ),
            FilterError::DecodeLayerMismatch { layers } => write!(
                formatter,
                "decoding {} envelope layers does not match the layers applied",
                layers
            ),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::Compare(error) => Some(error),
            FilterError::Envelope(error) => Some(error),
            _ => None,
        }
    }
}

impl From<CompareError> for FilterError {
    fn from(error: CompareError) -> Self {
        FilterError::Compare(error)
    }
}

impl From<EnvelopeError> for FilterError {
    fn from(error: EnvelopeError) -> Self {
        FilterError::Envelope(error)
    }
}
