//! Error types for BSV encoding, decoding and persistence

use thiserror::Error;

/// Errors raised while turning a table into bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A value is not valid UTF-8 text
    #[error("invalid text value at row {row}, cell {cell}")]
    InvalidText { row: usize, cell: usize },
}

/// Errors raised while scanning a BSV buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A segment is neither a one-byte marker nor valid UTF-8
    #[error("invalid text value at byte {offset}")]
    InvalidText { offset: usize },
    /// A zero-length segment outside a row boundary
    #[error("invalid BSV value byte sequence at byte {offset}")]
    MalformedSequence { offset: usize },
}

impl DecodeError {
    /// Byte offset in the input where the problem was found
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::InvalidText { offset } | DecodeError::MalformedSequence { offset } => {
                *offset
            }
        }
    }
}

/// Errors from the file-level load/save/append wrappers
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl PersistError {
    /// The underlying I/O error, if this failure came from the filesystem
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            PersistError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}
