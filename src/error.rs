//! Error types for listing a snapshot traversal

use std::io;

use thiserror::Error;

use crate::element::ImageElement;

/// Result type for listing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a listing run.
#[derive(Debug, Error)]
pub enum Error {
    /// A leave event arrived while no scope was open.
    #[error("scope stack underflow: leave event with no open scope")]
    ScopeUnderflow,
    /// The output sink failed.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
    /// A leaf value could not be read as the number its element requires.
    #[error("invalid numeric value {value:?} for {element}: {reason}")]
    InvalidNumber {
        element: ImageElement,
        value: String,
        reason: String,
    },
    /// The cumulative byte count no longer fits in 64 bits.
    #[error("byte count overflow while accumulating {element}")]
    SizeOverflow { element: ImageElement },
    /// A recorded traversal event could not be decoded.
    #[error("malformed event on line {line}: {source}")]
    MalformedEvent {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn invalid_number(
        element: ImageElement,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::InvalidNumber {
            element,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
