//! Error handling for gcemit
//!
//! Provides error types for each layer:
//! - Export errors (contract violations in the incoming trace)
//! - Trace errors (reading and decoding trace files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Export error type
///
/// The exporter is total over well-formed traces. These variants report a
/// record the upstream execution engine should never have produced, along
/// with its index in the trace, so the export aborts instead of emitting a
/// silently wrong instruction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExportError {
    /// A numeric field is NaN or infinite
    #[error("Record {index}: field '{field}' is not a finite number")]
    NonFiniteValue {
        /// Index of the offending record in the trace.
        index: usize,
        /// Name of the offending field.
        field: &'static str,
    },
}

impl ExportError {
    /// Index of the record that caused the error
    pub fn record_index(&self) -> usize {
        match self {
            Self::NonFiniteValue { index, .. } => *index,
        }
    }
}

/// Trace error type
///
/// Represents failures loading a trace produced by the execution engine.
#[derive(Error, Debug, Clone)]
pub enum TraceError {
    /// The trace file could not be read
    #[error("Failed to read trace {path}: {reason}")]
    Read {
        /// Path of the trace file.
        path: String,
        /// The reason the read failed.
        reason: String,
    },

    /// The trace file contents could not be decoded
    #[error("Invalid trace {path}: {reason}")]
    Decode {
        /// Path of the trace file.
        path: String,
        /// The decoder's message.
        reason: String,
    },
}

/// Main error type for gcemit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Trace error
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }

    /// Check if this is a trace error
    pub fn is_trace_error(&self) -> bool {
        matches!(self, Error::Trace(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
