//! Error types for trifind.

use thiserror::Error;

/// Result alias for trifind operations.
pub type TriFindResult<T> = std::result::Result<T, TriFindError>;

/// Errors raised while building templates or validating configuration.
///
/// Per-frame degenerate cases (empty frames, frames smaller than a kernel,
/// flat windows) are not errors; they simply produce no matches.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriFindError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Matrix dimensions overflow or disagree with each other.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The backing buffer length does not match `width * height`.
    #[error("buffer size mismatch: needed {needed}, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A row has a different length than the first row.
    #[error("row {row} has length {got}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// The padded template width disagrees with `resized + 2 * padding`.
    #[error("width after padding ({width}) does not match expected padded width ({expected})")]
    PaddedWidthMismatch { width: usize, expected: usize },
    /// The template directory could not be listed.
    #[error("cannot read template directory {path}: {reason}")]
    TemplateDirUnreadable { path: String, reason: String },
    /// A template image failed to open or decode.
    #[error("cannot decode template {name}: {reason}")]
    TemplateDecode { name: String, reason: String },
    /// A frame image failed to open or decode.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
    /// Template bank construction produced no templates.
    #[error("no valid templates found")]
    EmptyTemplateBank,
}
