//! Decode errors.

use thiserror::Error;

/// Why source bytes could not become a surface.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Image data is empty")]
    EmptyInput,

    /// The bytes do not start with any known image signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format is recognized but has no raster decoder.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The format is known but the data is truncated or damaged.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}
