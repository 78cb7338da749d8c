//! Upload validation.
//!
//! Runs before any decoding: checks the declared MIME type and the payload
//! size so oversized or foreign files never reach the decoder.

use thiserror::Error;

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// File types accepted by the uploader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptedFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
    /// Accepted at upload but has no raster decoder.
    Svg,
}

impl AcceptedFormat {
    pub const ALL: [AcceptedFormat; 5] = [
        AcceptedFormat::Jpeg,
        AcceptedFormat::Png,
        AcceptedFormat::Gif,
        AcceptedFormat::WebP,
        AcceptedFormat::Svg,
    ];

    /// Canonical MIME type.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Look up a MIME type, ignoring case and any `;` parameters.
    pub fn from_mime_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|f| f.mime_type().eq_ignore_ascii_case(essence))
    }

    /// Whether the decoder can rasterize this format.
    pub fn is_raster(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

/// Errors raised while validating an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The declared type is not an accepted image type
    #[error("Unsupported file type: {0:?}")]
    InvalidInputType(String),

    /// The payload exceeds [`MAX_UPLOAD_BYTES`]
    #[error("File too large: {size} bytes (maximum {max} bytes)")]
    OversizedInput { size: usize, max: usize },
}

/// Validate an upload by declared MIME type and byte length.
pub fn check_upload(content_type: &str, byte_len: usize) -> Result<AcceptedFormat, InputError> {
    let format = AcceptedFormat::from_mime_type(content_type)
        .ok_or_else(|| InputError::InvalidInputType(content_type.to_string()))?;
    if byte_len > MAX_UPLOAD_BYTES {
        return Err(InputError::OversizedInput {
            size: byte_len,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(format)
}
