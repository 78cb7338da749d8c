//! The render pipeline: decode, transform, encode.
//!
//! Every render starts from the original source bytes, so repeated renders
//! with different settings never stack on top of each other.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_surface, EncodeError};
use crate::grayscale::to_grayscale;
use crate::settings::EditorSettings;
use crate::surface::ImageSurface;
use crate::watermark::{apply_watermark_with_font, WatermarkConfig, WatermarkFont};

/// File name offered for the exported image.
pub const OUTPUT_FILE_NAME: &str = "markvault-protected.png";

/// A finished render: PNG bytes plus the output dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedOutput {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Errors that abort a render. No partial output is produced.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Render `source` with the built-in watermark font.
pub fn render(
    source: &[u8],
    grayscale: bool,
    watermark: &WatermarkConfig,
) -> Result<ProcessedOutput, RenderError> {
    render_with_font(source, grayscale, watermark, &WatermarkFont::Builtin)
}

/// Decode `source`, apply the requested transforms and encode to PNG.
///
/// # Errors
///
/// Returns `RenderError::Decode` if the source cannot be decoded and
/// `RenderError::Encode` if the result cannot be encoded.
pub fn render_with_font(
    source: &[u8],
    grayscale: bool,
    watermark: &WatermarkConfig,
    font: &WatermarkFont,
) -> Result<ProcessedOutput, RenderError> {
    let mut surface = decode_image(source)?;
    process_surface(&mut surface, grayscale, Some(watermark), font);
    finish(&surface)
}

/// Render from the editor's settings.
///
/// The watermark is drawn only when it is enabled and its text is non-empty.
pub fn render_settings(
    source: &[u8],
    settings: &EditorSettings,
    font: &WatermarkFont,
) -> Result<ProcessedOutput, RenderError> {
    let mut surface = decode_image(source)?;
    let watermark = settings.effective_watermark();
    process_surface(&mut surface, settings.grayscale, watermark.as_ref(), font);
    finish(&surface)
}

/// Apply grayscale (if requested) and then the watermark (if any) in place.
pub fn process_surface(
    surface: &mut ImageSurface,
    grayscale: bool,
    watermark: Option<&WatermarkConfig>,
    font: &WatermarkFont,
) {
    if grayscale {
        to_grayscale(surface);
    }
    if let Some(config) = watermark.filter(|c| c.is_active()) {
        apply_watermark_with_font(surface, config, font);
    }
}

fn finish(surface: &ImageSurface) -> Result<ProcessedOutput, RenderError> {
    let bytes = encode_surface(surface)?;
    debug!(
        width = surface.width,
        height = surface.height,
        bytes = bytes.len(),
        "render finished"
    );
    Ok(ProcessedOutput {
        bytes,
        width: surface.width,
        height: surface.height,
    })
}
