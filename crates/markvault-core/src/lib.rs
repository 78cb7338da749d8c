//! MarkVault Core - Image protection library
//!
//! This crate provides the image processing behind MarkVault: grayscale
//! conversion, tiled rotated text watermarks, and the decode/encode pipeline
//! that turns an uploaded image into a protected PNG.

pub mod color;
pub mod decode;
pub mod encode;
pub mod grayscale;
pub mod intake;
pub mod luminance;
pub mod pipeline;
pub mod session;
pub mod settings;
pub mod surface;
pub mod watermark;

pub use color::{parse_color, ColorParseError, Rgb};
pub use decode::{decode_image, DecodeError};
pub use encode::{encode_png, encode_surface, EncodeError};
pub use grayscale::{to_grayscale, to_grayscale_pixels};
pub use intake::{check_upload, AcceptedFormat, InputError, MAX_UPLOAD_BYTES};
pub use pipeline::{
    process_surface, render, render_settings, render_with_font, ProcessedOutput, RenderError,
    OUTPUT_FILE_NAME,
};
pub use session::{Completion, RenderSession, RenderTicket};
pub use settings::{ConfigError, EditorSettings};
pub use surface::ImageSurface;
pub use watermark::{apply_watermark, apply_watermark_with_font, WatermarkConfig, WatermarkFont};
