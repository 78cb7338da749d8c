//! Image decoding for MarkVault.
//!
//! Turns an uploaded file's bytes into an [`ImageSurface`](crate::ImageSurface)
//! at its natural size. JPEG, PNG, GIF (first frame) and WebP are decoded
//! through the `image` crate; EXIF orientation is applied so the surface
//! matches what a browser would display.
//!
//! # Examples
//!
//! ```ignore
//! use markvault_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let surface = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", surface.width, surface.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use image::metadata::Orientation;
pub use types::DecodeError;
