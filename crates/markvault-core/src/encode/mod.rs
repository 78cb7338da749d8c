//! Image encoding for MarkVault.
//!
//! The processed surface is always exported losslessly as PNG so that the
//! watermark's soft edges and the source's alpha channel survive intact.
//!
//! # Examples
//!
//! ```ignore
//! use markvault_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray image
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, encode_surface, EncodeError, PNG_SIGNATURE};
