//! MarkVault WASM - WebAssembly bindings for MarkVault
//!
//! This crate exposes the markvault-core functionality to the browser UI.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for RGBA image surfaces
//! - `decode` - Upload validation and image decoding
//! - `encode` - PNG encoding
//! - `watermark` - Watermark configuration, grayscale and watermark transforms
//! - `render` - One-shot render pipeline
//! - `editor` - Stateful editor session with last-write-wins renders
//!
//! # Usage
//!
//! ```typescript
//! import init, { check_upload, MarkVaultEditor } from '@markvault/wasm';
//!
//! await init();
//!
//! check_upload(file.type, file.size);
//! const editor = new MarkVaultEditor(new Uint8Array(await file.arrayBuffer()));
//! editor.render({ grayscale: true, watermarkEnabled: true, text: '© 2025' });
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod render;
mod types;
mod watermark;

// Re-export public types
pub use decode::{check_upload, decode_image, max_upload_bytes};
pub use editor::{JsRenderTicket, MarkVaultEditor};
pub use encode::{encode_png, encode_png_from_surface};
pub use render::{output_file_name, render_image, JsRenderOutput};
pub use types::JsImageSurface;
pub use watermark::{apply_watermark, to_grayscale, JsWatermarkConfig};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Report a non-fatal problem on the browser console.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
