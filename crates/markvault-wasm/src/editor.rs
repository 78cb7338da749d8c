//! Stateful editor bindings.
//!
//! `MarkVaultEditor` holds the uploaded image and the output on display. The
//! UI hands it the full settings object on every change; only the latest
//! request may replace the displayed output.
//!
//! ```typescript
//! const editor = new MarkVaultEditor(bytes);
//! editor.render({ grayscale: true, watermarkEnabled: true, text: 'TEST' });
//! const png = editor.output()?.bytes();
//! ```
//!
//! Callers that render off the main thread can use `begin()` to take a
//! ticket, check `is_current(ticket)` to abandon stale work, and finish with
//! `render_ticket(ticket, settings)`.

use crate::render::JsRenderOutput;
use crate::console_warn;
use markvault_core::{Completion, EditorSettings, RenderSession, RenderTicket, WatermarkFont};
use wasm_bindgen::prelude::*;

/// A render request handle.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct JsRenderTicket {
    inner: RenderTicket,
}

#[wasm_bindgen]
impl JsRenderTicket {
    /// Request sequence number
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }
}

/// The editor session for one uploaded image.
#[wasm_bindgen]
pub struct MarkVaultEditor {
    session: RenderSession,
}

#[wasm_bindgen]
impl MarkVaultEditor {
    /// Start editing `source` (the uploaded file's bytes).
    #[wasm_bindgen(constructor)]
    pub fn new(source: Vec<u8>) -> Self {
        Self {
            session: RenderSession::new(source),
        }
    }

    /// Use a TrueType/OpenType font for the watermark text.
    pub fn set_font(&mut self, font_bytes: Vec<u8>) -> Result<(), JsValue> {
        let font =
            WatermarkFont::from_bytes(font_bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.set_font(font);
        Ok(())
    }

    /// Go back to the built-in bitmap font.
    pub fn use_builtin_font(&mut self) {
        self.session.set_font(WatermarkFont::Builtin);
    }

    /// Load a different image, dropping the current output.
    pub fn replace_source(&mut self, source: Vec<u8>) {
        self.session.replace_source(source);
    }

    /// Render with `settings` (an `EditorSettings`-shaped object).
    ///
    /// Returns `true` when the output was replaced.
    ///
    /// # Errors
    ///
    /// Throws if `settings` is malformed or the image cannot be rendered; the
    /// previous output stays on display.
    pub fn render(&mut self, settings: JsValue) -> Result<bool, JsValue> {
        let settings = parse_settings(settings)?;
        let ticket = self.session.begin();
        self.finish(ticket, &settings)
    }

    /// Take a ticket for a render that will finish later.
    pub fn begin(&mut self) -> JsRenderTicket {
        JsRenderTicket {
            inner: self.session.begin(),
        }
    }

    /// Whether `ticket` is still the latest request.
    pub fn is_current(&self, ticket: &JsRenderTicket) -> bool {
        self.session.is_current(ticket.inner)
    }

    /// Render for a ticket from `begin()`. Stale tickets return `false`.
    pub fn render_ticket(
        &mut self,
        ticket: &JsRenderTicket,
        settings: JsValue,
    ) -> Result<bool, JsValue> {
        let settings = parse_settings(settings)?;
        self.finish(ticket.inner, &settings)
    }

    /// The output on display, if any.
    pub fn output(&self) -> Option<JsRenderOutput> {
        self.session.output().cloned().map(JsRenderOutput::from_output)
    }

    #[wasm_bindgen(getter)]
    pub fn has_output(&self) -> bool {
        self.session.output().is_some()
    }
}

impl MarkVaultEditor {
    pub(crate) fn finish(
        &mut self,
        ticket: RenderTicket,
        settings: &EditorSettings,
    ) -> Result<bool, JsValue> {
        if !self.session.is_current(ticket) {
            return Ok(false);
        }
        let result = self.session.render(settings);
        match self.session.complete(ticket, result) {
            Completion::Applied => Ok(true),
            Completion::Discarded => Ok(false),
            Completion::Failed(e) => {
                let message = e.to_string();
                console_warn(&format!("MarkVault render failed: {message}"));
                Err(JsValue::from_str(&message))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &RenderSession {
        &self.session
    }
}

fn parse_settings(value: JsValue) -> Result<EditorSettings, JsValue> {
    let settings: EditorSettings =
        serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if let Err(e) = settings.validate() {
        console_warn(&format!("MarkVault setting out of range: {e}"));
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use markvault_core::{encode_surface, ImageSurface};

    fn source() -> Vec<u8> {
        encode_surface(&ImageSurface::filled(20, 20, [255, 0, 0, 255])).unwrap()
    }

    fn grayscale() -> EditorSettings {
        EditorSettings {
            grayscale: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_finish_applies_latest() {
        let mut editor = MarkVaultEditor::new(source());
        assert!(!editor.has_output());

        let ticket = editor.begin();
        assert!(editor.is_current(&ticket));
        assert!(editor.finish(ticket.inner, &grayscale()).unwrap());
        assert!(editor.has_output());

        let output = editor.output().unwrap();
        assert_eq!((output.width(), output.height()), (20, 20));
    }

    #[test]
    fn test_stale_ticket_is_skipped() {
        let mut editor = MarkVaultEditor::new(source());
        let stale = editor.begin();
        let latest = editor.begin();

        assert!(!editor.is_current(&stale));
        assert!(!editor.finish(stale.inner, &grayscale()).unwrap());
        assert!(!editor.has_output());

        assert!(editor.finish(latest.inner, &grayscale()).unwrap());
        assert!(editor.session().output().is_some());
    }

    #[test]
    fn test_replace_source_clears_output() {
        let mut editor = MarkVaultEditor::new(source());
        let ticket = editor.begin();
        editor.finish(ticket.inner, &grayscale()).unwrap();

        editor.replace_source(source());
        assert!(!editor.has_output());
        assert!(!editor.is_current(&ticket));
    }

    #[test]
    fn test_ticket_generation() {
        let mut editor = MarkVaultEditor::new(Vec::new());
        assert_eq!(editor.begin().generation(), 1.0);
        assert_eq!(editor.begin().generation(), 2.0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use markvault_core::{encode_surface, ImageSurface};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_render_from_js_object() {
        let source = encode_surface(&ImageSurface::filled(8, 8, [0, 0, 255, 255])).unwrap();
        let mut editor = MarkVaultEditor::new(source);
        let settings = serde_wasm_bindgen::to_value(&EditorSettings {
            grayscale: true,
            ..Default::default()
        })
        .unwrap();

        assert!(editor.render(settings).unwrap());
        assert!(editor.has_output());
    }

    #[wasm_bindgen_test]
    fn test_failed_render_keeps_output() {
        let mut editor = MarkVaultEditor::new(vec![1, 2, 3]);
        let settings = serde_wasm_bindgen::to_value(&EditorSettings::default()).unwrap();
        assert!(editor.render(settings).is_err());
        assert!(!editor.has_output());
    }

    #[wasm_bindgen_test]
    fn test_invalid_font_rejected() {
        let mut editor = MarkVaultEditor::new(Vec::new());
        assert!(editor.set_font(vec![0, 0, 0, 0]).is_err());
    }
}
