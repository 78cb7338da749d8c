//! Last-write-wins bookkeeping for repeated renders.
//!
//! The editor re-renders on every settings change. When renders overlap,
//! only the most recently requested one may replace the displayed output.
//! Each request takes a [`RenderTicket`]; a newer ticket supersedes all
//! older ones, and their results are discarded on completion.

use tracing::{debug, warn};

use crate::pipeline::{render_settings, ProcessedOutput, RenderError};
use crate::settings::EditorSettings;
use crate::watermark::WatermarkFont;

/// Proof that a render was requested, ordered by request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket {
    generation: u64,
}

impl RenderTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What happened to a completed render.
#[derive(Debug)]
pub enum Completion {
    /// The result is now the displayed output.
    Applied,
    /// A newer render was requested; the result was dropped.
    Discarded,
    /// The render failed; the previous output is still displayed.
    Failed(RenderError),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// One loaded image and the output currently on display.
#[derive(Debug)]
pub struct RenderSession {
    source: Vec<u8>,
    font: WatermarkFont,
    generation: u64,
    output: Option<ProcessedOutput>,
}

impl RenderSession {
    /// Start a session for `source` using the built-in font.
    pub fn new(source: Vec<u8>) -> Self {
        Self::with_font(source, WatermarkFont::Builtin)
    }

    pub fn with_font(source: Vec<u8>, font: WatermarkFont) -> Self {
        Self {
            source,
            font,
            generation: 0,
            output: None,
        }
    }

    /// The original, never modified, source bytes.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn font(&self) -> &WatermarkFont {
        &self.font
    }

    /// Change the font used by later renders.
    pub fn set_font(&mut self, font: WatermarkFont) {
        self.font = font;
    }

    /// The displayed output, if any render has been applied.
    pub fn output(&self) -> Option<&ProcessedOutput> {
        self.output.as_ref()
    }

    /// Request a render, superseding every earlier ticket.
    pub fn begin(&mut self) -> RenderTicket {
        self.generation += 1;
        RenderTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` is still the latest request.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Render the source with `settings` without touching session state.
    pub fn render(&self, settings: &EditorSettings) -> Result<ProcessedOutput, RenderError> {
        render_settings(&self.source, settings, &self.font)
    }

    /// Hand in the result for `ticket`.
    ///
    /// Stale tickets are discarded whatever their result. A current failure
    /// leaves the displayed output unchanged.
    pub fn complete(
        &mut self,
        ticket: RenderTicket,
        result: Result<ProcessedOutput, RenderError>,
    ) -> Completion {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale render"
            );
            return Completion::Discarded;
        }
        match result {
            Ok(output) => {
                self.output = Some(output);
                Completion::Applied
            }
            Err(e) => {
                warn!(error = %e, "render failed, keeping previous output");
                Completion::Failed(e)
            }
        }
    }

    /// Begin, render and complete in one step.
    pub fn render_latest(&mut self, settings: &EditorSettings) -> Completion {
        let ticket = self.begin();
        let result = self.render(settings);
        self.complete(ticket, result)
    }

    /// Load a new image. Clears the output and supersedes in-flight tickets.
    pub fn replace_source(&mut self, source: Vec<u8>) {
        self.source = source;
        self.output = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeError;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_source(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn grayscale() -> EditorSettings {
        EditorSettings {
            grayscale: true,
            ..Default::default()
        }
    }

    fn watermarked() -> EditorSettings {
        EditorSettings {
            watermark_enabled: true,
            text: "TEST".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_tickets_increase() {
        let mut session = RenderSession::new(Vec::new());
        let a = session.begin();
        let b = session.begin();
        assert!(b > a);
        assert!(!session.is_current(a));
        assert!(session.is_current(b));
    }

    #[test]
    fn test_latest_result_wins() {
        let mut session = RenderSession::new(png_source(40, 40, [255, 0, 0, 255]));

        let first = session.begin();
        let first_result = session.render(&grayscale());
        let second = session.begin();
        let second_result = session.render(&watermarked());

        // Completions arrive out of order
        assert!(session.complete(second, second_result).is_applied());
        assert!(matches!(
            session.complete(first, first_result),
            Completion::Discarded
        ));

        let expected = session.render(&watermarked()).unwrap();
        assert_eq!(session.output(), Some(&expected));
    }

    #[test]
    fn test_failure_keeps_previous_output() {
        let mut session = RenderSession::new(png_source(10, 10, [1, 2, 3, 255]));
        assert!(session.render_latest(&grayscale()).is_applied());
        let shown = session.output().cloned();

        let ticket = session.begin();
        let outcome = session.complete(ticket, Err(RenderError::Decode(DecodeError::EmptyInput)));
        assert!(matches!(outcome, Completion::Failed(_)));
        assert_eq!(session.output().cloned(), shown);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut session = RenderSession::new(Vec::new());
        let stale = session.begin();
        session.begin();
        let outcome = session.complete(stale, Err(RenderError::Decode(DecodeError::EmptyInput)));
        assert!(matches!(outcome, Completion::Discarded));
    }

    #[test]
    fn test_render_latest_with_bad_source_fails() {
        let mut session = RenderSession::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(
            session.render_latest(&EditorSettings::default()),
            Completion::Failed(RenderError::Decode(_))
        ));
        assert!(session.output().is_none());
    }

    #[test]
    fn test_replace_source_supersedes_in_flight() {
        let mut session = RenderSession::new(png_source(8, 8, [0, 0, 0, 255]));
        assert!(session.render_latest(&grayscale()).is_applied());

        let in_flight = session.begin();
        let result = session.render(&grayscale());
        session.replace_source(png_source(16, 4, [9, 9, 9, 255]));

        assert!(session.output().is_none());
        assert!(matches!(
            session.complete(in_flight, result),
            Completion::Discarded
        ));

        assert!(session.render_latest(&grayscale()).is_applied());
        let output = session.output().unwrap();
        assert_eq!((output.width, output.height), (16, 4));
    }

    #[test]
    fn test_source_is_never_modified() {
        let source = png_source(12, 12, [50, 60, 70, 255]);
        let mut session = RenderSession::new(source.clone());
        session.render_latest(&grayscale());
        session.render_latest(&watermarked());
        assert_eq!(session.source(), source.as_slice());
    }
}
