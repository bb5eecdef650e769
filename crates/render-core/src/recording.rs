//! A surface that records drawing calls instead of producing output.
//!
//! Used to test drawing logic without a real backend.

use crate::error::RenderError;
use crate::surface::Surface;
use spotdeck_types::{DecodedImage, Point, SymbolId, Transform};
use std::sync::Arc;

/// Family the recording surface falls back to for unknown names.
pub const RECORDING_FALLBACK_FONT: &str = "Helvetica-Bold";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPage { width: f32, height: f32 },
    EndPage,
    Save,
    Restore,
    Transform(Transform),
    ClipCircle { center: Point, radius: f32 },
    StrokeCircle { center: Point, radius: f32, line_width: f32 },
    StrokeLine { from: Point, to: Point, line_width: f32 },
    Text { font: String, size: f32, origin: Point, text: String },
    Image { id: SymbolId, origin: Point, side: f32 },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    known_fonts: Vec<String>,
    depth: usize,
    max_depth: usize,
    fail_images: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            known_fonts: vec![RECORDING_FALLBACK_FONT.to_string()],
            ..Default::default()
        }
    }

    pub fn with_fonts(mut self, fonts: &[&str]) -> Self {
        self.known_fonts.extend(fonts.iter().map(|f| f.to_string()));
        self
    }

    /// Makes every `draw_image` call fail.
    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    /// Current save nesting; zero when every save was restored.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    type Font = String;

    fn begin_page(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        self.ops.push(DrawOp::BeginPage { width, height });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), RenderError> {
        self.ops.push(DrawOp::EndPage);
        Ok(())
    }

    fn save(&mut self) -> Result<(), RenderError> {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.ops.push(DrawOp::Save);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        if self.depth == 0 {
            return Err(RenderError::Other("restore without save".into()));
        }
        self.depth -= 1;
        self.ops.push(DrawOp::Restore);
        Ok(())
    }

    fn transform(&mut self, transform: &Transform) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Transform(*transform));
        Ok(())
    }

    fn clip_circle(&mut self, center: Point, radius: f32) -> Result<(), RenderError> {
        self.ops.push(DrawOp::ClipCircle { center, radius });
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f32,
        line_width: f32,
    ) -> Result<(), RenderError> {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            line_width,
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32) -> Result<(), RenderError> {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            line_width,
        });
        Ok(())
    }

    fn resolve_font(&mut self, family: &str) -> String {
        if self.known_fonts.iter().any(|f| f == family) {
            family.to_string()
        } else {
            RECORDING_FALLBACK_FONT.to_string()
        }
    }

    /// Every glyph is half an em wide.
    fn text_width(&self, _font: &String, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn draw_text(
        &mut self,
        font: &String,
        size: f32,
        origin: Point,
        text: &str,
    ) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Text {
            font: font.clone(),
            size,
            origin,
            text: text.to_string(),
        });
        Ok(())
    }

    fn draw_image(
        &mut self,
        id: &SymbolId,
        _image: &Arc<DecodedImage>,
        origin: Point,
        side: f32,
    ) -> Result<(), RenderError> {
        if self.fail_images {
            return Err(RenderError::Other(format!("cannot draw image '{}'", id)));
        }
        self.ops.push(DrawOp::Image {
            id: id.clone(),
            origin,
            side,
        });
        Ok(())
    }
}
