use crate::error::RenderError;
use spotdeck_types::{DecodedImage, Point, SymbolId, Transform};
use std::sync::Arc;

/// A drawing backend for cards.
///
/// All coordinates are points in the current user space, y axis up. Graphics
/// state changes (`transform`, `clip_circle`) last until the matching
/// `restore`.
pub trait Surface {
    /// Backend handle of a resolved font.
    type Font: Clone;

    fn begin_page(&mut self, width_pt: f32, height_pt: f32) -> Result<(), RenderError>;

    fn end_page(&mut self) -> Result<(), RenderError>;

    fn save(&mut self) -> Result<(), RenderError>;

    fn restore(&mut self) -> Result<(), RenderError>;

    /// Concatenates `transform` onto the current transformation matrix.
    fn transform(&mut self, transform: &Transform) -> Result<(), RenderError>;

    fn clip_circle(&mut self, center: Point, radius: f32) -> Result<(), RenderError>;

    fn stroke_circle(&mut self, center: Point, radius: f32, line_width: f32)
    -> Result<(), RenderError>;

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32) -> Result<(), RenderError>;

    /// Looks up a font by family name. Unknown names resolve to the
    /// backend's fallback font, so this never fails.
    fn resolve_font(&mut self, family: &str) -> Self::Font;

    fn text_width(&self, font: &Self::Font, text: &str, size: f32) -> f32;

    /// Draws `text` with its baseline starting at `origin`.
    fn draw_text(
        &mut self,
        font: &Self::Font,
        size: f32,
        origin: Point,
        text: &str,
    ) -> Result<(), RenderError>;

    /// Draws `image` stretched over the square of side `side` whose
    /// lower-left corner is `origin`. Backends may share one copy of a
    /// bitmap between calls, but never between different bitmaps.
    fn draw_image(
        &mut self,
        id: &SymbolId,
        image: &Arc<DecodedImage>,
        origin: Point,
        side: f32,
    ) -> Result<(), RenderError>;

    /// Runs `draw` between a save and a restore. The restore happens even
    /// when `draw` fails; the first error wins.
    fn scoped<F>(&mut self, draw: F) -> Result<(), RenderError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<(), RenderError>,
    {
        self.save()?;
        let drawn = draw(self);
        let restored = self.restore();
        drawn.and(restored)
    }
}
