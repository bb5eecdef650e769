//! Drawing of one card onto a surface.

use crate::error::RenderError;
use crate::surface::Surface;
use spotdeck_layout::{CardSpec, Placement};
use spotdeck_types::{Card, Point, ResolvedSymbol, Transform, mm_to_pt};

/// Image side as a fraction of the card diameter, before scaling.
pub const IMAGE_BOX_FRACTION: f32 = 0.2;
/// Font size as a fraction of the card diameter, before scaling.
pub const TEXT_SIZE_FRACTION: f32 = 0.16;
/// Text is lowered by its width over this to sit roughly centred.
const TEXT_BASELINE_DIVISOR: f32 = 2.8;

pub const CUT_MARK_OFFSET_MM: f32 = 3.0;
pub const CUT_MARK_LENGTH_PT: f32 = 12.0;
pub const CUT_MARK_LINE_WIDTH_PT: f32 = 0.5;

/// Draws `card` centred at `center` (points, y up).
///
/// Symbols are clipped to the card circle, widened by the bleed. The outline
/// is stroked after the content so it sits on top.
pub fn draw_card<S: Surface>(
    surface: &mut S,
    center: Point,
    card: &Card,
    placements: &[Placement],
    spec: &CardSpec,
) -> Result<(), RenderError> {
    if card.len() != placements.len() {
        return Err(RenderError::Other(format!(
            "card has {} symbols but {} placements",
            card.len(),
            placements.len()
        )));
    }

    let diameter_pt = mm_to_pt(spec.diameter_mm);
    log::trace!(
        "Drawing card of {} symbols at ({:.1}, {:.1})",
        card.len(),
        center.x,
        center.y
    );
    let clip_radius = mm_to_pt(spec.radius_mm() + spec.bleed_mm);

    surface.scoped(|s| {
        s.clip_circle(center, clip_radius)?;
        for (symbol, placement) in card.symbols.iter().zip(placements) {
            s.scoped(|s| draw_symbol(s, center, symbol, placement, diameter_pt))?;
        }
        Ok(())
    })?;

    if spec.stroke_mm > 0.0 {
        surface.stroke_circle(center, mm_to_pt(spec.radius_mm()), mm_to_pt(spec.stroke_mm))?;
    }
    Ok(())
}

fn draw_symbol<S: Surface>(
    surface: &mut S,
    center: Point,
    symbol: &ResolvedSymbol,
    placement: &Placement,
    diameter_pt: f32,
) -> Result<(), RenderError> {
    let local = Transform::rotate(placement.rotation_deg).then(&Transform::translate(
        center.x + mm_to_pt(placement.x_mm),
        center.y + mm_to_pt(placement.y_mm),
    ));
    surface.transform(&local)?;

    match symbol {
        ResolvedSymbol::Image { id, bitmap } => {
            let side = diameter_pt * IMAGE_BOX_FRACTION * placement.scale;
            surface.draw_image(id, bitmap, Point::new(-side / 2.0, -side / 2.0), side)
        }
        ResolvedSymbol::Text {
            content,
            font_family,
        } => {
            let font = surface.resolve_font(font_family);
            let size = diameter_pt * TEXT_SIZE_FRACTION * placement.scale;
            let width = surface.text_width(&font, content, size);
            let origin = Point::new(-width / 2.0, -width / TEXT_BASELINE_DIVISOR);
            surface.draw_text(&font, size, origin, content)
        }
    }
}

/// Short horizontal ticks just outside the card at 0°, 90°, 180° and 270°.
pub fn draw_cut_marks<S: Surface>(
    surface: &mut S,
    center: Point,
    radius_mm: f32,
) -> Result<(), RenderError> {
    let reach = mm_to_pt(radius_mm + CUT_MARK_OFFSET_MM);
    let half = CUT_MARK_LENGTH_PT / 2.0;
    for angle in [0.0, 90.0, 180.0, 270.0] {
        let offset = Point::polar(reach, angle);
        let mark = center.offset(offset.x, offset.y);
        surface.stroke_line(
            mark.offset(-half, 0.0),
            mark.offset(half, 0.0),
            CUT_MARK_LINE_WIDTH_PT,
        )?;
    }
    Ok(())
}
