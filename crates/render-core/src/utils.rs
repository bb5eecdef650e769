use spotdeck_types::{Point, mm_to_pt};

/// Convert a top-left origin Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Converts a page position in millimetres (top-left origin, y down) to
/// points in PDF user space (bottom-left origin, y up).
pub fn page_point(x_mm: f32, y_mm: f32, page_height_pt: f32) -> Point {
    Point::new(mm_to_pt(x_mm), flip_y(mm_to_pt(y_mm), page_height_pt))
}
