//! Tiling of circular cards onto a page.
//!
//! Coordinates are millimetres with the origin at the top-left corner of the
//! page and y growing downwards; renderers flip to their own convention.

use crate::LayoutError;

/// Hard cap on cards per page.
pub const MAX_PER_PAGE: u32 = 6;

/// The centre of one card slot on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlot {
    pub x_mm: f32,
    pub y_mm: f32,
}

/// Computes the ordered slot centres for one page.
///
/// Tries every column count from 1 to `per_page` and keeps the largest one
/// whose grid of `diameter`-sized squares fits the area inside the margins.
/// When nothing fits, the last candidate is used anyway and the cards spill
/// over the margins.
pub fn compute_slots(
    page_width: f32,
    page_height: f32,
    margin_mm: f32,
    diameter_mm: f32,
    per_page: u32,
) -> Result<Vec<PageSlot>, LayoutError> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(LayoutError::InvalidPerPage(per_page));
    }

    let usable_w = page_width - 2.0 * margin_mm;
    let usable_h = page_height - 2.0 * margin_mm;
    let side = diameter_mm;

    let mut chosen: Option<(u32, u32)> = None;
    let mut last = (per_page, 1);
    for cols in 1..=per_page {
        let rows = per_page.div_ceil(cols);
        last = (cols, rows);
        if cols as f32 * side <= usable_w && rows as f32 * side <= usable_h {
            chosen = Some((cols, rows));
        }
    }

    let (cols, rows) = match chosen {
        Some(grid) => grid,
        None => {
            log::warn!(
                "No grid for {} cards of {:.1} mm fits {:.1}x{:.1} mm; using {}x{} with overflow",
                per_page,
                diameter_mm,
                usable_w,
                usable_h,
                last.0,
                last.1
            );
            last
        }
    };

    let cell_w = usable_w / cols as f32;
    let cell_h = usable_h / rows as f32;

    let slots = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .take(per_page as usize)
        .map(|(row, col)| PageSlot {
            x_mm: margin_mm + cell_w * (col as f32 + 0.5),
            y_mm: margin_mm + cell_h * (row as f32 + 0.5),
        })
        .collect();

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_out_of_range_per_page() {
        assert_eq!(
            compute_slots(210.0, 297.0, 10.0, 90.0, 0),
            Err(LayoutError::InvalidPerPage(0))
        );
        assert_eq!(
            compute_slots(210.0, 297.0, 10.0, 90.0, 7),
            Err(LayoutError::InvalidPerPage(7))
        );
        assert_eq!(compute_slots(210.0, 297.0, 10.0, 90.0, 6).unwrap().len(), 6);
    }

    #[test]
    fn test_a4_six_cards_is_two_by_three() {
        let slots = compute_slots(210.0, 297.0, 10.0, 90.0, 6).unwrap();
        let xs: Vec<f32> = slots.iter().map(|s| s.x_mm).collect();
        let ys: Vec<f32> = slots.iter().map(|s| s.y_mm).collect();

        // Row-major: two columns, three rows, top row first.
        assert_eq!(xs[0], xs[2]);
        assert_eq!(xs[1], xs[3]);
        assert!(xs[0] < xs[1]);
        assert_eq!(ys[0], ys[1]);
        assert!(ys[0] < ys[2] && ys[2] < ys[4]);
        assert!((xs[0] - 57.5).abs() < 1e-3);
        assert!((ys[0] - (10.0 + 277.0 / 6.0)).abs() < 1e-3);
    }

    #[test]
    fn test_prefers_widest_feasible_layout() {
        // Small cards: all three fit on one row.
        let slots = compute_slots(210.0, 297.0, 10.0, 50.0, 3).unwrap();
        assert!(slots.iter().all(|s| s.y_mm == slots[0].y_mm));
    }

    #[test]
    fn test_truncates_to_per_page() {
        // 5 cards on a 3x2 grid leave the last cell empty.
        let slots = compute_slots(297.0, 210.0, 10.0, 90.0, 5).unwrap();
        assert_eq!(slots.len(), 5);
        assert_eq!(slots[3].y_mm, slots[4].y_mm);
    }

    #[test]
    fn test_oversized_card_still_returns_slots() {
        let slots = compute_slots(210.0, 297.0, 10.0, 400.0, 2).unwrap();
        assert_eq!(slots.len(), 2);
        // Last candidate considered: both cards in one row.
        assert_eq!(slots[0].y_mm, slots[1].y_mm);
    }

    proptest! {
        #[test]
        fn prop_slots_fit_usable_area_when_feasible(
            diameter in 20.0f32..150.0,
            margin in 0.0f32..25.0,
            per_page in 1u32..=6,
        ) {
            let (w, h) = (210.0f32, 297.0f32);
            let slots = compute_slots(w, h, margin, diameter, per_page).unwrap();
            prop_assert_eq!(slots.len(), per_page as usize);

            let feasible = (1..=per_page).any(|cols| {
                let rows = per_page.div_ceil(cols);
                cols as f32 * diameter <= w - 2.0 * margin
                    && rows as f32 * diameter <= h - 2.0 * margin
            });
            if feasible {
                let half = diameter / 2.0;
                let tol = 1e-3;
                for s in &slots {
                    prop_assert!(s.x_mm - half >= margin - tol);
                    prop_assert!(s.x_mm + half <= w - margin + tol);
                    prop_assert!(s.y_mm - half >= margin - tol);
                    prop_assert!(s.y_mm + half <= h - margin + tol);
                }
            }
        }
    }
}
