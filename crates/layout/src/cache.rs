use crate::LayoutError;
use crate::grid::{PageSlot, compute_slots};
use std::collections::HashMap;
use std::sync::Arc;

// --- Cache Key ---

/// Bit-exact identity of a `compute_slots` call.
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
struct GridKey {
    page_width: u32,
    page_height: u32,
    margin: u32,
    diameter: u32,
    per_page: u32,
}

impl GridKey {
    fn new(page_width: f32, page_height: f32, margin: f32, diameter: f32, per_page: u32) -> Self {
        Self {
            page_width: page_width.to_bits(),
            page_height: page_height.to_bits(),
            margin: margin.to_bits(),
            diameter: diameter.to_bits(),
            per_page,
        }
    }
}

/// Memoizes page grids so repeated page geometries are solved once.
#[derive(Debug, Default)]
pub struct GridCache {
    grids: HashMap<GridKey, Arc<Vec<PageSlot>>>,
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(
        &mut self,
        page_width: f32,
        page_height: f32,
        margin_mm: f32,
        diameter_mm: f32,
        per_page: u32,
    ) -> Result<Arc<Vec<PageSlot>>, LayoutError> {
        let key = GridKey::new(page_width, page_height, margin_mm, diameter_mm, per_page);
        if let Some(hit) = self.grids.get(&key) {
            return Ok(Arc::clone(hit));
        }
        let slots = Arc::new(compute_slots(
            page_width,
            page_height,
            margin_mm,
            diameter_mm,
            per_page,
        )?);
        self.grids.insert(key, Arc::clone(&slots));
        Ok(slots)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
