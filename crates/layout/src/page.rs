//! Physical page and card geometry.

use crate::LayoutError;
use serde::{Deserialize, Serialize};

/// Named page presets, portrait dimensions in millimetres.
const NAMED_SIZES: &[(&str, f32, f32)] = &[
    ("A3", 297.0, 420.0),
    ("A4", 210.0, 297.0),
    ("A5", 148.0, 210.0),
    ("Letter", 215.9, 279.4),
    ("Legal", 215.9, 355.6),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSize {
    Named(String),
    Custom {
        #[serde(default)]
        width_mm: Option<f32>,
        #[serde(default)]
        height_mm: Option<f32>,
    },
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Named("A4".to_string())
    }
}

impl PageSize {
    pub fn custom(width_mm: f32, height_mm: f32) -> Self {
        PageSize::Custom {
            width_mm: Some(width_mm),
            height_mm: Some(height_mm),
        }
    }

    /// Raw (un-oriented) dimensions in millimetres.
    fn raw_dimensions_mm(&self) -> Result<(f32, f32), LayoutError> {
        match self {
            PageSize::Named(name) => NAMED_SIZES
                .iter()
                .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name.trim()))
                .map(|(_, w, h)| (*w, *h))
                .ok_or_else(|| {
                    LayoutError::InvalidPageSize(format!("unknown named size '{}'", name))
                }),
            PageSize::Custom {
                width_mm: Some(w),
                height_mm: Some(h),
            } => {
                if !(w.is_finite() && h.is_finite()) || *w <= 0.0 || *h <= 0.0 {
                    return Err(LayoutError::InvalidPageSize(format!(
                        "custom size must be positive, got {}x{} mm",
                        w, h
                    )));
                }
                Ok((*w, *h))
            }
            PageSize::Custom { .. } => Err(LayoutError::InvalidPageSize(
                "custom size requires both width_mm and height_mm".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSpec {
    pub size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: f32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            orientation: Orientation::Portrait,
            margin_mm: 10.0,
        }
    }
}

impl PageSpec {
    /// Page width and height in millimetres, with the orientation applied.
    pub fn dimensions_mm(&self) -> Result<(f32, f32), LayoutError> {
        let (w, h) = self.size.raw_dimensions_mm()?;
        let (short, long) = (w.min(h), w.max(h));
        Ok(match self.orientation {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSpec {
    pub diameter_mm: f32,
    pub stroke_mm: f32,
    pub bleed_mm: f32,
    pub per_page: u32,
    pub cut_marks: bool,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            diameter_mm: 90.0,
            stroke_mm: 0.6,
            bleed_mm: 0.0,
            per_page: 6,
            cut_marks: false,
        }
    }
}

impl CardSpec {
    pub fn radius_mm(&self) -> f32 {
        self.diameter_mm / 2.0
    }
}
