//! PDF backend for spotdeck using lopdf.
//!
//! `PdfSurface` implements the `Surface` drawing trait by building lopdf
//! content streams; `PdfWriter` serializes the buffered objects once the
//! document is complete.

pub mod fonts;
mod metrics;
mod surface;
mod writer;

pub use fonts::{FALLBACK_FONT, FontLibrary, to_win_ansi};
pub use surface::PdfSurface;
pub use writer::PdfWriter;
