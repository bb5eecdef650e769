pub mod document;
pub mod geometry;
pub mod ids;

pub use document::{Card, DecodedImage, ResolvedSymbol};
pub use geometry::{MM_TO_PT, Point, Transform, mm_to_pt};
pub use ids::SymbolId;
