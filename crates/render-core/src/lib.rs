//! Backend-independent card drawing.
//!
//! This crate provides the pieces shared by every output backend:
//! - the `Surface` trait that backends implement
//! - `draw_card` and `draw_cut_marks`, which turn placements into surface calls
//! - error types for rendering operations
//! - a `RecordingSurface` for inspecting draw calls in tests

pub mod card;
mod error;
pub mod recording;
mod surface;
pub mod utils;

pub use card::{draw_card, draw_cut_marks};
pub use error::RenderError;
pub use surface::Surface;
