//! Printable decks of circular matching-game cards.
//!
//! Every pair of cards in a deck shares exactly one symbol. This crate
//! places the symbols on each card, tiles the cards onto pages and renders
//! the result to PDF.
//!
//! ```no_run
//! use spotdeck::DeckRequest;
//!
//! let request = DeckRequest::from_file("deck.json")?;
//! let pdf = request.render()?;
//! std::fs::write("deck.pdf", pdf)?;
//! # Ok::<(), spotdeck::PipelineError>(())
//! ```

pub mod assembler;
pub mod error;
pub mod request;

pub use assembler::{DocumentAssembler, assemble};
pub use error::PipelineError;
pub use request::DeckRequest;

pub use spotdeck_deck::{DeckError, DeckParams, SymbolDef, SymbolKind, SymbolTable, generate};
pub use spotdeck_layout::{
    CardSpec, LayoutError, Orientation, PageSize, PageSpec, Placement, RandomizationConfig,
    RingLayout, RotationMode, SizeWeights, compute_placements, compute_slots,
};
pub use spotdeck_render_core::RenderError;
pub use spotdeck_render_lopdf::FontLibrary;
pub use spotdeck_types::{Card, DecodedImage, ResolvedSymbol, SymbolId};
