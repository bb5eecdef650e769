use spotdeck_deck::DeckError;
use spotdeck_layout::LayoutError;
use spotdeck_render_core::RenderError;
use thiserror::Error;

/// A comprehensive error type for the entire deck generation pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Deck is invalid: {0}")]
    Deck(#[from] DeckError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Card {index} has {actual} symbols, expected {expected}")]
    CardLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Deck has no cards")]
    EmptyDeck,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
