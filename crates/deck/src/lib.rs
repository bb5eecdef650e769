//! Deck construction: which symbols go on which card, and what each symbol is.

pub mod error;
pub mod plane;
pub mod symbols;

pub use error::DeckError;
pub use plane::{DeckParams, SUPPORTED_ORDERS, generate};
pub use symbols::{SymbolDef, SymbolKind, SymbolTable, decode_data_url};
