use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeckError {
    #[error("Unsupported deck parameters: {0}. Supported orders are 2, 3, 5, 7, 11 and 13.")]
    UnsupportedOrder(String),

    #[error("Card references unknown symbol '{0}'")]
    UnresolvedSymbolReference(String),

    #[error("Image data for symbol '{id}' is not usable: {reason}")]
    UnsupportedImageData { id: String, reason: String },

    #[error("Symbol '{0}' is defined more than once")]
    DuplicateSymbol(String),

    #[error("Card references symbol index {index}, but only {available} symbols are defined")]
    IndexOutOfRange { index: usize, available: usize },
}
