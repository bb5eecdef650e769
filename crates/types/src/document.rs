use crate::ids::SymbolId;
use std::fmt;
use std::sync::Arc;

/// A decoded bitmap ready to be embedded in a document.
///
/// Pixels are stored as packed 8-bit RGB; `alpha` holds one byte per pixel
/// when the source image had transparency.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>, alpha: Option<Vec<u8>>) -> Self {
        Self {
            width,
            height,
            rgb,
            alpha,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_alpha", &self.alpha.is_some())
            .finish()
    }
}

/// A symbol ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSymbol {
    Text {
        content: String,
        font_family: String,
    },
    Image {
        id: SymbolId,
        bitmap: Arc<DecodedImage>,
    },
}

impl ResolvedSymbol {
    pub fn text(content: impl Into<String>, font_family: impl Into<String>) -> Self {
        ResolvedSymbol::Text {
            content: content.into(),
            font_family: font_family.into(),
        }
    }

    pub fn image(id: impl Into<SymbolId>, bitmap: Arc<DecodedImage>) -> Self {
        ResolvedSymbol::Image {
            id: id.into(),
            bitmap,
        }
    }
}

/// The ordered symbols printed on one card.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Card {
    pub symbols: Vec<ResolvedSymbol>,
}

impl Card {
    pub fn new(symbols: Vec<ResolvedSymbol>) -> Self {
        Self { symbols }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl From<Vec<ResolvedSymbol>> for Card {
    fn from(symbols: Vec<ResolvedSymbol>) -> Self {
        Self { symbols }
    }
}
