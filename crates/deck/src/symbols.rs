//! Symbol definitions and their resolution into drawable symbols.

use crate::DeckError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use spotdeck_types::{Card, DecodedImage, ResolvedSymbol, SymbolId};
use std::collections::HashMap;
use std::sync::Arc;

/// Font used when a text symbol names no family.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica-Bold";
/// Weights at or above this select the bold face of a plain family.
pub const BOLD_WEIGHT: u16 = 600;

/// One entry of a deck's symbol list, as it appears in a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDef {
    pub id: SymbolId,
    #[serde(flatten)]
    pub kind: SymbolKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SymbolKind {
    Text {
        text: String,
        #[serde(default, rename = "fontFamily", alias = "font_family")]
        font_family: Option<String>,
        #[serde(default, rename = "fontWeight", alias = "font_weight")]
        font_weight: Option<u16>,
    },
    Image {
        /// A `data:<mime>;base64,<payload>` URL.
        src: String,
    },
}

impl SymbolDef {
    pub fn text(id: impl Into<SymbolId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SymbolKind::Text {
                text: text.into(),
                font_family: None,
                font_weight: None,
            },
        }
    }

    pub fn image(id: impl Into<SymbolId>, src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: SymbolKind::Image { src: src.into() },
        }
    }
}

/// Font name for a family/weight pair.
///
/// A bold weight on a family without a style suffix (`Helvetica`, `Inter`)
/// selects `<family>-Bold`; suffixed names are used as given.
fn font_name(family: Option<&str>, weight: Option<u16>) -> String {
    let family = family
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FONT_FAMILY);
    match weight {
        Some(w) if w >= BOLD_WEIGHT && !family.contains('-') => format!("{}-Bold", family),
        _ => family.to_string(),
    }
}

/// Decodes a base64 data URL into an RGB bitmap with optional alpha.
pub fn decode_data_url(id: &str, src: &str) -> Result<DecodedImage, DeckError> {
    let unsupported = |reason: String| DeckError::UnsupportedImageData {
        id: id.to_string(),
        reason,
    };

    let rest = src
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &src[5..])
        .ok_or_else(|| unsupported("not a data URL".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| unsupported("data URL has no payload".to_string()))?;
    if !meta.to_ascii_lowercase().ends_with(";base64") {
        return Err(unsupported(format!(
            "only base64 data URLs are supported, got '{}'",
            meta
        )));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| unsupported(format!("invalid base64: {}", e)))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| unsupported(format!("cannot decode image: {}", e)))?;

    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(unsupported("image is empty".to_string()));
    }

    if image.color().has_alpha() {
        let rgba = image.to_rgba8().into_raw();
        let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
        let mut alpha = Vec::with_capacity(rgba.len() / 4);
        for px in rgba.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
            alpha.push(px[3]);
        }
        Ok(DecodedImage::new(width, height, rgb, Some(alpha)))
    } else {
        Ok(DecodedImage::new(
            width,
            height,
            image.to_rgb8().into_raw(),
            None,
        ))
    }
}

/// Resolved symbols of a deck, in definition order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    order: Vec<SymbolId>,
    symbols: HashMap<SymbolId, ResolvedSymbol>,
}

impl SymbolTable {
    /// Resolves every definition. Identical image sources are decoded once.
    pub fn from_defs(defs: &[SymbolDef]) -> Result<Self, DeckError> {
        let mut table = Self::default();
        let mut decoded: HashMap<&str, Arc<DecodedImage>> = HashMap::new();

        for def in defs {
            if table.symbols.contains_key(&def.id) {
                return Err(DeckError::DuplicateSymbol(def.id.to_string()));
            }
            let resolved = match &def.kind {
                SymbolKind::Text {
                    text,
                    font_family,
                    font_weight,
                } => ResolvedSymbol::text(
                    text.clone(),
                    font_name(font_family.as_deref(), *font_weight),
                ),
                SymbolKind::Image { src } => {
                    let bitmap = match decoded.get(src.as_str()) {
                        Some(bitmap) => Arc::clone(bitmap),
                        None => {
                            let bitmap = Arc::new(decode_data_url(def.id.as_str(), src)?);
                            decoded.insert(src.as_str(), Arc::clone(&bitmap));
                            bitmap
                        }
                    };
                    ResolvedSymbol::image(def.id.clone(), bitmap)
                }
            };
            table.order.push(def.id.clone());
            table.symbols.insert(def.id.clone(), resolved);
        }

        log::debug!(
            "Resolved {} symbols ({} distinct images)",
            table.len(),
            decoded.len()
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &SymbolId) -> Option<&ResolvedSymbol> {
        self.symbols.get(id)
    }

    /// Maps cards given as symbol ids.
    pub fn resolve_cards(&self, cards: &[Vec<SymbolId>]) -> Result<Vec<Card>, DeckError> {
        cards
            .iter()
            .map(|ids| {
                ids.iter()
                    .map(|id| {
                        self.get(id)
                            .cloned()
                            .ok_or_else(|| DeckError::UnresolvedSymbolReference(id.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Card::new)
            })
            .collect()
    }

    /// Maps cards given as indices into the definition order.
    pub fn resolve_indexed(&self, cards: &[Vec<usize>]) -> Result<Vec<Card>, DeckError> {
        cards
            .iter()
            .map(|indices| {
                indices
                    .iter()
                    .map(|&index| {
                        self.order
                            .get(index)
                            .and_then(|id| self.symbols.get(id))
                            .cloned()
                            .ok_or(DeckError::IndexOutOfRange {
                                index,
                                available: self.len(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Card::new)
            })
            .collect()
    }
}
