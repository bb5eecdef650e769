//! The JSON document describing a deck to print.

use crate::assembler::DocumentAssembler;
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use spotdeck_deck::{DeckParams, SymbolDef, SymbolTable, generate};
use spotdeck_layout::{CardSpec, PageSpec, RandomizationConfig};
use spotdeck_types::{Card, SymbolId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckRequest {
    pub symbols: Vec<SymbolDef>,
    /// Explicit cards as symbol ids. When absent the deck is generated.
    pub cards: Option<Vec<Vec<SymbolId>>>,
    /// Order of the generated deck. Inferred from the symbol count if absent.
    #[serde(alias = "n")]
    pub order: Option<usize>,
    pub page: PageSpec,
    pub card: CardSpec,
    #[serde(alias = "randomization")]
    pub random: RandomizationConfig,
    /// Font name to TrueType file.
    pub fonts: BTreeMap<String, PathBuf>,
    pub title: Option<String>,
}

impl DeckRequest {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read request from '{}': {}", path.display(), e),
            )
        })?;
        let request = Self::from_json_str(&source)?;
        log::debug!(
            "Loaded request from {}: {} symbols",
            path.display(),
            request.symbols.len()
        );
        Ok(request)
    }

    /// Resolves the request's cards, generating them if none were given.
    pub fn cards(&self) -> Result<Vec<Card>, PipelineError> {
        let table = SymbolTable::from_defs(&self.symbols)?;
        if let Some(cards) = &self.cards {
            return Ok(table.resolve_cards(cards)?);
        }

        let params = match self.order {
            Some(order) => DeckParams::from_order(order)?,
            None => DeckParams::from_num_cards(table.len())?,
        };
        log::debug!(
            "Generating order {} deck: {} cards of {} symbols",
            params.order,
            params.num_cards,
            params.symbols_per_card
        );
        Ok(table.resolve_indexed(&generate(params.order)?)?)
    }

    /// Builds an assembler with the request's fonts and title.
    pub fn assembler(&self) -> Result<DocumentAssembler, PipelineError> {
        let mut assembler = DocumentAssembler::new();
        for (name, path) in &self.fonts {
            assembler = assembler.with_font_file(name, path)?;
        }
        if let Some(title) = &self.title {
            assembler = assembler.with_title(title.clone());
        }
        Ok(assembler)
    }

    /// Resolves, lays out and renders the whole request.
    pub fn render(&self) -> Result<Vec<u8>, PipelineError> {
        let cards = self.cards()?;
        self.assembler()?
            .assemble(&cards, &self.page, &self.card, &self.random)
    }
}
