use crate::error::PipelineError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spotdeck_layout::{
    CardSpec, GridCache, LayoutError, MAX_PER_PAGE, PageSpec, RandomizationConfig, SymbolPlacer,
};
use spotdeck_render_core::utils::page_point;
use spotdeck_render_core::{Surface, draw_card, draw_cut_marks};
use spotdeck_render_lopdf::{FontLibrary, PdfSurface};
use spotdeck_types::{Card, mm_to_pt};
use std::path::Path;

/// Lays cards out on pages and renders them to a PDF document.
#[derive(Default)]
pub struct DocumentAssembler {
    fonts: FontLibrary,
    title: Option<String>,
    grids: GridCache,
}

impl DocumentAssembler {
    /// Creates an assembler with the standard PDF fonts.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_fonts(mut self, fonts: FontLibrary) -> Self {
        self.fonts = fonts;
        self
    }

    /// Registers a TrueType file under `name` for text symbols to use.
    pub fn with_font_file<P: AsRef<Path>>(mut self, name: &str, path: P) -> Result<Self, PipelineError> {
        self.fonts.register_truetype_file(name, path.as_ref())?;
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Renders `cards` in order, `card_spec.per_page` to a page.
    ///
    /// Every input is validated before anything is drawn, so a failure never
    /// yields a partial document.
    pub fn assemble(
        &mut self,
        cards: &[Card],
        page_spec: &PageSpec,
        card_spec: &CardSpec,
        random: &RandomizationConfig,
    ) -> Result<Vec<u8>, PipelineError> {
        if !(1..=MAX_PER_PAGE).contains(&card_spec.per_page) {
            return Err(LayoutError::InvalidPerPage(card_spec.per_page).into());
        }
        let (page_w_mm, page_h_mm) = page_spec.dimensions_mm()?;
        validate_geometry(page_spec, card_spec)?;
        let placer = SymbolPlacer::new(random, card_spec.radius_mm())?;
        let symbols_per_card = check_card_lengths(cards)?;

        let slots = self.grids.slots(
            page_w_mm,
            page_h_mm,
            page_spec.margin_mm,
            card_spec.diameter_mm,
            card_spec.per_page,
        )?;

        let mut master = match random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut surface = PdfSurface::new(self.fonts.clone())?;
        if let Some(title) = &self.title {
            surface.set_title(title.clone());
        }

        let (page_w_pt, page_h_pt) = (mm_to_pt(page_w_mm), mm_to_pt(page_h_mm));
        let mut fallbacks = 0;
        for (page_index, page_cards) in cards.chunks(slots.len()).enumerate() {
            surface.begin_page(page_w_pt, page_h_pt)?;
            for (card, slot) in page_cards.iter().zip(slots.iter()) {
                let mut card_rng = StdRng::seed_from_u64(master.random::<u64>());
                let placements = placer.place(card.len(), &mut card_rng);
                fallbacks += placements.iter().filter(|p| p.fallback).count();

                let center = page_point(slot.x_mm, slot.y_mm, page_h_pt);
                draw_card(&mut surface, center, card, &placements, card_spec)?;
                if card_spec.cut_marks {
                    draw_cut_marks(&mut surface, center, card_spec.radius_mm())?;
                }
            }
            surface.end_page()?;
            log::debug!("Page {} done with {} cards", page_index + 1, page_cards.len());
        }

        log::info!(
            "Assembled {} cards of {} symbols on {} pages ({} symbols shrunk to fit)",
            cards.len(),
            symbols_per_card,
            surface.page_count(),
            fallbacks
        );
        Ok(surface.finish()?)
    }
}

/// Renders `cards` with the standard fonts.
pub fn assemble(
    cards: &[Card],
    page_spec: &PageSpec,
    card_spec: &CardSpec,
    random: &RandomizationConfig,
) -> Result<Vec<u8>, PipelineError> {
    DocumentAssembler::new().assemble(cards, page_spec, card_spec, random)
}

/// Returns the shared symbol count, or the first card that differs.
fn check_card_lengths(cards: &[Card]) -> Result<usize, PipelineError> {
    let expected = cards.first().ok_or(PipelineError::EmptyDeck)?.len();
    match cards.iter().position(|card| card.len() != expected) {
        Some(index) => Err(PipelineError::CardLengthMismatch {
            index,
            expected,
            actual: cards[index].len(),
        }),
        None => Ok(expected),
    }
}

fn validate_geometry(page_spec: &PageSpec, card_spec: &CardSpec) -> Result<(), LayoutError> {
    let checks = [
        ("diameter_mm", card_spec.diameter_mm, false),
        ("stroke_mm", card_spec.stroke_mm, true),
        ("bleed_mm", card_spec.bleed_mm, true),
        ("margin_mm", page_spec.margin_mm, true),
    ];
    for (name, value, zero_ok) in checks {
        let valid = value.is_finite() && (value > 0.0 || (zero_ok && value == 0.0));
        if !valid {
            return Err(LayoutError::InvalidConfig(format!(
                "{} must be {}, got {}",
                name,
                if zero_ok { "non-negative" } else { "positive" },
                value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotdeck_types::ResolvedSymbol;

    fn text_card(labels: &[&str]) -> Card {
        Card::new(
            labels
                .iter()
                .map(|l| ResolvedSymbol::text(*l, "Helvetica-Bold"))
                .collect(),
        )
    }

    #[test]
    fn test_card_length_check() {
        assert!(matches!(
            check_card_lengths(&[]),
            Err(PipelineError::EmptyDeck)
        ));
        assert_eq!(
            check_card_lengths(&[text_card(&["a", "b"]), text_card(&["c", "d"])]).unwrap(),
            2
        );
        assert!(matches!(
            check_card_lengths(&[text_card(&["a", "b", "c"]), text_card(&["d", "e"])]),
            Err(PipelineError::CardLengthMismatch {
                index: 1,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_rejects_non_positive_diameter() {
        let card = CardSpec {
            diameter_mm: 0.0,
            ..CardSpec::default()
        };
        assert!(validate_geometry(&PageSpec::default(), &card).is_err());
        assert!(validate_geometry(&PageSpec::default(), &CardSpec::default()).is_ok());
    }

    #[test]
    fn test_grid_is_computed_once_per_geometry() {
        let mut assembler = DocumentAssembler::new();
        let cards = vec![text_card(&["a", "b"]); 3];
        let random = RandomizationConfig::default().with_seed(1);
        assembler
            .assemble(&cards, &PageSpec::default(), &CardSpec::default(), &random)
            .unwrap();
        assembler
            .assemble(&cards, &PageSpec::default(), &CardSpec::default(), &random)
            .unwrap();
        assert_eq!(assembler.grids.len(), 1);
    }
}
