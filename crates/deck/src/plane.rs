//! Finite projective plane decks.
//!
//! A plane of prime order `n` has `n² + n + 1` points and as many lines; every
//! line holds `n + 1` points and any two lines meet in exactly one point.
//! Points are symbol indices and lines are cards.

use crate::DeckError;
use serde::Serialize;

/// Orders for which the modular construction below yields a valid plane.
pub const SUPPORTED_ORDERS: [usize; 6] = [2, 3, 5, 7, 11, 13];

/// The three equivalent ways of sizing a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeckParams {
    pub order: usize,
    pub symbols_per_card: usize,
    pub num_cards: usize,
}

impl DeckParams {
    pub fn from_order(order: usize) -> Result<Self, DeckError> {
        if !SUPPORTED_ORDERS.contains(&order) {
            return Err(DeckError::UnsupportedOrder(format!("order {}", order)));
        }
        Ok(Self {
            order,
            symbols_per_card: order + 1,
            num_cards: order * order + order + 1,
        })
    }

    pub fn from_symbols_per_card(symbols_per_card: usize) -> Result<Self, DeckError> {
        symbols_per_card
            .checked_sub(1)
            .and_then(|order| Self::from_order(order).ok())
            .ok_or_else(|| {
                DeckError::UnsupportedOrder(format!("{} symbols per card", symbols_per_card))
            })
    }

    pub fn from_num_cards(num_cards: usize) -> Result<Self, DeckError> {
        SUPPORTED_ORDERS
            .iter()
            .find(|&&n| n * n + n + 1 == num_cards)
            .map(|&n| Self::from_order(n))
            .unwrap_or_else(|| Err(DeckError::UnsupportedOrder(format!("{} cards", num_cards))))
    }

    /// Distinct symbols needed; equal to the number of cards.
    pub fn total_symbols(&self) -> usize {
        self.num_cards
    }
}

/// Builds the cards of the plane of order `order` as symbol indices.
///
/// The first `order + 1` cards all contain symbol 0.
pub fn generate(order: usize) -> Result<Vec<Vec<usize>>, DeckError> {
    let params = DeckParams::from_order(order)?;
    let n = params.order;
    let mut cards = Vec::with_capacity(params.num_cards);

    cards.push((0..=n).collect());

    for j in 0..n {
        let mut card = Vec::with_capacity(n + 1);
        card.push(0);
        card.extend((0..n).map(|k| n + 1 + n * j + k));
        cards.push(card);
    }

    for i in 0..n {
        for j in 0..n {
            let mut card = Vec::with_capacity(n + 1);
            card.push(i + 1);
            card.extend((0..n).map(|k| n + 1 + n * k + (i * k + j) % n));
            cards.push(card);
        }
    }

    log::debug!(
        "Generated deck of order {}: {} cards, {} symbols each",
        n,
        cards.len(),
        params.symbols_per_card
    );
    Ok(cards)
}
