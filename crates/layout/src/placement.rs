//! Randomized placement of symbols on a circular card.
//!
//! Every symbol gets a nominal slot on a ring, a size category, a scale and a
//! rotation. Its position is then searched with a bounded ladder of attempts
//! that wobble the angle and pull the symbol towards the centre until it no
//! longer overlaps the symbols already placed. A symbol that never clears is
//! shrunk and accepted where the last attempt left it.
//!
//! Coordinates are millimetres relative to the card centre, y axis up.

use crate::LayoutError;
use crate::config::{
    RandomizationConfig, Range, RingLayout, RotationMode, SizeCategory, step_bounds,
};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use spotdeck_types::Point;

/// Attempts made for one symbol before falling back.
pub const MAX_ATTEMPTS: usize = 36;
/// Extra angular wobble added on every attempt after the first.
pub const ATTEMPT_WOBBLE_DEG: f32 = 6.0;
/// Radius decrement applied on every attempt after the first.
pub const RADIUS_STEP_MM: f32 = 0.5;
/// Gap kept between a symbol's footprint and the card edge.
pub const SAFETY_MARGIN_MM: f32 = 1.0;
/// Scale factor applied to a symbol that never cleared its neighbours.
pub const FALLBACK_SHRINK: f32 = 0.9;

const AUTO_INNER_RATIO: f32 = 0.58;
const AUTO_OUTER_RATIO: f32 = 0.88;
const AUTO_DOUBLE_RING_MIN_SLOTS: usize = 8;

/// The computed transform of one symbol slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    /// Collision radius at the final scale.
    pub footprint_mm: f32,
    /// Set when every attempt collided and the symbol was shrunk instead.
    pub fallback: bool,
}

impl Placement {
    pub fn position(&self) -> Point {
        Point::new(self.x_mm, self.y_mm)
    }

    /// True when the two footprints are at least `margin_mm` apart.
    pub fn clears(&self, other: &Placement, margin_mm: f32) -> bool {
        clears(self.position(), self.footprint_mm, other, margin_mm)
    }
}

fn clears(candidate: Point, footprint: f32, other: &Placement, margin_mm: f32) -> bool {
    candidate.distance(other.position()) >= footprint + other.footprint_mm + margin_mm
}

/// Half-diagonal of a symbol's bounding square.
pub fn footprint_radius(diameter_mm: f32, box_fraction: f32, scale: f32) -> f32 {
    (diameter_mm * box_fraction * scale) / std::f32::consts::SQRT_2
}

/// Places symbols for every card of a document.
///
/// Construction validates the configuration once; `place` can then be called
/// per card with that card's random source.
pub struct SymbolPlacer<'a> {
    config: &'a RandomizationConfig,
    card_radius_mm: f32,
    categories: WeightedIndex<f32>,
}

impl<'a> SymbolPlacer<'a> {
    pub fn new(config: &'a RandomizationConfig, card_radius_mm: f32) -> Result<Self, LayoutError> {
        config.validate()?;
        if !(card_radius_mm.is_finite() && card_radius_mm > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "card radius must be positive, got {}",
                card_radius_mm
            )));
        }
        let categories = WeightedIndex::new(config.size_weights.normalized()?)
            .map_err(|e| LayoutError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            config,
            card_radius_mm,
            categories,
        })
    }

    /// Computes one placement per slot, in slot order.
    pub fn place<R: Rng + ?Sized>(&self, slot_count: usize, rng: &mut R) -> Vec<Placement> {
        let mut placed: Vec<Placement> = Vec::with_capacity(slot_count);
        for (index, (nominal_deg, ring_ratio)) in
            self.ring_slots(slot_count).into_iter().enumerate()
        {
            let placement = self.place_one(index, nominal_deg, ring_ratio, &placed, rng);
            placed.push(placement);
        }
        placed
    }

    /// Nominal angle and ring ratio for every slot.
    fn ring_slots(&self, slot_count: usize) -> Vec<(f32, f32)> {
        if slot_count == 0 {
            return Vec::new();
        }
        let single = |count: usize, ratio: f32, offset_deg: f32| {
            let step = 360.0 / count as f32;
            (0..count)
                .map(move |i| (offset_deg + step * i as f32, ratio))
                .collect::<Vec<_>>()
        };
        let double = |inner_count: usize, inner_ratio: f32, outer_ratio: f32| {
            let inner_count = inner_count.clamp(1, slot_count.saturating_sub(1).max(1));
            let outer_count = slot_count - inner_count;
            let mut slots = single(inner_count, inner_ratio, 0.0);
            if outer_count > 0 {
                let half_step = 180.0 / outer_count as f32;
                slots.extend(single(outer_count, outer_ratio, half_step));
            }
            slots
        };

        match self.config.ring_layout {
            RingLayout::Single => single(slot_count, self.config.ring_radius_ratio, 0.0),
            RingLayout::Double {
                inner_ratio,
                outer_ratio,
                inner_share,
            } => {
                let inner = (slot_count as f32 * inner_share).round() as usize;
                double(inner, inner_ratio, outer_ratio)
            }
            RingLayout::Auto if slot_count >= AUTO_DOUBLE_RING_MIN_SLOTS => {
                double(slot_count / 2, AUTO_INNER_RATIO, AUTO_OUTER_RATIO)
            }
            RingLayout::Auto => single(slot_count, self.config.ring_radius_ratio, 0.0),
        }
    }

    fn place_one<R: Rng + ?Sized>(
        &self,
        index: usize,
        nominal_deg: f32,
        ring_ratio: f32,
        placed: &[Placement],
        rng: &mut R,
    ) -> Placement {
        let config = self.config;
        let diameter = self.card_radius_mm * 2.0;

        let mut angle = nominal_deg + symmetric(rng, config.angular_jitter_deg);
        let category = SizeCategory::ALL[self.categories.sample(rng)];
        let mut scale = uniform(rng, config.base_scale) * uniform(rng, config.multiplier(category));
        let rotation_deg = self.rotation(rng);

        let mut footprint = footprint_radius(diameter, config.symbol_box_fraction, scale);
        let max_radius = (self.card_radius_mm - footprint - SAFETY_MARGIN_MM).max(0.0);
        let mut radius = (self.card_radius_mm * ring_ratio
            + symmetric(rng, config.radial_jitter_mm))
        .clamp(0.0, max_radius);

        let mut candidate = Point::polar(radius, angle);
        let mut cleared = false;
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                angle += symmetric(rng, ATTEMPT_WOBBLE_DEG);
                radius = (radius - RADIUS_STEP_MM).clamp(0.0, max_radius);
            }
            candidate = Point::polar(radius, angle);
            if placed
                .iter()
                .all(|other| clears(candidate, footprint, other, config.overlap_margin_mm))
            {
                cleared = true;
                break;
            }
        }

        if !cleared {
            scale *= FALLBACK_SHRINK;
            footprint = footprint_radius(diameter, config.symbol_box_fraction, scale);
            log::debug!(
                "Slot {} still overlaps after {} attempts; shrinking to scale {:.3}",
                index,
                MAX_ATTEMPTS,
                scale
            );
        }

        Placement {
            x_mm: candidate.x,
            y_mm: candidate.y,
            rotation_deg,
            scale,
            footprint_mm: footprint,
            fallback: !cleared,
        }
    }

    fn rotation<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self.config.rotation {
            RotationMode::Fixed => 0.0,
            RotationMode::Free { min, max } => uniform(rng, Range::new(min, max)),
            // `new` rejected step ranges with no multiple inside them.
            RotationMode::Steps { step_deg, min, max } => match step_bounds(step_deg, min, max) {
                Some((lowest, highest)) => rng.random_range(lowest..=highest) as f32 * step_deg,
                None => 0.0,
            },
        }
    }
}

/// Computes the placements of one card.
pub fn compute_placements<R: Rng + ?Sized>(
    slot_count: usize,
    card_radius_mm: f32,
    rng: &mut R,
    config: &RandomizationConfig,
) -> Result<Vec<Placement>, LayoutError> {
    Ok(SymbolPlacer::new(config, card_radius_mm)?.place(slot_count, rng))
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, range: Range) -> f32 {
    if range.min >= range.max {
        range.min
    } else {
        rng.random_range(range.min..=range.max)
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    uniform(rng, Range::new(-amplitude, amplitude))
}
