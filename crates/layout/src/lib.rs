use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Cards per page must be between 1 and {max}, got {0}.", max = grid::MAX_PER_PAGE)]
    InvalidPerPage(u32),
    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),
    #[error("Invalid randomization config: {0}")]
    InvalidConfig(String),
}

pub mod cache;
pub mod config;
pub mod grid;
pub mod page;
pub mod placement;

pub use self::cache::GridCache;
pub use self::config::{
    Range, RandomizationConfig, RingLayout, RotationMode, SizeCategory, SizeWeights,
};
pub use self::grid::{MAX_PER_PAGE, PageSlot, compute_slots};
pub use self::page::{CardSpec, Orientation, PageSize, PageSpec};
pub use self::placement::{
    MAX_ATTEMPTS, Placement, SymbolPlacer, compute_placements, footprint_radius,
};
