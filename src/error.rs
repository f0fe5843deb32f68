//! Error types.
//!
//! Configuration problems are caught when the registry or engine is built.
//! Once an engine exists, moves cannot fail: the only caller-visible
//! rejections are malformed directions and malformed hand-built grids.

use thiserror::Error;

use crate::lineage::StageId;

/// Malformed lineage table or engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The table defines no lineages at all.
    #[error("lineage table is empty")]
    NoLineages,

    /// A lineage was declared without stages.
    #[error("lineage '{0}' has no stages")]
    EmptyLineage(String),

    /// A lineage needs a base and a distinct final stage.
    #[error("lineage '{lineage}' has {count} stage(s), at least 2 are required")]
    TooFewStages { lineage: String, count: usize },

    /// Two lineages share a key.
    #[error("lineage '{0}' is declared more than once")]
    DuplicateLineage(String),

    /// A stage key appears twice, in the same or in different lineages.
    #[error("stage '{0}' is declared more than once")]
    DuplicateStage(String),

    /// More lineages or stages than ids can address.
    #[error("lineage table exceeds {max} entries")]
    TableTooLarge { max: usize },

    /// Grid dimension outside the supported range.
    #[error("grid dimension {0} is not supported (minimum 2)")]
    InvalidDimension(usize),

    /// More starting tiles than cells.
    #[error("{tiles} starting tiles do not fit in a {dimension}x{dimension} grid")]
    TooManyStartingTiles { tiles: usize, dimension: usize },
}

/// Direction value outside the four supported moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionError {
    #[error("direction code {0} is not one of 0..=3")]
    InvalidCode(u8),

    #[error("'{0}' is not a direction (expected up, down, left or right)")]
    InvalidName(String),
}

/// Caller-supplied grid contents that the engine cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Row `row` has `len` cells in a grid with `dimension` rows.
    #[error("row {row} has {len} cells, expected {dimension}")]
    NotSquare { row: usize, len: usize, dimension: usize },

    /// No rows at all.
    #[error("grid has no rows")]
    Empty,

    /// Square, but not the size the engine was configured for.
    #[error("grid is {found}x{found}, engine expects {expected}x{expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("{0} is not registered")]
    UnknownStage(StageId),

    #[error("no stage has key '{0}'")]
    UnknownKey(String),
}
