//! Engine configuration.
//!
//! Grid size and the number of opening tiles are fixed per engine. The
//! defaults reproduce the classic 4x4 board with two opening tiles.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default grid dimension.
pub const DEFAULT_DIMENSION: usize = 4;

/// Default number of tiles placed by `initialize`.
pub const DEFAULT_STARTING_TILES: usize = 2;

/// Fixed parameters of a `GridEngine`.
///
/// ```
/// use evo_merge::core::EngineConfig;
///
/// let config = EngineConfig::new().with_dimension(5).with_starting_tiles(3);
/// assert_eq!(config.cell_count(), 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square grid.
    pub dimension: usize,

    /// Base-stage tiles spawned into a fresh grid.
    pub starting_tiles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            starting_tiles: DEFAULT_STARTING_TILES,
        }
    }
}

impl EngineConfig {
    /// The default 4x4 configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid dimension.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the number of opening tiles.
    #[must_use]
    pub fn with_starting_tiles(mut self, tiles: usize) -> Self {
        self.starting_tiles = tiles;
        self
    }

    /// Number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.dimension * self.dimension
    }

    /// Reject configurations no grid can satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension < 2 {
            return Err(ConfigError::InvalidDimension(self.dimension));
        }
        if self.starting_tiles > self.cell_count() {
            return Err(ConfigError::TooManyStartingTiles {
                tiles: self.starting_tiles,
                dimension: self.dimension,
            });
        }
        Ok(())
    }
}
