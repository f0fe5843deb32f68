//! The grid transition engine.
//!
//! `apply_move` runs in three phases:
//!
//! 1. **Slide**: tiles are visited nearest-the-target-edge first. Each one
//!    walks a cell at a time until it hits the edge, a different tile, or a
//!    tile that already merged this move, or until it merges with an equal
//!    tile.
//! 2. **Spawn**: only if something moved, one base-stage tile of a random
//!    lineage lands on a random empty cell. The RNG is not touched otherwise.
//! 3. **Terminal check** on the resulting grid.
//!
//! The engine holds no game state. Grids go in by reference and come back as
//! new owned snapshots.

use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::board::Grid;
use super::outcome::{Merge, MoveOutcome, Slide, SlideResult, Spawn, WinEvent};
use crate::core::{Direction, EngineConfig, Position};
use crate::error::{ConfigError, GridError};
use crate::lineage::{LineageRegistry, StageId};

/// Points for merging two tiles at `index`: `(index + 2) * 10`.
#[must_use]
pub fn merge_points(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(2).saturating_mul(10))
}

/// Order in which tiles are visited for a move: line by line, and within a
/// line from the cell next to the target edge outward. Cells on the target
/// edge itself cannot move and are skipped.
pub fn scan_order(dimension: usize, direction: Direction) -> impl Iterator<Item = Position> {
    (0..dimension).flat_map(move |line| {
        (1..dimension).map(move |step| match direction {
            Direction::Left => Position::new(line, step),
            Direction::Right => Position::new(line, dimension - 1 - step),
            Direction::Up => Position::new(step, line),
            Direction::Down => Position::new(dimension - 1 - step, line),
        })
    })
}

/// Applies moves to grids using a fixed lineage table.
///
/// ## Example
///
/// ```
/// use evo_merge::core::{Direction, EngineConfig, GameRng};
/// use evo_merge::grid::GridEngine;
/// use evo_merge::lineage::presets::evolution_registry;
///
/// let engine = GridEngine::new(evolution_registry().unwrap(), EngineConfig::default()).unwrap();
/// let mut rng = GameRng::new(42);
///
/// let grid = engine.initialize(&mut rng);
/// assert_eq!(grid.tile_count(), 2);
///
/// let outcome = engine.apply_move(&grid, Direction::Left, &mut rng);
/// if outcome.changed {
///     assert!(outcome.spawned.is_some());
/// } else {
///     assert_eq!(outcome.grid, grid);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GridEngine {
    registry: LineageRegistry,
    config: EngineConfig,
}

impl GridEngine {
    /// Create an engine. Fails if the configuration cannot describe a grid.
    pub fn new(registry: LineageRegistry, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    #[must_use]
    pub fn registry(&self) -> &LineageRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A fresh grid of the configured dimension with the opening tiles.
    pub fn initialize<R: Rng>(&self, rng: &mut R) -> Grid {
        self.populate(Grid::empty(self.config.dimension), rng)
    }

    /// A fresh `dimension` x `dimension` grid with the opening tiles placed
    /// on distinct cells.
    ///
    /// The size goes through the same checks as `EngineConfig::dimension`,
    /// so it must be at least 2 and hold every starting tile.
    pub fn initialize_with_dimension<R: Rng>(
        &self,
        dimension: usize,
        rng: &mut R,
    ) -> Result<Grid, ConfigError> {
        self.config.clone().with_dimension(dimension).validate()?;
        Ok(self.populate(Grid::empty(dimension), rng))
    }

    fn populate<R: Rng>(&self, mut grid: Grid, rng: &mut R) -> Grid {
        for _ in 0..self.config.starting_tiles {
            self.spawn(&mut grid, rng);
        }
        debug!(dimension = grid.dimension(), tiles = grid.tile_count(), "initialized grid");
        grid
    }

    /// Build a snapshot from caller-supplied rows. The grid must have the
    /// configured dimension.
    pub fn grid_from_rows(&self, rows: &[Vec<Option<StageId>>]) -> Result<Grid, GridError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(GridError::Empty);
        }
        if dimension != self.config.dimension {
            return Err(GridError::DimensionMismatch {
                expected: self.config.dimension,
                found: dimension,
            });
        }

        let mut cells = Vec::with_capacity(dimension * dimension);
        for (row, cols) in rows.iter().enumerate() {
            if cols.len() != dimension {
                return Err(GridError::NotSquare { row, len: cols.len(), dimension });
            }
            for &cell in cols {
                if let Some(stage) = cell {
                    if !self.registry.contains(stage) {
                        return Err(GridError::UnknownStage(stage));
                    }
                }
                cells.push(cell);
            }
        }
        Ok(Grid::from_cells(dimension, cells))
    }

    /// Build a snapshot from stage keys. `""` and `"."` mark empty cells.
    pub fn grid_from_keys(&self, rows: &[&[&str]]) -> Result<Grid, GridError> {
        let rows = rows
            .iter()
            .map(|cols| {
                cols.iter()
                    .map(|&key| match key {
                        "" | "." => Ok(None),
                        key => self
                            .registry
                            .stage_by_key(key)
                            .map(|s| Some(s.id))
                            .ok_or_else(|| GridError::UnknownKey(key.to_string())),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.grid_from_rows(&rows)
    }

    /// Slide and merge without spawning.
    #[must_use]
    pub fn slide(&self, grid: &Grid, direction: Direction) -> SlideResult {
        let dimension = grid.dimension();
        let mut result = SlideResult {
            grid: grid.clone(),
            score_delta: 0,
            changed: false,
            win: None,
            slides: SmallVec::new(),
            merges: SmallVec::new(),
        };
        let mut merged: SmallVec<[bool; 16]> = SmallVec::from_elem(false, dimension * dimension);

        for origin in scan_order(dimension, direction) {
            self.slide_tile(&mut result, &mut merged, origin, direction);
        }

        result.changed = !result.slides.is_empty() || !result.merges.is_empty();
        result
    }

    fn slide_tile(
        &self,
        result: &mut SlideResult,
        merged: &mut [bool],
        origin: Position,
        direction: Direction,
    ) {
        let Some(stage) = result.grid.get(origin) else {
            return;
        };
        let dimension = result.grid.dimension();

        let mut resting = origin;
        while let Some(next) = resting.step(direction, dimension) {
            let Some(other) = result.grid.get(next) else {
                resting = next;
                continue;
            };
            let Some(slot) = result.grid.index(next) else { break };
            if other != stage || merged[slot] {
                break;
            }

            // Two final-stage tiles have nowhere to evolve: they combine
            // into one final tile for no points.
            let produced = self.registry.next_stage(stage).unwrap_or(stage);
            let points = if produced == stage {
                0
            } else {
                self.registry.locate(stage).map_or(0, |(_, index)| merge_points(index))
            };

            result.grid.set(next, Some(produced));
            result.grid.set(origin, None);
            merged[slot] = true;
            result.score_delta = result.score_delta.saturating_add(points);
            result.merges.push(Merge {
                from: origin,
                at: next,
                consumed: stage,
                produced,
                points,
            });

            if produced != stage && self.registry.is_final(produced) {
                if let Some((lineage, _)) = self.registry.locate(produced) {
                    result.win = Some(WinEvent { lineage, stage: produced, at: next });
                }
            }
            return;
        }

        if resting != origin {
            result.grid.set(resting, Some(stage));
            result.grid.set(origin, None);
            result.slides.push(Slide { from: origin, to: resting, stage });
        }
    }

    /// Place one base-stage tile of a uniformly chosen lineage on a
    /// uniformly chosen empty cell. Returns `None` on a full grid.
    fn spawn<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> Option<Spawn> {
        let empty = grid.empty_positions();
        if empty.is_empty() {
            return None;
        }
        let at = empty[rng.gen_range(0..empty.len())];

        let lineages = self.registry.lineages();
        let stage = lineages[rng.gen_range(0..lineages.len())].base();

        grid.set(at, Some(stage));
        trace!(%at, %stage, "spawned tile");
        Some(Spawn { at, stage })
    }

    /// Apply one move.
    ///
    /// A move that changes nothing returns the input grid, scores nothing,
    /// reports the input's terminal status and leaves `rng` untouched.
    pub fn apply_move<R: Rng>(
        &self,
        grid: &Grid,
        direction: Direction,
        rng: &mut R,
    ) -> MoveOutcome {
        let mut slid = self.slide(grid, direction);
        if !slid.changed {
            debug!(%direction, "move changed nothing");
            return MoveOutcome::unchanged(direction, grid.clone());
        }

        let spawned = self.spawn(&mut slid.grid, rng);
        let outcome = MoveOutcome::from_slide(direction, slid, spawned);

        debug!(
            %direction,
            score_delta = outcome.score_delta,
            slides = outcome.slides.len(),
            merges = outcome.merges.len(),
            "applied move"
        );
        if let Some(win) = &outcome.win {
            info!(
                lineage = %win.lineage,
                stage = %win.stage,
                at = %win.at,
                "final stage reached"
            );
        }
        if outcome.terminal {
            debug!("grid is terminal");
        }
        outcome
    }

    /// Whether `direction` would change `grid`.
    #[must_use]
    pub fn can_move(&self, grid: &Grid, direction: Direction) -> bool {
        self.slide(grid, direction).changed
    }

    /// Directions that would change `grid`. Empty exactly when the grid is
    /// terminal.
    #[must_use]
    pub fn legal_moves(&self, grid: &Grid) -> SmallVec<[Direction; 4]> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(grid, d))
            .collect()
    }
}
