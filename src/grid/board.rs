//! Grid snapshots.
//!
//! A `Grid` is a square, row-major matrix of optional stage ids. Callers
//! only ever hold owned snapshots: the engine clones before it mutates and
//! hands back a fresh value, so snapshots can be cached and compared freely.

use serde::Serialize;
use smallvec::SmallVec;

use crate::core::{Direction, Position};
use crate::lineage::StageId;

/// Positions of empty cells. Inline for grids up to 4x4.
pub type EmptyCells = SmallVec<[Position; 16]>;

/// Immutable snapshot of the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    dimension: usize,
    cells: Vec<Option<StageId>>,
}

impl Grid {
    /// An all-empty grid.
    #[must_use]
    pub fn empty(dimension: usize) -> Self {
        Self {
            dimension,
            cells: vec![None; dimension * dimension],
        }
    }

    /// Build from row-major cells already checked by the caller.
    pub(crate) fn from_cells(dimension: usize, cells: Vec<Option<StageId>>) -> Self {
        debug_assert_eq!(cells.len(), dimension * dimension);
        Self { dimension, cells }
    }

    /// Side length.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Contents of a cell. Out-of-range positions read as empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<StageId> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    pub(crate) fn set(&mut self, pos: Position, value: Option<StageId>) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = value;
        }
    }

    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        (pos.row < self.dimension && pos.col < self.dimension)
            .then(|| pos.row * self.dimension + pos.col)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<StageId>]> {
        // chunks(0) panics; an empty grid has no rows anyway
        self.cells.chunks(self.dimension.max(1))
    }

    /// Every occupied cell in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, StageId)> + '_ {
        let n = self.dimension;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|stage| (Position::new(i / n, i % n), stage)))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> EmptyCells {
        let n = self.dimension;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Position::new(i / n, i % n))
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Whether two horizontally or vertically adjacent cells hold the same
    /// stage.
    #[must_use]
    pub fn has_adjacent_pair(&self) -> bool {
        self.tiles().any(|(pos, stage)| {
            [Direction::Right, Direction::Down]
                .into_iter()
                .filter_map(|d| pos.step(d, self.dimension))
                .any(|next| self.get(next) == Some(stage))
        })
    }

    /// Full and without any adjacent equal pair: no move can change it.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(stage) => format!("{:>3}", stage.raw()),
                    None => "  .".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
