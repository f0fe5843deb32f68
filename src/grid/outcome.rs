//! What a move did.

use serde::Serialize;
use smallvec::SmallVec;

use super::board::Grid;
use crate::core::{Direction, Position};
use crate::lineage::{LineageId, StageId};

/// A tile that moved without merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub from: Position,
    pub to: Position,
    pub stage: StageId,
}

/// Two equal tiles that combined.
///
/// `produced == consumed` only when two final-stage tiles collide: they
/// combine into one final tile worth no points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Merge {
    /// Where the moving tile started.
    pub from: Position,
    /// Where the combined tile sits.
    pub at: Position,
    pub consumed: StageId,
    pub produced: StageId,
    pub points: u32,
}

impl Merge {
    /// True when the merge advanced to a later stage.
    #[must_use]
    pub fn is_evolution(&self) -> bool {
        self.produced != self.consumed
    }
}

/// A tile that reached the final stage of its lineage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WinEvent {
    pub lineage: LineageId,
    pub stage: StageId,
    pub at: Position,
}

/// The tile placed after a changing move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Spawn {
    pub at: Position,
    pub stage: StageId,
}

/// Deterministic part of a move: slides and merges, before spawning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlideResult {
    pub grid: Grid,
    pub score_delta: u32,
    pub changed: bool,
    /// Last final-stage arrival in scan order.
    pub win: Option<WinEvent>,
    pub slides: SmallVec<[Slide; 16]>,
    pub merges: SmallVec<[Merge; 8]>,
}

/// Complete report of one `apply_move` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// Grid after sliding, merging and spawning. Equal to the input when
    /// `changed` is false.
    pub grid: Grid,
    pub score_delta: u32,
    /// Whether any tile moved or merged.
    pub changed: bool,
    /// Set when a merge reached a lineage's final stage. If several did,
    /// the last one in scan order.
    pub win: Option<WinEvent>,
    /// No legal move remains on `grid`.
    pub terminal: bool,
    pub slides: SmallVec<[Slide; 16]>,
    pub merges: SmallVec<[Merge; 8]>,
    pub spawned: Option<Spawn>,
}

impl MoveOutcome {
    pub(crate) fn unchanged(direction: Direction, grid: Grid) -> Self {
        let terminal = grid.is_terminal();
        Self {
            direction,
            grid,
            score_delta: 0,
            changed: false,
            win: None,
            terminal,
            slides: SmallVec::new(),
            merges: SmallVec::new(),
            spawned: None,
        }
    }

    pub(crate) fn from_slide(
        direction: Direction,
        slid: SlideResult,
        spawned: Option<Spawn>,
    ) -> Self {
        let terminal = slid.grid.is_terminal();
        Self {
            direction,
            grid: slid.grid,
            score_delta: slid.score_delta,
            changed: slid.changed,
            win: slid.win,
            terminal,
            slides: slid.slides,
            merges: slid.merges,
            spawned,
        }
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.win.is_some()
    }

    /// Number of tile pairs that combined this move.
    #[must_use]
    pub fn merge_count(&self) -> usize {
        self.merges.len()
    }
}
