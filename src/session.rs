//! Caller-side game session.
//!
//! The engine is stateless between moves; running totals live here and are
//! updated by folding each `MoveOutcome` in.

use serde::{Deserialize, Serialize};

use crate::grid::MoveOutcome;
use crate::lineage::LineageId;

/// Where a session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Playing,
    /// A tile of this lineage reached its final stage.
    Won(LineageId),
    /// No legal move remains.
    Lost,
}

/// Running score, move count and win/loss flags.
///
/// ```
/// use evo_merge::core::{Direction, EngineConfig, GameRng};
/// use evo_merge::grid::GridEngine;
/// use evo_merge::lineage::presets::evolution_registry;
/// use evo_merge::session::{GameSession, SessionStatus};
///
/// let engine = GridEngine::new(evolution_registry().unwrap(), EngineConfig::default()).unwrap();
/// let mut rng = GameRng::new(1);
/// let mut grid = engine.initialize(&mut rng);
/// let mut session = GameSession::new();
///
/// for direction in [Direction::Left, Direction::Up, Direction::Right] {
///     let outcome = engine.apply_move(&grid, direction, &mut rng);
///     session.record(&outcome);
///     grid = outcome.grid;
/// }
/// assert!(session.moves() <= 3);
/// assert_ne!(session.status(), SessionStatus::Lost);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    score: u64,
    moves: u32,
    won: Option<LineageId>,
    lost: bool,
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one move into the totals.
    ///
    /// Moves that changed nothing count neither towards score nor the move
    /// counter, but may still report a terminal grid.
    pub fn record(&mut self, outcome: &MoveOutcome) {
        if outcome.changed {
            self.score += u64::from(outcome.score_delta);
            self.moves += 1;
        }
        if let Some(win) = outcome.win {
            self.won = Some(win.lineage);
        }
        self.lost = outcome.terminal;
    }

    /// Start over, e.g. on a replay request.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Lineage of the most recent win, if any.
    #[must_use]
    pub fn winning_lineage(&self) -> Option<LineageId> {
        self.won
    }

    /// A win takes precedence over a full board.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match (self.won, self.lost) {
            (Some(lineage), _) => SessionStatus::Won(lineage),
            (None, true) => SessionStatus::Lost,
            (None, false) => SessionStatus::Playing,
        }
    }

    /// True once the session is won or lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status() != SessionStatus::Playing
    }
}
