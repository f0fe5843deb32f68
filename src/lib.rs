//! # evo-merge
//!
//! A tile-merge puzzle engine where tiles belong to lineages: two equal
//! tiles that collide evolve into the next stage of their lineage, and the
//! game is won when any tile reaches its lineage's final stage.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `GridEngine::apply_move` maps a grid snapshot and
//!    a direction to a `MoveOutcome`. The engine keeps no state between
//!    calls.
//!
//! 2. **Injected randomness**: every spawn draws from a caller-supplied RNG.
//!    A seed plus a list of directions replays a game exactly.
//!
//! 3. **Configuration Over Convention**: lineages, stage counts and grid size
//!    come from a table validated once at startup.
//!
//! ## Modules
//!
//! - `core`: directions, positions, configuration, RNG
//! - `lineage`: lineage/stage definitions and the registry
//! - `grid`: grid snapshots, the move engine and move outcomes
//! - `session`: caller-owned running totals
//! - `error`: configuration and input errors

pub mod core;
pub mod error;
pub mod grid;
pub mod lineage;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Direction, EngineConfig, GameRng, GameRngState, Position};

pub use crate::error::{ConfigError, DirectionError, GridError};

pub use crate::grid::{Grid, GridEngine, Merge, MoveOutcome, Slide, SlideResult, Spawn, WinEvent};

pub use crate::lineage::{
    Lineage, LineageId, LineageRegistry, LineageRegistryBuilder, LineageSpec, Stage, StageId,
    StageSpec,
};

pub use crate::session::{GameSession, SessionStatus};
