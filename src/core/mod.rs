//! Core support types: directions, positions, configuration, RNG.
//!
//! Nothing here knows about lineages or merging. The grid engine builds on
//! these pieces.

pub mod config;
pub mod direction;
pub mod rng;

pub use config::{EngineConfig, DEFAULT_DIMENSION, DEFAULT_STARTING_TILES};
pub use direction::{Direction, Position};
pub use rng::{GameRng, GameRngState};
