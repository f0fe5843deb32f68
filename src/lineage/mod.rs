//! Lineage system: tile families, their stages, and the registry.
//!
//! ## Key Types
//!
//! - `StageId`: identity of a tile, unique across all lineages
//! - `LineageId`: identity of a tile family
//! - `LineageSpec` / `StageSpec`: the raw configuration table
//! - `LineageRegistry`: validated, read-only lookup built from the table
//!
//! Two tiles merge only when their `StageId`s are equal, so lineages that
//! share a colour or look alike never cross-merge.

pub mod presets;
pub mod registry;
pub mod stage;

pub use registry::{LineageRegistry, LineageRegistryBuilder};
pub use stage::{Lineage, LineageId, LineageSpec, Stage, StageId, StageSpec};
