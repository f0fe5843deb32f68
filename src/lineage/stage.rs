//! Lineage and stage identities, definitions and table specs.
//!
//! `LineageSpec`/`StageSpec` are the raw, deserializable table. The registry
//! turns them into `Lineage`/`Stage` definitions with dense numeric ids.

use serde::{Deserialize, Serialize};

/// Identity of one stage. Unique across every lineage in a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(pub u16);

impl StageId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage({})", self.0)
    }
}

/// Identity of a lineage (tile family).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineageId(pub u16);

impl LineageId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for LineageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lineage({})", self.0)
    }
}

/// One registered stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub id: StageId,
    /// Table key, e.g. `"ivysaur"`. Presentation layers use it for assets.
    pub key: String,
    /// Human-readable name.
    pub label: String,
    /// Display colour.
    pub color: String,
    pub lineage: LineageId,
    /// Position in the lineage, 0 = base.
    pub index: usize,
    /// True for the last stage of the lineage.
    pub is_final: bool,
}

/// One registered lineage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Lineage {
    pub id: LineageId,
    pub key: String,
    pub color: String,
    /// Stages from base to final.
    pub stages: Vec<StageId>,
}

impl Lineage {
    /// The stage new tiles of this lineage start as.
    #[must_use]
    pub fn base(&self) -> StageId {
        self.stages[0]
    }

    /// The stage that wins the game.
    #[must_use]
    pub fn final_stage(&self) -> StageId {
        self.stages[self.stages.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// A lineage as written in a configuration table.
///
/// ```
/// use evo_merge::lineage::LineageSpec;
///
/// let spec = LineageSpec::new("fire", "#F08030")
///     .stage("charmander", "Charmander")
///     .stage("charmeleon", "Charmeleon")
///     .stage("charizard", "Charizard");
/// assert_eq!(spec.stages.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageSpec {
    pub key: String,
    #[serde(default)]
    pub color: String,
    pub stages: Vec<StageSpec>,
}

impl LineageSpec {
    /// Start a lineage with no stages.
    #[must_use]
    pub fn new(key: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            color: color.into(),
            stages: Vec::new(),
        }
    }

    /// Append the next stage.
    #[must_use]
    pub fn stage(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.stages.push(StageSpec::new(key).with_label(label));
        self
    }

    /// Append a fully specified stage.
    #[must_use]
    pub fn with_stage(mut self, stage: StageSpec) -> Self {
        self.stages.push(stage);
        self
    }
}

/// A stage as written in a configuration table.
///
/// Missing labels fall back to the key, missing colours to the lineage's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSpec {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl StageSpec {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
