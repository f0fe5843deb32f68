//! Lineage registry for stage lookup.
//!
//! Built once from a table of `LineageSpec`s and read-only afterwards.
//! Stage ids are assigned densely in table order, so `StageId(n)` indexes
//! straight into the stage vector; the hash maps serve key lookups.

use rustc_hash::FxHashMap;

use super::stage::{Lineage, LineageId, LineageSpec, Stage, StageId};
use crate::error::ConfigError;

/// Registry of every lineage and stage the engine can place on a grid.
///
/// ## Example
///
/// ```
/// use evo_merge::lineage::{LineageRegistry, LineageSpec};
///
/// let registry = LineageRegistry::builder()
///     .lineage(LineageSpec::new("grass", "#78C850")
///         .stage("bulbasaur", "Bulbasaur")
///         .stage("ivysaur", "Ivysaur")
///         .stage("venusaur", "Venusaur"))
///     .build()
///     .unwrap();
///
/// let ivysaur = registry.stage_by_key("ivysaur").unwrap();
/// let (lineage, index) = registry.locate(ivysaur.id).unwrap();
/// assert_eq!(registry.lineage(lineage).unwrap().key, "grass");
/// assert_eq!(index, 1);
/// ```
#[derive(Clone, Debug)]
pub struct LineageRegistry {
    lineages: Vec<Lineage>,
    stages: Vec<Stage>,
    lineage_keys: FxHashMap<String, LineageId>,
    stage_keys: FxHashMap<String, StageId>,
}

impl LineageRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> LineageRegistryBuilder {
        LineageRegistryBuilder::default()
    }

    /// Build a registry from a complete table.
    pub fn from_specs<I>(specs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = LineageSpec>,
    {
        let mut builder = Self::builder();
        for spec in specs {
            builder = builder.lineage(spec);
        }
        builder.build()
    }

    /// Stage definition by id.
    #[must_use]
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.get(usize::from(id.raw()))
    }

    /// Lineage definition by id.
    #[must_use]
    pub fn lineage(&self, id: LineageId) -> Option<&Lineage> {
        self.lineages.get(usize::from(id.raw()))
    }

    /// Lineage and index of a stage.
    #[must_use]
    pub fn locate(&self, id: StageId) -> Option<(LineageId, usize)> {
        self.stage(id).map(|s| (s.lineage, s.index))
    }

    /// Ordered stages of a lineage.
    #[must_use]
    pub fn stages_of(&self, id: LineageId) -> Option<&[StageId]> {
        self.lineage(id).map(|l| l.stages.as_slice())
    }

    /// Base stage of a lineage.
    #[must_use]
    pub fn base_stage(&self, id: LineageId) -> Option<StageId> {
        self.lineage(id).map(Lineage::base)
    }

    /// The stage two copies of `id` evolve into. `None` for final stages
    /// and unknown ids.
    #[must_use]
    pub fn next_stage(&self, id: StageId) -> Option<StageId> {
        let stage = self.stage(id)?;
        if stage.is_final {
            return None;
        }
        self.stages_of(stage.lineage)
            .and_then(|stages| stages.get(stage.index + 1))
            .copied()
    }

    /// Whether `id` is the final stage of its lineage.
    #[must_use]
    pub fn is_final(&self, id: StageId) -> bool {
        self.stage(id).is_some_and(|s| s.is_final)
    }

    #[must_use]
    pub fn stage_by_key(&self, key: &str) -> Option<&Stage> {
        self.stage_keys.get(key).and_then(|&id| self.stage(id))
    }

    #[must_use]
    pub fn lineage_by_key(&self, key: &str) -> Option<&Lineage> {
        self.lineage_keys.get(key).and_then(|&id| self.lineage(id))
    }

    #[must_use]
    pub fn contains(&self, id: StageId) -> bool {
        self.stage(id).is_some()
    }

    /// Number of lineages.
    #[must_use]
    pub fn lineage_count(&self) -> usize {
        self.lineages.len()
    }

    /// Number of stages across all lineages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Lineages in table order. Never empty.
    #[must_use]
    pub fn lineages(&self) -> &[Lineage] {
        &self.lineages
    }

    /// Iterate over lineages in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Lineage> {
        self.lineages.iter()
    }

    /// Iterate over every stage.
    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }
}

/// Collects lineage specs and validates them into a `LineageRegistry`.
#[derive(Clone, Debug, Default)]
pub struct LineageRegistryBuilder {
    specs: Vec<LineageSpec>,
}

impl LineageRegistryBuilder {
    /// Add a lineage.
    #[must_use]
    pub fn lineage(mut self, spec: LineageSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Validate the table and assign ids.
    pub fn build(self) -> Result<LineageRegistry, ConfigError> {
        if self.specs.is_empty() {
            return Err(ConfigError::NoLineages);
        }

        let mut lineages = Vec::with_capacity(self.specs.len());
        let mut stages = Vec::new();
        let mut lineage_keys = FxHashMap::default();
        let mut stage_keys = FxHashMap::default();

        for spec in self.specs {
            match spec.stages.len() {
                0 => return Err(ConfigError::EmptyLineage(spec.key)),
                1 => {
                    return Err(ConfigError::TooFewStages {
                        lineage: spec.key,
                        count: 1,
                    })
                }
                _ => {}
            }

            let lineage_id = LineageId::new(dense_id(lineages.len())?);
            if lineage_keys.insert(spec.key.clone(), lineage_id).is_some() {
                return Err(ConfigError::DuplicateLineage(spec.key));
            }

            let last = spec.stages.len() - 1;
            let mut ids = Vec::with_capacity(spec.stages.len());
            for (index, stage) in spec.stages.into_iter().enumerate() {
                let stage_id = StageId::new(dense_id(stages.len())?);
                if stage_keys.insert(stage.key.clone(), stage_id).is_some() {
                    return Err(ConfigError::DuplicateStage(stage.key));
                }
                ids.push(stage_id);
                stages.push(Stage {
                    id: stage_id,
                    label: stage.label.unwrap_or_else(|| stage.key.clone()),
                    color: stage.color.unwrap_or_else(|| spec.color.clone()),
                    key: stage.key,
                    lineage: lineage_id,
                    index,
                    is_final: index == last,
                });
            }

            lineages.push(Lineage {
                id: lineage_id,
                key: spec.key,
                color: spec.color,
                stages: ids,
            });
        }

        Ok(LineageRegistry {
            lineages,
            stages,
            lineage_keys,
            stage_keys,
        })
    }
}

fn dense_id(n: usize) -> Result<u16, ConfigError> {
    u16::try_from(n).map_err(|_| ConfigError::TableTooLarge { max: usize::from(u16::MAX) + 1 })
}
