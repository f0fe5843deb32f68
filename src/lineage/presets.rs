//! The reference lineage table: six evolution lines of three stages each.

use super::registry::LineageRegistry;
use super::stage::LineageSpec;
use crate::error::ConfigError;

/// Specs for the six reference lineages, in table order.
#[must_use]
pub fn evolution_lines() -> Vec<LineageSpec> {
    vec![
        LineageSpec::new("grass", "#78C850")
            .stage("bulbasaur", "Bulbasaur")
            .stage("ivysaur", "Ivysaur")
            .stage("venusaur", "Venusaur"),
        LineageSpec::new("fire", "#F08030")
            .stage("charmander", "Charmander")
            .stage("charmeleon", "Charmeleon")
            .stage("charizard", "Charizard"),
        LineageSpec::new("water", "#6890F0")
            .stage("squirtle", "Squirtle")
            .stage("wartortle", "Wartortle")
            .stage("blastoise", "Blastoise"),
        LineageSpec::new("bug1", "#A8B820")
            .stage("caterpie", "Caterpie")
            .stage("metapod", "Metapod")
            .stage("butterfree", "Butterfree"),
        LineageSpec::new("bug2", "#A8B820")
            .stage("weedle", "Weedle")
            .stage("kakuna", "Kakuna")
            .stage("beedrill", "Beedrill"),
        LineageSpec::new("normal", "#A8A878")
            .stage("pidgey", "Pidgey")
            .stage("pidgeotto", "Pidgeotto")
            .stage("pidgeot", "Pidgeot"),
    ]
}

/// Registry built from `evolution_lines()`.
pub fn evolution_registry() -> Result<LineageRegistry, ConfigError> {
    LineageRegistry::from_specs(evolution_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_shape() {
        let registry = evolution_registry().unwrap();

        assert_eq!(registry.lineage_count(), 6);
        assert_eq!(registry.stage_count(), 18);
        assert!(registry.iter().all(|l| l.len() == 3));
    }

    #[test]
    fn test_shared_colour_does_not_merge_lineages() {
        let registry = evolution_registry().unwrap();

        let bug1 = registry.lineage_by_key("bug1").unwrap();
        let bug2 = registry.lineage_by_key("bug2").unwrap();
        assert_eq!(bug1.color, bug2.color);
        assert_ne!(bug1.id, bug2.id);
        assert_ne!(bug1.base(), bug2.base());
    }

    #[test]
    fn test_final_labels() {
        let registry = evolution_registry().unwrap();
        let fire = registry.lineage_by_key("fire").unwrap();
        let final_stage = registry.stage(fire.final_stage()).unwrap();
        assert_eq!(final_stage.label, "Charizard");
        assert!(final_stage.is_final);
    }
}
