//! End-to-end move scenarios against the reference lineage table and a
//! custom one.

use rand::rngs::mock::StepRng;

use evo_merge::core::{Direction, EngineConfig, GameRng, Position};
use evo_merge::error::{ConfigError, GridError};
use evo_merge::grid::{Grid, GridEngine};
use evo_merge::lineage::presets::evolution_registry;
use evo_merge::lineage::{LineageRegistry, LineageSpec, StageId};

fn engine() -> GridEngine {
    GridEngine::new(evolution_registry().unwrap(), EngineConfig::default()).unwrap()
}

fn id(engine: &GridEngine, key: &str) -> StageId {
    engine.registry().stage_by_key(key).unwrap().id
}

/// An RNG whose every draw is zero: spawns go to the first empty cell and
/// pick the first lineage.
fn zero_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// A full board with no equal neighbours, built from 16 distinct stages.
fn locked_rows() -> [[&'static str; 4]; 4] {
    [
        ["bulbasaur", "ivysaur", "venusaur", "charmander"],
        ["charmeleon", "charizard", "squirtle", "wartortle"],
        ["blastoise", "caterpie", "metapod", "butterfree"],
        ["weedle", "kakuna", "beedrill", "pidgey"],
    ]
}

fn grid_of(engine: &GridEngine, rows: &[[&str; 4]; 4]) -> Grid {
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    engine.grid_from_keys(&rows).unwrap()
}

/// Two second-stage tiles evolve into the final stage and win.
#[test]
fn test_win_trigger_row() {
    let engine = engine();
    let grid = engine
        .grid_from_keys(&[
            &["charmeleon", "charmeleon", ".", "."],
            &[".", ".", ".", "."],
            &[".", ".", ".", "."],
            &[".", ".", ".", "."],
        ])
        .unwrap();

    let outcome = engine.apply_move(&grid, Direction::Left, &mut zero_rng());

    assert!(outcome.changed);
    assert!(outcome.is_win());
    assert_eq!(outcome.score_delta, (1 + 2) * 10);

    let fire = engine.registry().lineage_by_key("fire").unwrap().id;
    assert_eq!(outcome.win.unwrap().lineage, fire);

    let row: Vec<_> = outcome.grid.rows().next().unwrap().to_vec();
    assert_eq!(
        row,
        vec![Some(id(&engine, "charizard")), Some(id(&engine, "bulbasaur")), None, None]
    );
    assert!(!outcome.terminal);
}

/// A full board with one adjacent pair is not terminal; breaking the pair
/// makes it terminal.
#[test]
fn test_terminal_correctness() {
    let engine = engine();

    let mut rows = locked_rows();
    rows[3][3] = "beedrill";
    let paired = grid_of(&engine, &rows);
    assert!(paired.is_full());
    assert!(!paired.is_terminal());
    assert!(!engine.legal_moves(&paired).is_empty());

    let locked = grid_of(&engine, &locked_rows());
    assert!(locked.is_terminal());
    assert!(engine.legal_moves(&locked).is_empty());
}

/// A move on a terminal board is a no-op that still reports the loss.
#[test]
fn test_no_op_on_terminal_grid_reports_terminal() {
    let engine = engine();
    let locked = grid_of(&engine, &locked_rows());

    for direction in Direction::ALL {
        let outcome = engine.apply_move(&locked, direction, &mut GameRng::new(0));
        assert!(!outcome.changed);
        assert!(outcome.terminal);
        assert_eq!(outcome.grid, locked);
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.win.is_none());
    }
}

/// The move that fills the last cell can end the game.
#[test]
fn test_changing_move_can_become_terminal() {
    let engine = engine();
    // Sliding left opens (0,3) for the spawn; the zero RNG picks bulbasaur,
    // which matches none of its neighbours.
    let grid = engine
        .grid_from_keys(&[
            &[".", "ivysaur", "venusaur", "charmander"],
            &["charmeleon", "charizard", "squirtle", "wartortle"],
            &["blastoise", "caterpie", "metapod", "butterfree"],
            &["weedle", "kakuna", "beedrill", "pidgey"],
        ])
        .unwrap();

    // Nothing can slide right in row 0: the gap is on the left edge.
    assert!(!engine.can_move(&grid, Direction::Right));

    let outcome = engine.apply_move(&grid, Direction::Left, &mut zero_rng());
    assert!(outcome.changed);
    assert_eq!(outcome.slides.len(), 3);
    let spawn = outcome.spawned.unwrap();
    assert_eq!(spawn.at, Position::new(0, 3));
    assert_eq!(spawn.stage, id(&engine, "bulbasaur"));
    assert!(outcome.grid.is_full());
    assert!(outcome.terminal);
}

/// Same seed and same directions give the same game.
#[test]
fn test_replay_is_deterministic() {
    let engine = engine();
    let script = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Left,
        Direction::Up,
        Direction::Right,
    ];

    let play = |seed: u64| {
        let mut rng = GameRng::new(seed);
        let mut grid = engine.initialize(&mut rng);
        let mut history = vec![grid.clone()];
        for _ in 0..5 {
            for direction in script {
                let outcome = engine.apply_move(&grid, direction, &mut rng);
                grid = outcome.grid;
                history.push(grid.clone());
            }
        }
        history
    };

    assert_eq!(play(2024), play(2024));
    assert_ne!(play(2024), play(2025));
}

/// Snapshots handed out earlier are never touched by later moves.
#[test]
fn test_snapshots_are_independent() {
    let engine = engine();
    let mut rng = GameRng::new(8);
    let start = engine.initialize(&mut rng);
    let kept = start.clone();

    let mut grid = start.clone();
    for direction in Direction::ALL {
        grid = engine.apply_move(&grid, direction, &mut rng).grid;
    }

    assert_eq!(start, kept);
}

/// Lineages longer than three stages and larger grids work the same way.
#[test]
fn test_custom_table_and_dimension() {
    let registry = LineageRegistry::builder()
        .lineage(
            LineageSpec::new("egg", "#FFF")
                .stage("egg", "Egg")
                .stage("chick", "Chick")
                .stage("hen", "Hen")
                .stage("phoenix", "Phoenix"),
        )
        .lineage(LineageSpec::new("seed", "#0F0").stage("seed", "Seed").stage("tree", "Tree"))
        .build()
        .unwrap();
    let config = EngineConfig::new().with_dimension(5).with_starting_tiles(3);
    let engine = GridEngine::new(registry, config).unwrap();

    let mut rng = GameRng::new(3);
    let fresh = engine.initialize(&mut rng);
    assert_eq!(fresh.dimension(), 5);
    assert_eq!(fresh.tile_count(), 3);

    let grid = engine
        .grid_from_keys(&[
            &[".", ".", ".", ".", "hen"],
            &[".", ".", ".", ".", "hen"],
            &[".", ".", ".", ".", "chick"],
            &[".", ".", ".", ".", "chick"],
            &[".", ".", ".", ".", "."],
        ])
        .unwrap();

    let slid = engine.slide(&grid, Direction::Up);
    assert_eq!(slid.grid.get(Position::new(0, 4)), Some(id(&engine, "phoenix")));
    assert_eq!(slid.grid.get(Position::new(1, 4)), Some(id(&engine, "hen")));
    // hen merge: (2 + 2) * 10, chick merge: (1 + 2) * 10
    assert_eq!(slid.score_delta, 40 + 30);
    assert_eq!(slid.win.unwrap().stage, id(&engine, "phoenix"));
}

/// `initialize_with_dimension` overrides the configured size but still
/// enforces the minimum.
#[test]
fn test_initialize_with_dimension() {
    let engine = engine();
    let grid = engine.initialize_with_dimension(6, &mut GameRng::new(1)).unwrap();
    assert_eq!(grid.dimension(), 6);
    assert_eq!(grid.tile_count(), 2);

    let outcome = engine.apply_move(&grid, Direction::Down, &mut GameRng::new(1));
    assert_eq!(outcome.grid.dimension(), 6);

    for dimension in [0, 1] {
        let err = engine.initialize_with_dimension(dimension, &mut GameRng::new(1)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDimension(dimension));
    }
}

/// Hand-built grids must match the engine's dimension.
#[test]
fn test_grid_from_keys_checks_dimension() {
    let engine = engine();
    let err = engine.grid_from_keys(&[&["pidgey"]]).unwrap_err();
    assert_eq!(err, GridError::DimensionMismatch { expected: 4, found: 1 });
}

/// Random legal moves: every one changes the board and scores exactly its
/// merge points.
#[test]
fn test_random_playthrough() {
    let engine = engine();
    let mut rng = GameRng::new(77);
    let mut chooser = GameRng::new(78);
    let mut grid = engine.initialize(&mut rng);
    let mut score = 0u64;

    for _ in 0..2000 {
        let legal = engine.legal_moves(&grid);
        let Some(&direction) = chooser.choose(&legal) else {
            break;
        };
        let outcome = engine.apply_move(&grid, direction, &mut rng);
        assert!(outcome.changed);
        let points: u32 = outcome.merges.iter().map(|m| m.points).sum();
        assert_eq!(points, outcome.score_delta);
        score += u64::from(outcome.score_delta);
        grid = outcome.grid;
        if outcome.terminal {
            break;
        }
    }

    assert!(score > 0);
}
