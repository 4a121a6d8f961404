//! Tests for the tick pipeline, mirror transform and snapshot copies.

use std::sync::Arc;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use lanewar_core::commands::Placement;
use lanewar_core::enums::{Side, UnitState};
use lanewar_core::spec::{GameSpec, ObjectiveSpec, UnitSpec};
use lanewar_core::SpecError;

use crate::error::SimError;
use crate::game::{Game, Unit};
use crate::invariants;
use crate::systems::combat;

const SWORD: usize = 0;
const ARROW: usize = 1;
const HORSE: usize = 2;

fn test_spec() -> Arc<GameSpec> {
    Arc::new(GameSpec {
        lanes: 3,
        length: 10000,
        objectives: vec![
            ObjectiveSpec::new(0, 2000, 200),
            ObjectiveSpec::new(0, 8000, 200),
            ObjectiveSpec::new(1, 5000, 200),
            ObjectiveSpec::new(2, 5000, 200),
        ],
        starting_balance: 2000,
        income: 200,
        units: vec![
            UnitSpec::melee("sword", 1000, 2000, 10000, 4000, 1000, 1000).with_merge(),
            UnitSpec::melee("arrow", 1000, 2000, 10000, 4000, 1000, 1000).with_range(3000),
            UnitSpec::melee("horse", 1000, 4000, 10000, 5000, 2000, 1400).with_swap_lanes(),
        ],
    })
}

fn new_game() -> Game {
    Game::new(test_spec()).unwrap()
}

/// Put a unit straight onto the board, bypassing placement rules.
fn spawn(game: &mut Game, lane: usize, kind: usize, side: Side, position: i64, health: i64) -> Unit {
    let unit = Unit::new(game.ids.allocate(), kind, side, position, health);
    let units = &mut game.lanes[lane].units;
    let index = units.partition_point(|other| other.position < position);
    units.insert(index, unit);
    unit
}

fn place(unit: &str, lane: usize) -> Option<Placement> {
    Some(Placement::new(unit, lane))
}

fn balances(game: &Game) -> (i64, i64) {
    (
        game.player(Side::Friendly).balance,
        game.player(Side::Enemy).balance,
    )
}

// ---- Construction ----

#[test]
fn test_new_game_layout() {
    let game = new_game();
    assert_eq!(game.lanes.len(), 3);
    assert_eq!(game.lanes[0].objectives.len(), 2);
    assert_eq!(game.lanes[0].objectives[0].position, 2000);
    assert_eq!(game.lanes[0].objectives[1].position, 8000);
    assert!(game.lanes.iter().all(|lane| lane.units.is_empty()));
    assert_eq!(balances(&game), (2000, 2000));
    assert_eq!(game.time.tick, 0);
    assert_eq!(game.unit_spec_by_name("horse").map(|(kind, _)| kind), Some(HORSE));
    assert!(game.unit_spec_by_name("catapult").is_none());
}

#[test]
fn test_objectives_sorted_per_lane() {
    let mut spec = (*test_spec()).clone();
    spec.objectives = vec![
        ObjectiveSpec::new(1, 7000, 10),
        ObjectiveSpec::new(1, 1000, 20),
    ];
    let game = Game::new(Arc::new(spec)).unwrap();
    let positions: Vec<i64> = game.lanes[1].objectives.iter().map(|o| o.position).collect();
    assert_eq!(positions, vec![1000, 7000]);
    assert_eq!(game.lanes[1].objectives[0].spec, 1);
}

#[test]
fn test_duplicate_unit_names_rejected() {
    let mut spec = (*test_spec()).clone();
    spec.units[ARROW].name = "sword".into();
    assert!(matches!(
        Game::new(Arc::new(spec)),
        Err(SpecError::DuplicateUnitName(_))
    ));
}

// ---- Placement ----

#[test]
fn test_placement_deducts_cost() {
    let mut game = new_game();
    game.tick(0.0, place("sword", 0).as_ref(), None);
    assert_eq!(balances(&game), (1000, 2000));

    let unit = game.lanes[0].units[0];
    assert_eq!(unit.position, 0);
    assert_eq!(unit.side, Side::Friendly);
    assert_eq!(unit.health, 10000);
    assert_eq!(unit.state, UnitState::Movement);
    assert!(game.is_live(unit.id));
}

#[test]
fn test_placement_rejects_unaffordable() {
    let mut game = new_game();
    game.tick(0.0, place("sword", 0).as_ref(), None);
    game.tick(0.0, place("horse", 1).as_ref(), None);
    assert_eq!(balances(&game), (1000, 2000));
    assert!(game.lanes[1].units.is_empty());
}

#[test]
fn test_placement_rejects_blocked_spawn() {
    let mut game = new_game();
    game.tick(0.0, place("sword", 0).as_ref(), None);
    game.tick(0.0, place("sword", 0).as_ref(), None);
    assert_eq!(game.lanes[0].units.len(), 1);
    assert_eq!(balances(&game), (1000, 2000));
}

#[test]
fn test_placement_rejects_bad_lane_and_unknown_unit() {
    let mut game = new_game();
    game.tick(0.0, place("sword", 3).as_ref(), place("catapult", 0).as_ref());
    assert_eq!(game.unit_count(), 0);
    assert_eq!(balances(&game), (2000, 2000));
}

#[test]
fn test_enemy_placement_at_far_edge() {
    let mut game = new_game();
    game.tick(0.0, place("sword", 0).as_ref(), place("sword", 0).as_ref());
    let units = &game.lanes[0].units;
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].side, Side::Friendly);
    assert_eq!(units[1].side, Side::Enemy);
    assert_eq!(units[1].position, 9000);
    assert_eq!(balances(&game), (1000, 1000));
}

// ---- Income ----

#[test]
fn test_flat_income() {
    let mut game = new_game();
    game.tick(0.1, None, None);
    assert_eq!(balances(&game), (2020, 2020));
    assert_eq!(game.time.tick, 1);
}

#[test]
fn test_zero_tick_is_noop() {
    let mut game = new_game();
    game.tick(0.0, None, None);
    assert_eq!(balances(&game), (2000, 2000));
    assert_eq!(game.unit_count(), 0);
    assert!(game
        .lanes
        .iter()
        .flat_map(|lane| &lane.objectives)
        .all(|objective| objective.owner.is_none()));
}

#[test]
fn test_objective_income() {
    let mut game = new_game();
    game.lanes[0].objectives[0].owner = Some(Side::Friendly);
    game.lanes[0].objectives[1].owner = Some(Side::Friendly);
    game.lanes[1].objectives[0].owner = Some(Side::Enemy);
    game.tick(0.1, None, None);
    assert_eq!(balances(&game), (2060, 2040));
}

#[test]
fn test_capture_needs_footprint_cover() {
    let mut game = new_game();
    spawn(&mut game, 1, SWORD, Side::Enemy, 4001, 10000);
    spawn(&mut game, 2, SWORD, Side::Friendly, 4000, 10000);
    game.tick(0.0, None, None);
    // [4001, 5001) covers 5000; [4000, 5000) does not.
    assert_eq!(game.lanes[1].objectives[0].owner, Some(Side::Enemy));
    assert_eq!(game.lanes[2].objectives[0].owner, None);
}

// ---- Combat ----

#[test]
fn test_end_to_end_sword_duel() {
    let mut game = new_game();
    game.tick(0.5, place("sword", 0).as_ref(), place("sword", 0).as_ref());
    let positions = |game: &Game| -> Vec<i64> {
        game.lanes[0].units.iter().map(|u| u.position).collect()
    };
    assert_eq!(positions(&game), vec![1000, 8000]);
    let friendly_id = game.lanes[0].units[0].id;
    let enemy_id = game.lanes[0].units[1].id;

    for _ in 1..4 {
        game.tick(0.5, None, None);
    }
    assert_eq!(positions(&game), vec![4000, 5000]);
    assert!(game.lanes[0].units.iter().all(|u| u.state == UnitState::Movement));
    assert_eq!(game.lanes[0].objectives[0].owner, Some(Side::Friendly));
    assert_eq!(game.lanes[0].objectives[1].owner, Some(Side::Enemy));

    let expected_health = [8000, 6400, 5120, 4096, 3277, 2622, 2098, 1598, 1098, 598, 98];
    for health in expected_health {
        game.tick(0.5, None, None);
        let units = &game.lanes[0].units;
        assert_eq!(units.len(), 2);
        for unit in units {
            assert_eq!(unit.state, UnitState::Combat);
            assert_eq!(unit.health, health);
        }
        assert_eq!(positions(&game), vec![4000, 5000]);
    }

    game.tick(0.5, None, None);
    assert!(game.lanes[0].units.is_empty());
    assert!(!game.is_live(friendly_id));
    assert!(!game.is_live(enemy_id));
    assert_eq!(game.time.tick, 16);

    // Only income since the opening purchase: 100 per tick flat, plus 100
    // per tick from each side's objective.
    assert_eq!(balances(&game), (1000 + 1600 + 1400, 1000 + 1600 + 1500));
}

#[test]
fn test_ranged_attack_reaches_over_gap() {
    let mut game = new_game();
    spawn(&mut game, 2, ARROW, Side::Friendly, 0, 10000);
    spawn(&mut game, 2, SWORD, Side::Enemy, 3500, 10000);
    game.tick(0.5, None, None);

    let units = &game.lanes[2].units;
    assert_eq!(units[0].state, UnitState::Combat);
    assert_eq!(units[0].position, 0);
    assert_eq!(units[0].health, 10000);
    assert_eq!(units[1].state, UnitState::Movement);
    assert_eq!(units[1].position, 2500);
    assert_eq!(units[1].health, 8000);
}

#[test]
fn test_attack_output_floor() {
    let spec = test_spec();
    let sword = &spec.units[SWORD];
    assert_eq!(combat::attack_output(sword, 10000, 1.0), 4000);
    assert_eq!(combat::attack_output(sword, 5000, 1.0), 2000);
    assert_eq!(combat::attack_output(sword, 1000, 1.0), 1000);
    assert_eq!(combat::attack_output(sword, 1000, 0.5), 500);
}

#[test]
fn test_several_attackers_stack_damage() {
    let mut game = new_game();
    spawn(&mut game, 1, ARROW, Side::Friendly, 1000, 10000);
    spawn(&mut game, 1, SWORD, Side::Friendly, 3000, 10000);
    spawn(&mut game, 1, SWORD, Side::Enemy, 4000, 10000);
    game.tick(0.5, None, None);
    let enemy = game.lanes[1].units[2];
    assert_eq!(enemy.health, 10000 - 2000 - 2000);
}

#[test]
fn test_gap_never_negative_in_random_lanes() {
    let spec = test_spec();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..500 {
        let mut units = Vec::new();
        let mut cursor = rng.gen_range(-500..2000);
        for index in 0..rng.gen_range(2..8) {
            let kind = rng.gen_range(0..spec.units.len());
            let side = if rng.gen_bool(0.5) { Side::Friendly } else { Side::Enemy };
            units.push(Unit::new(
                crate::ids::UnitId::new(index, 0),
                kind,
                side,
                cursor,
                1,
            ));
            cursor += spec.units[kind].height + rng.gen_range(0..1500);
        }
        for a in &units {
            for b in &units {
                if a.id != b.id {
                    assert!(combat::gap(&spec, a, b) >= 0, "{a:?} / {b:?}");
                }
            }
        }
    }
}

// ---- Movement ----

#[test]
fn test_merge_absorbs_follower() {
    let mut game = new_game();
    let follower = spawn(&mut game, 1, SWORD, Side::Friendly, 1500, 10000);
    let front = spawn(&mut game, 1, SWORD, Side::Friendly, 3000, 10000);
    spawn(&mut game, 1, SWORD, Side::Enemy, 4000, 10000);
    game.tick(0.5, None, None);

    let units = &game.lanes[1].units;
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].id, front.id);
    assert_eq!(units[0].position, 3000);
    assert_eq!(units[0].health, 8000 + 10000);
    assert_eq!(units[1].health, 8000);
    assert!(!game.is_live(follower.id));
}

#[test]
fn test_ranged_unit_holds_behind_front_line() {
    let mut game = new_game();
    spawn(&mut game, 1, ARROW, Side::Friendly, 1500, 10000);
    spawn(&mut game, 1, SWORD, Side::Friendly, 3000, 10000);
    spawn(&mut game, 1, SWORD, Side::Enemy, 4000, 10000);
    game.tick(0.5, None, None);

    // The arrow is already in range and holds; it never reaches the sword.
    let units = &game.lanes[1].units;
    assert_eq!(units.len(), 3);
    assert_eq!(units[0].position, 1500);
    assert_eq!(units[0].state, UnitState::Combat);
}

#[test]
fn test_collision_clamps_flush() {
    let mut game = new_game();
    // A fast horse catches up with a sword; neither merges.
    spawn(&mut game, 2, HORSE, Side::Friendly, 2000, 10000);
    spawn(&mut game, 2, SWORD, Side::Friendly, 3500, 10000);
    // Same thing walking the other way.
    spawn(&mut game, 0, SWORD, Side::Enemy, 5500, 10000);
    spawn(&mut game, 0, HORSE, Side::Enemy, 7000, 10000);
    game.tick(0.5, None, None);

    let friendly: Vec<i64> = game.lanes[2].units.iter().map(|u| u.position).collect();
    assert_eq!(friendly, vec![3500, 4500]);
    let enemy: Vec<i64> = game.lanes[0].units.iter().map(|u| u.position).collect();
    assert_eq!(enemy, vec![4500, 5500]);
}

#[test]
fn test_refund_on_leaving_track() {
    let mut game = new_game();
    let unit = spawn(&mut game, 2, SWORD, Side::Friendly, 8500, 5000);
    game.tick(0.5, None, None);
    assert!(game.lanes[2].units.is_empty());
    assert!(!game.is_live(unit.id));
    assert_eq!(balances(&game), (2000 + 100 + 500, 2100));
}

// ---- Flanking ----

#[test]
fn test_horse_flanks_into_previous_lane() {
    let mut game = new_game();
    let horse = spawn(&mut game, 1, HORSE, Side::Friendly, 5000, 10000);
    let sword = spawn(&mut game, 0, SWORD, Side::Enemy, 2000, 10000);
    game.tick(0.5, None, None);

    assert!(game.lanes[1].units.is_empty());
    let units = &game.lanes[0].units;
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].id, sword.id);
    assert_eq!(units[0].position, 1000);
    assert_eq!(units[1].id, horse.id);
    // Flankers walk back toward home.
    assert_eq!(units[1].position, 3000);
}

#[test]
fn test_enemy_flanks_into_next_lane() {
    let mut game = new_game();
    // Lane 0 has no previous lane, so the next one is the only option.
    let horse = spawn(&mut game, 0, HORSE, Side::Enemy, 3000, 10000);
    let sword = spawn(&mut game, 1, SWORD, Side::Friendly, 6000, 10000);
    game.tick(0.5, None, None);

    assert!(game.lanes[0].units.is_empty());
    let units = &game.lanes[1].units;
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].id, horse.id);
    assert_eq!(units[0].side, Side::Enemy);
    assert_eq!(units[0].position, 5000);
    assert_eq!(units[1].id, sword.id);
    assert_eq!(units[1].position, 7000);

    // Already behind the sword: it stays put and keeps walking home.
    game.tick(0.5, None, None);
    assert!(game.lanes[0].units.is_empty());
    assert!(game.lanes[2].units.is_empty());
    let units = &game.lanes[1].units;
    assert_eq!(units[0].id, horse.id);
    assert_eq!(units[0].position, 7000);
    assert_eq!(units[1].position, 8000);
}

#[test]
fn test_flank_prefers_previous_lane() {
    let mut game = new_game();
    let horse = spawn(&mut game, 1, HORSE, Side::Friendly, 5000, 10000);
    spawn(&mut game, 0, SWORD, Side::Enemy, 2000, 10000);
    spawn(&mut game, 2, SWORD, Side::Enemy, 2000, 10000);
    game.tick(0.5, None, None);

    assert!(game.lanes[1].units.is_empty());
    assert_eq!(game.lanes[0].units.len(), 2);
    assert_eq!(game.lanes[0].units[1].id, horse.id);
    assert_eq!(game.lanes[2].units.len(), 1);
}

#[test]
fn test_flank_rejected_behind_friendly() {
    let mut game = new_game();
    let horse = spawn(&mut game, 1, HORSE, Side::Friendly, 5000, 10000);
    spawn(&mut game, 0, SWORD, Side::Enemy, 2000, 10000);
    spawn(&mut game, 0, SWORD, Side::Friendly, 3500, 10000);
    game.tick(0.5, None, None);

    assert_eq!(game.lanes[1].units.len(), 1);
    assert_eq!(game.lanes[1].units[0].id, horse.id);
    assert_eq!(game.lanes[1].units[0].position, 7000);
    assert_eq!(game.lanes[0].units.len(), 2);
}

#[test]
fn test_flank_rejected_on_overlap() {
    let mut game = new_game();
    spawn(&mut game, 1, HORSE, Side::Friendly, 5000, 10000);
    spawn(&mut game, 0, SWORD, Side::Enemy, 5500, 10000);
    game.tick(0.5, None, None);

    assert_eq!(game.lanes[1].units.len(), 1);
    assert_eq!(game.lanes[0].units.len(), 1);
}

// ---- Mirror ----

fn mirror_fixture() -> Game {
    let mut game = new_game();
    game.tick(0.0, place("sword", 0).as_ref(), place("horse", 2).as_ref());
    game
}

#[test]
fn test_invert_mirrors_board() {
    let mut game = mirror_fixture();
    assert_eq!(balances(&game), (1000, 600));
    game.invert();

    assert_eq!(balances(&game), (600, 1000));
    let horse = game.lanes[0].units[0];
    assert_eq!(horse.kind, HORSE);
    assert_eq!(horse.side, Side::Friendly);
    assert_eq!(horse.position, -1);
    let sword = game.lanes[2].units[0];
    assert_eq!(sword.kind, SWORD);
    assert_eq!(sword.side, Side::Enemy);
    assert_eq!(sword.position, 8999);

    let objectives: Vec<i64> = game.lanes[2].objectives.iter().map(|o| o.position).collect();
    assert_eq!(objectives, vec![1999, 7999]);
}

#[test]
fn test_invert_twice_is_identity() {
    let mut game = mirror_fixture();
    game.lanes[0].objectives[1].owner = Some(Side::Enemy);
    game.tick(0.5, None, None);
    let before = game.clone();

    game.invert();
    assert_ne!(game.lanes, before.lanes);
    game.invert();

    assert_eq!(game.lanes, before.lanes);
    assert_eq!(balances(&game), balances(&before));
    assert_eq!(game.time, before.time);
}

#[test]
fn test_tick_mirrored_keeps_orientation() {
    let mut game = new_game();
    game.tick_mirrored(0.5, place("sword", 0).as_ref(), place("arrow", 2).as_ref());

    assert_eq!(balances(&game), (1100, 1100));
    let sword = game.lanes[0].units[0];
    assert_eq!(sword.side, Side::Friendly);
    // Spawned and moved on the mirrored board, so footprint mirroring puts
    // both units one step short of where a plain tick would.
    assert_eq!(sword.position, 999);
    let arrow = game.lanes[2].units[0];
    assert_eq!(arrow.side, Side::Enemy);
    assert_eq!(arrow.position, 7999);
    assert_eq!(game.time.tick, 1);
}

#[test]
fn test_mirrored_spawn_sits_one_short_of_home_edge() {
    let mut game = new_game();
    game.tick_mirrored(0.0, place("sword", 0).as_ref(), None);
    let sword = game.lanes[0].units[0];
    assert_eq!(sword.side, Side::Friendly);
    assert_eq!(sword.position, -1);
    assert_eq!(balances(&game), (1000, 2000));

    // A tick that moves nothing leaves it off the track, so it is refunded.
    game.tick(0.0, None, None);
    assert_eq!(game.unit_count(), 0);
    assert!(!game.is_live(sword.id));
    assert_eq!(balances(&game), (2000, 2000));
}

// ---- Snapshot ----

#[test]
fn test_copy_from_matches_source() {
    let spec = test_spec();
    let mut live = Game::new(spec.clone()).unwrap();
    let mut scratch = Game::new(spec).unwrap();

    live.tick(0.5, place("sword", 0).as_ref(), place("sword", 0).as_ref());
    live.tick(0.5, place("arrow", 1).as_ref(), None);
    scratch.copy_from(&live).unwrap();
    assert_eq!(scratch.lanes, live.lanes);
    assert_eq!(balances(&scratch), balances(&live));
    assert_eq!(scratch.time, live.time);

    // Run to the end of the duel so lane 0 shrinks.
    for _ in 0..20 {
        live.tick(0.5, None, None);
    }
    scratch.copy_from(&live).unwrap();
    assert_eq!(scratch.lanes, live.lanes);
    assert!(scratch.lanes[0].units.is_empty());
    assert_eq!(scratch.unit_count(), live.unit_count());
}

#[test]
fn test_copy_from_requires_same_spec_instance() {
    let live = new_game();
    let mut other = new_game();
    assert!(matches!(other.copy_from(&live), Err(SimError::SpecMismatch)));
}

// ---- Invariants ----

#[test]
fn test_invariants_hold_under_random_play() {
    let spec = test_spec();
    let mut game = Game::new(spec.clone()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let random_placement = |rng: &mut ChaCha8Rng| {
        rng.gen_bool(0.3).then(|| {
            let unit = &spec.units[rng.gen_range(0..spec.units.len())];
            Placement::new(unit.name.clone(), rng.gen_range(0..spec.lanes))
        })
    };

    for tick in 0..2000 {
        let friendly = random_placement(&mut rng);
        let enemy = random_placement(&mut rng);
        if tick % 2 == 0 {
            game.tick(0.05, friendly.as_ref(), enemy.as_ref());
        } else {
            game.tick_mirrored(0.05, friendly.as_ref(), enemy.as_ref());
        }
        assert_eq!(invariants::check(&game), Ok(()), "after tick {tick}");
    }
}

#[test]
fn test_invariant_check_reports_overlap() {
    let mut game = new_game();
    spawn(&mut game, 0, SWORD, Side::Friendly, 0, 10000);
    spawn(&mut game, 0, SWORD, Side::Enemy, 500, 10000);
    assert!(matches!(
        invariants::check(&game),
        Err(crate::error::InvariantViolation::OverlappingUnits { lane: 0, index: 0 })
    ));
}
