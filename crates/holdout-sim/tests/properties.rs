//! Property tests for invariants that must hold under arbitrary input.

use proptest::prelude::*;

use holdout_core::config::GameConfig;
use holdout_core::constants::MAX_GENERATORS;
use holdout_core::enums::{StructureKind, TurretKind};
use holdout_core::error::RejectReason;
use holdout_core::types::GridCell;
use holdout_sim::systems::{economy, movement};
use holdout_sim::world::World;
use holdout_sim::world_setup::spawn_player;

fn any_kind() -> impl Strategy<Value = StructureKind> {
    prop_oneof![
        Just(StructureKind::Wall),
        Just(StructureKind::Generator),
        Just(StructureKind::Turret(TurretKind::Arrow)),
        Just(StructureKind::Turret(TurretKind::Laser)),
        Just(StructureKind::Turret(TurretKind::Ice)),
    ]
}

fn any_cell() -> impl Strategy<Value = GridCell> {
    (0..60i32, 0..60i32).prop_map(|(col, row)| GridCell::new(col, row))
}

proptest! {
    #[test]
    fn player_never_leaves_the_world(
        moves in prop::collection::vec((-400.0..400.0f64, -400.0..400.0f64), 1..50)
    ) {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        let r = world.player.radius;
        for (dx, dy) in moves {
            world.player.move_intent = glam::DVec2::new(dx, dy);
            movement::move_player(&mut world, &config);
            let p = world.player.position;
            prop_assert!(p.x >= r && p.x <= config.world.width() - r);
            prop_assert!(p.y >= r && p.y <= config.world.height() - r);
        }
    }

    #[test]
    fn occupied_cell_always_rejects(
        first in any_kind(),
        second in any_kind(),
        cell in any_cell(),
    ) {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        world.player.resources = 100;
        economy::request_placement(&mut world, &config.costs, first, cell).unwrap();

        let money = world.player.money;
        let resources = world.player.resources;
        let result = economy::request_placement(&mut world, &config.costs, second, cell);
        prop_assert_eq!(result, Err(RejectReason::CellOccupied));
        prop_assert_eq!(world.player.money, money);
        prop_assert_eq!(world.player.resources, resources);
        prop_assert_eq!(world.structures.len(), 1);
    }

    #[test]
    fn generators_never_exceed_cap(
        cells in prop::collection::vec(any_cell(), 1..30),
        resources in 0u32..100,
    ) {
        let config = GameConfig::default();
        let mut world = World::new(spawn_player(&config));
        world.player.resources = resources;
        for cell in cells {
            let _ = economy::request_placement(&mut world, &config.costs, StructureKind::Generator, cell);
            prop_assert!(world.structures.generators.len() <= MAX_GENERATORS);
        }
        let spent = world.structures.generators.len() as u32 * config.costs.generator.resources;
        prop_assert_eq!(world.player.resources, resources - spent);
    }
}
