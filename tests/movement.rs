mod common;

use common::{cell, WorldBuilder};
use glam::Vec3;
use protoplasm_data::{Compound, MicrobeControl, MovementForce, StrainAffected, TemporaryEffects};

fn moving(atp: f32, direction: Vec3) -> protoplasm_lib::model::lifecycle::CellTemplate {
    let mut template = cell(4, atp);
    template.control.movement_direction = direction;
    template
}

fn force_of(world: &protoplasm_lib::model::world::World, entity: hecs::Entity) -> Vec3 {
    world.ecs.get::<&MovementForce>(entity).unwrap().0
}

#[test]
fn test_moving_cell_requests_and_pays_for_movement() {
    let (mut world, cells) = WorldBuilder::new()
        .with_cell(moving(30.0, Vec3::X))
        .build();

    let report = world.update(1.0).unwrap();

    assert!((report.discretionary_requested - 4.0).abs() < 1e-4);
    assert!((report.mandatory_requested - 4.0).abs() < 1e-4);
    assert!((report.movement_atp_drawn - 4.0).abs() < 1e-4);
    assert_eq!(report.under_energized, 0);
    // Allocation takes 8, movement draws another 4
    assert_compound_near!(world, cells[0], Compound::Atp, 18.0);

    let force = force_of(&world, cells[0]);
    assert!((force.x - 25.0).abs() < 1e-3);
    assert_eq!(force.y, 0.0);
}

#[test]
fn test_direction_is_flattened_and_clamped() {
    let (mut world, cells) = WorldBuilder::new()
        .with_cell(moving(30.0, Vec3::new(3.0, 2.0, 4.0)))
        .build();

    world.update(1.0).unwrap();

    let control = *world.ecs.get::<&MicrobeControl>(cells[0]).unwrap();
    assert_eq!(control.movement_direction.y, 0.0);
    assert!((control.movement_direction.length() - 1.0).abs() < 1e-5);
}

#[test]
fn test_under_energized_cell_moves_at_half_force_and_stops_sprinting() {
    let mut starved = moving(0.0, Vec3::X);
    starved.control.sprinting = true;

    let (mut world, cells) = WorldBuilder::new()
        .with_cell(moving(30.0, Vec3::X))
        .with_cell(starved)
        .build();

    let report = world.update(1.0).unwrap();

    assert_eq!(report.under_energized, 1);
    let fed = force_of(&world, cells[0]);
    let starved = force_of(&world, cells[1]);
    assert!((starved.x - fed.x * 0.5).abs() < 1e-3);

    assert!(!world.ecs.get::<&MicrobeControl>(cells[1]).unwrap().sprinting);
    assert!(!world.ecs.get::<&StrainAffected>(cells[1]).unwrap().is_under_strain);
}

#[test]
fn test_sprinting_multiplies_force() {
    let mut sprinter = moving(30.0, Vec3::X);
    sprinter.control.sprinting = true;

    let (mut world, cells) = WorldBuilder::new()
        .with_cell(moving(30.0, Vec3::X))
        .with_cell(sprinter)
        .build();

    world.update(1.0).unwrap();

    let walk = force_of(&world, cells[0]);
    let sprint = force_of(&world, cells[1]);
    let multiplier = world.config.movement.sprinting_force_multiplier;
    assert!((sprint.x - walk.x * multiplier).abs() < 1e-3);
    assert!(world.ecs.get::<&StrainAffected>(cells[1]).unwrap().is_under_strain);
}

#[test]
fn test_idle_strained_cell_pays_strain_cost() {
    let mut strained = cell(4, 30.0);
    strained.strain = Some(StrainAffected {
        current_strain: 400.0,
        max_strain: 400.0,
        is_under_strain: true,
    });

    let (mut world, cells) = WorldBuilder::new().with_cell(strained).build();

    let report = world.update(1.0).unwrap();

    // 4 hexes at full intensity times a 1.6 strain multiplier
    assert!((report.discretionary_requested - 6.4).abs() < 1e-3);
    assert!((report.movement_atp_drawn - 6.4).abs() < 1e-3);
    assert_eq!(force_of(&world, cells[0]), Vec3::ZERO);
    assert!(!world.ecs.get::<&StrainAffected>(cells[0]).unwrap().is_under_strain);
}

#[test]
fn test_speed_debuff_and_slime_reduce_force() {
    let mut slowed = moving(30.0, Vec3::X);
    slowed.control.slowed_by_slime = true;

    let (mut world, cells) = WorldBuilder::new()
        .with_cell(moving(30.0, Vec3::X))
        .with_cell(moving(30.0, Vec3::X))
        .with_cell(slowed)
        .build();
    world
        .ecs
        .insert_one(
            cells[1],
            TemporaryEffects {
                speed_debuff_duration: 2.0,
            },
        )
        .unwrap();

    world.update(1.0).unwrap();

    let base = force_of(&world, cells[0]).x;
    let debuffed = force_of(&world, cells[1]).x;
    let slimed = force_of(&world, cells[2]).x;
    let movement = &world.config.movement;
    assert!((debuffed - base * (1.0 - movement.speed_debuff_fraction)).abs() < 1e-3);
    assert!((slimed - base / movement.slime_impede_factor).abs() < 1e-3);
}

#[test]
fn test_speed_override_only_affects_player() {
    let mut player = moving(30.0, Vec3::X);
    player.player = true;

    let (mut world, cells) = WorldBuilder::new()
        .with_cell(moving(30.0, Vec3::X))
        .with_cell(player)
        .with_world(|world| world.overrides.speed = 3.0)
        .build();

    world.update(1.0).unwrap();

    let npc = force_of(&world, cells[0]).x;
    let player = force_of(&world, cells[1]).x;
    assert!((npc - 25.0).abs() < 1e-3);
    assert!((player - 75.0).abs() < 1e-3);
}

#[test]
fn test_flagella_use_discretionary_slack_before_storage() {
    let mut template = moving(30.0, Vec3::NEG_Z);
    template.organelles.flagella = vec![protoplasm_data::Flagellum::default()];

    let (mut world, cells) = WorldBuilder::new().with_cell(template).build();

    let report = world.update(1.0).unwrap();

    // Base thrust plus one fully aligned flagellum
    let force = force_of(&world, cells[0]);
    assert!((force.z + 25.75).abs() < 1e-3);
    // Osmoregulation 4, movement request 4 then movement draw 4; the flagellum
    // is paid from the budget slack so storage is not charged again
    assert!((report.movement_atp_drawn - 4.0).abs() < 1e-4);
    assert_compound_near!(world, cells[0], Compound::Atp, 18.0);
}
