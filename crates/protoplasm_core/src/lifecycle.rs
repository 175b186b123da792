//! Cell construction.

use crate::config::WorldConfig;
use glam::{Quat, Vec3};
use protoplasm_data::{
    CellProperties, Compound, CompoundBag, EnergyBudget, EnergyProduction, Engulfable,
    EnvironmentalEffects, Flagellum, Health, Identity, MembraneType, MicrobeControl,
    MicrobeStatus, MovementForce, OrganelleContainer, PlayerMarker, SpeciesMember,
    StrainAffected, TemporaryEffects, WorldPosition,
};
use rand::Rng;
use uuid::Uuid;

/// Everything needed to spawn one cell.
#[derive(Debug, Clone)]
pub struct CellTemplate {
    pub position: WorldPosition,
    pub control: MicrobeControl,
    pub organelles: OrganelleContainer,
    pub properties: CellProperties,
    pub storage: CompoundBag,
    pub max_health: f32,
    pub species: SpeciesMember,
    pub strain: Option<StrainAffected>,
    pub production: Option<EnergyProduction>,
    pub player: bool,
}

impl CellTemplate {
    /// A motionless single-hex cell using the world's storage defaults.
    #[must_use]
    pub fn from_config(config: &WorldConfig, species: SpeciesMember) -> Self {
        Self {
            position: WorldPosition::default(),
            control: MicrobeControl::default(),
            organelles: OrganelleContainer {
                hex_count: config.min_hex_count,
                ..Default::default()
            },
            properties: CellProperties::default(),
            storage: CompoundBag::new(config.atp_capacity)
                .with_amount(Compound::Atp, config.initial_atp),
            max_health: config.max_health,
            species,
            strain: Some(StrainAffected::default()),
            production: None,
            player: false,
        }
    }
}

/// Assembles the components of a new cell.
#[must_use]
pub fn build_cell(id: Uuid, template: &CellTemplate) -> hecs::EntityBuilder {
    let mut builder = hecs::EntityBuilder::new();
    builder
        .add(Identity { id })
        .add(template.position)
        .add(template.control)
        .add(template.organelles.clone())
        .add(template.properties)
        .add(template.storage.clone())
        .add(EnergyBudget::default())
        .add(Health::new(template.max_health))
        .add(MicrobeStatus::default())
        .add(Engulfable::default())
        .add(template.species)
        .add(EnvironmentalEffects::default())
        .add(TemporaryEffects::default())
        .add(MovementForce::default());

    if let Some(strain) = template.strain {
        builder.add(strain);
    }
    if let Some(production) = template.production {
        builder.add(production);
    }
    if template.player {
        builder.add(PlayerMarker);
    }
    builder
}

pub fn spawn_cell(world: &mut hecs::World, id: Uuid, template: &CellTemplate) -> hecs::Entity {
    world.spawn(build_cell(id, template).build())
}

/// Rolls a varied cell within the bounds of `config`.
pub fn random_template_with_rng<R: Rng>(
    config: &WorldConfig,
    species: SpeciesMember,
    rng: &mut R,
) -> CellTemplate {
    let mut template = CellTemplate::from_config(config, species);

    template.position = WorldPosition {
        position: Vec3::new(rng.gen_range(-100.0..100.0), 0.0, rng.gen_range(-100.0..100.0)),
        rotation: Quat::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU)),
    };

    if rng.gen_bool(0.7) {
        template.control.movement_direction =
            Vec3::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0));
        template.control.sprinting = rng.gen_bool(0.1);
    }

    template.organelles.hex_count = rng.gen_range(config.min_hex_count..=config.max_hex_count);
    template.organelles.flagella = (0..rng.gen_range(0..=2))
        .map(|_| Flagellum::default())
        .collect();
    template.organelles.hydrogen_sulfide_protection = rng.gen_bool(0.2);

    template.properties = CellProperties {
        membrane: MembraneType {
            osmoregulation_factor: rng.gen_range(0.5..1.5),
            movement_factor: rng.gen_range(0.8..1.2),
            base_force: 1.0,
        },
        membrane_rigidity: rng.gen_range(-1.0..=1.0),
        is_bacteria: rng.gen_bool(0.3),
    };

    let atp = rng.gen_range(0.0..=config.initial_atp);
    template.storage = CompoundBag::new(config.atp_capacity)
        .with_amount(Compound::Atp, atp)
        .with_amount(Compound::HydrogenSulfide, rng.gen_range(0.0..0.5));

    if rng.gen_bool(0.5) {
        template.production = Some(EnergyProduction {
            per_second: rng.gen_range(0.0..2.0),
        });
    }

    template
}

/// Spawns a randomised cell with an id drawn from `rng`.
pub fn create_cell_with_rng<R: Rng>(
    world: &mut hecs::World,
    config: &WorldConfig,
    species: SpeciesMember,
    rng: &mut R,
) -> hecs::Entity {
    let id = Uuid::from_u128(rng.gen::<u128>());
    let template = random_template_with_rng(config, species, rng);
    spawn_cell(world, id, &template)
}
