pub mod macros;

use protoplasm_data::{CompoundBag, SpeciesMember};
use protoplasm_lib::model::config::AppConfig;
use protoplasm_lib::model::lifecycle::CellTemplate;
use protoplasm_lib::model::world::World;
use uuid::Uuid;

type WorldMod = Box<dyn FnOnce(&mut World)>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    cells: Vec<CellTemplate>,
    world_mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_population = 0;
        config.world.colony_count = 0;
        config.world.min_cells_per_job = 1;
        Self {
            config,
            cells: Vec::new(),
            world_mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_cell(mut self, template: CellTemplate) -> Self {
        self.cells.push(template);
        self
    }

    pub fn with_world<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut World) + 'static,
    {
        self.world_mods.push(Box::new(modifier));
        self
    }

    /// Builds the world and returns it with the cells in insertion order.
    pub fn build(self) -> (World, Vec<hecs::Entity>) {
        let mut world = World::empty(self.config).expect("Failed to create world in test builder");
        let cells = self
            .cells
            .iter()
            .map(|template| world.spawn_cell(template))
            .collect();
        for modifier in self.world_mods {
            modifier(&mut world);
        }
        (world, cells)
    }
}

#[allow(dead_code)]
pub fn species(player_species: bool) -> SpeciesMember {
    SpeciesMember {
        species_id: Uuid::nil(),
        player_species,
    }
}

/// A motionless, non-producing cell with `hex_count` hexes and `atp` stored.
#[allow(dead_code)]
pub fn cell(hex_count: u32, atp: f32) -> CellTemplate {
    let config = AppConfig::default();
    let mut template = CellTemplate::from_config(&config.world, species(false));
    template.organelles.hex_count = hex_count;
    template.storage =
        CompoundBag::new(config.world.atp_capacity).with_amount(protoplasm_data::Compound::Atp, atp);
    template
}
