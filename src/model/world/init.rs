use crate::model::command::CommandQueue;
use crate::model::config::{AppConfig, DebugOverrides, WorldSettings};
use crate::model::interval::FixedInterval;
use crate::model::lifecycle::{self, CellTemplate};
use crate::model::notice::{LogNoticeSink, NoticeSink};
use crate::model::world::World;
use protoplasm_core::Metrics;
use protoplasm_data::{
    AttachedToEntity, ColonyMember, MicrobeColony, SpeciesMember, WorldPosition,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use uuid::Uuid;

/// Species the initial population is spread across.
const INITIAL_SPECIES: usize = 4;

impl World {
    /// Creates a world populated from `config.world`.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let initial_population = config.world.initial_population;
        let mut world = Self::empty(config)?;

        let species: Vec<SpeciesMember> = (0..INITIAL_SPECIES)
            .map(|_| SpeciesMember {
                species_id: Uuid::from_u128(world.rng.gen::<u128>()),
                player_species: false,
            })
            .collect();

        let mut cells = Vec::with_capacity(initial_population);
        for i in 0..initial_population {
            let cell = lifecycle::create_cell_with_rng(
                &mut world.ecs,
                &world.config.world,
                species[i % INITIAL_SPECIES],
                &mut world.rng,
            );
            cells.push(cell);
        }

        let colony_size = world.config.world.colony_size;
        if colony_size > 1 {
            let colonies: Vec<Vec<hecs::Entity>> = cells
                .chunks_exact(colony_size)
                .take(world.config.world.colony_count)
                .map(<[hecs::Entity]>::to_vec)
                .collect();
            for colony in colonies {
                world.form_colony(colony[0], &colony[1..])?;
            }
        }

        tracing::info!(
            cells = initial_population,
            colonies = world.ecs.query::<&MicrobeColony>().iter().count(),
            fingerprint = %world.config.fingerprint(),
            "World created"
        );
        Ok(world)
    }

    /// Creates a world with no cells.
    pub fn empty(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let toxin_timer = FixedInterval::new(config.toxin.damage_interval, config.toxin.policy);

        Ok(Self {
            tick: 0,
            ecs: hecs::World::new(),
            config,
            world_settings: Some(WorldSettings::default()),
            overrides: DebugOverrides::default(),
            metrics: Metrics::new(),
            rng,
            notices: Arc::new(LogNoticeSink),
            toxin_timer,
            commands: CommandQueue::default(),
        })
    }

    #[must_use]
    pub fn with_notice_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.notices = sink;
        self
    }

    pub fn spawn_cell(&mut self, template: &CellTemplate) -> hecs::Entity {
        let id = Uuid::from_u128(self.rng.gen::<u128>());
        lifecycle::spawn_cell(&mut self.ecs, id, template)
    }

    /// Spawns the player cell in its own species.
    pub fn spawn_player(&mut self) -> hecs::Entity {
        let species = SpeciesMember {
            species_id: Uuid::from_u128(self.rng.gen::<u128>()),
            player_species: true,
        };
        let mut template =
            lifecycle::random_template_with_rng(&self.config.world, species, &mut self.rng);
        template.player = true;
        self.spawn_cell(&template)
    }

    /// Binds `members` to `leader` as one colony.
    ///
    /// Every cell must exist and none may already belong to a colony.
    pub fn form_colony(
        &mut self,
        leader: hecs::Entity,
        members: &[hecs::Entity],
    ) -> anyhow::Result<()> {
        anyhow::ensure!(self.ecs.contains(leader), "Colony leader does not exist");
        anyhow::ensure!(
            !members.contains(&leader),
            "Colony leader cannot also be listed as a member"
        );
        for &cell in std::iter::once(&leader).chain(members) {
            anyhow::ensure!(self.ecs.contains(cell), "Colony member does not exist");
            anyhow::ensure!(
                self.ecs.get::<&MicrobeColony>(cell).is_err()
                    && self.ecs.get::<&ColonyMember>(cell).is_err(),
                "Cell already belongs to a colony"
            );
        }

        let leader_rotation = self
            .ecs
            .get::<&WorldPosition>(leader)
            .map(|p| p.rotation)
            .unwrap_or_default();

        for &member in members {
            let rotation = self
                .ecs
                .get::<&WorldPosition>(member)
                .map(|p| p.rotation)
                .unwrap_or_default();
            self.ecs.insert(
                member,
                (
                    ColonyMember { leader },
                    AttachedToEntity {
                        attached_to: leader,
                        relative_rotation: leader_rotation.inverse() * rotation,
                    },
                ),
            )?;
        }

        let mut all_members = Vec::with_capacity(members.len() + 1);
        all_members.push(leader);
        all_members.extend_from_slice(members);
        self.ecs.insert_one(
            leader,
            MicrobeColony {
                leader,
                members: all_members,
            },
        )?;
        Ok(())
    }
}
