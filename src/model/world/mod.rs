use crate::model::command::CommandQueue;
use crate::model::config::{AppConfig, DebugOverrides, WorldSettings};
use crate::model::interval::FixedInterval;
use crate::model::notice::NoticeSink;
use protoplasm_core::Metrics;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

pub mod finalize;
pub mod init;
pub mod state;
pub mod systems;
pub mod update;

pub use state::{DemandComponents, MovementComponents, OutcomeComponents, TickReport};

/// Owns every cell and runs the per-tick phases over them.
pub struct World {
    pub tick: u64,
    pub ecs: hecs::World,
    pub config: AppConfig,
    /// Must be set before the first update; osmoregulation refuses to run
    /// without it.
    pub world_settings: Option<WorldSettings>,
    pub overrides: DebugOverrides,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,
    pub notices: Arc<dyn NoticeSink>,
    /// World-wide hydrogen sulfide damage trigger.
    pub toxin_timer: FixedInterval,
    pub commands: CommandQueue,
}
