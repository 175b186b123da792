//! Per-cell system logic.
//!
//! Every function here works on borrowed components of a single cell so the
//! world can run it from inside a rayon pass. Phase order within a tick is
//! owned by the world: demand, allocation, movement, healing, reset.

pub mod allocation;
pub mod colony;
pub mod healing;
pub mod movement;
pub mod movement_cost;
pub mod osmoregulation;

use crate::config::{AppConfig, DebugOverrides, WorldSettings};
use crate::notice::NoticeSink;

/// Everything a system may read that is not a component.
pub struct TickContext<'a> {
    pub delta: f32,
    pub config: &'a AppConfig,
    pub world_settings: Option<&'a WorldSettings>,
    pub overrides: &'a DebugOverrides,
    pub notices: &'a dyn NoticeSink,
}

impl<'a> TickContext<'a> {
    #[must_use]
    pub fn new(delta: f32, config: &'a AppConfig) -> Self {
        const NO_OVERRIDES: DebugOverrides = DebugOverrides { speed: 1.0 };
        Self {
            delta,
            config,
            world_settings: None,
            overrides: &NO_OVERRIDES,
            notices: &(),
        }
    }

    #[must_use]
    pub fn with_world_settings(mut self, settings: &'a WorldSettings) -> Self {
        self.world_settings = Some(settings);
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: &'a DebugOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_notices(mut self, notices: &'a dyn NoticeSink) -> Self {
        self.notices = notices;
        self
    }
}
