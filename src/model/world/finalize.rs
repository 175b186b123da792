use crate::model::command::DeferredCommand;
use crate::model::world::{systems, TickReport, World};
use protoplasm_data::{AttachedToEntity, ColonyMember, MicrobeColony};
use std::time::Duration;

impl World {
    /// Resets every budget and records the tick. Returns the cell count.
    pub fn finalize_tick(&mut self, report: &TickReport, elapsed: Duration) -> usize {
        let cells = systems::reset_pass(&self.ecs, self.config.world.min_cells_per_job);

        self.metrics
            .add_to_counter("starvation_damage", u64::from(report.starvation_hits));
        self.metrics
            .add_to_counter("toxin_damage", u64::from(report.toxin_hits));
        self.metrics.add_to_counter("deaths", report.deaths as u64);
        self.metrics
            .add_to_counter("colony_disband", report.colonies_disbanded as u64);
        self.metrics.record_tick(elapsed, cells);
        cells
    }

    /// Drains queued commands and applies them. Returns how many colonies
    /// were disbanded.
    pub fn apply_deferred_commands(&mut self) -> usize {
        let mut disbanded = 0;
        for command in self.commands.drain_unique() {
            match command {
                DeferredCommand::DisbandColony { leader, reason } => {
                    tracing::error!(?leader, %reason, "Forcing colony disband");
                    if self.disband_colony(leader) {
                        disbanded += 1;
                    }
                }
            }
        }
        disbanded
    }

    /// Removes the colony led by `leader`, detaching every member that still
    /// points at it. Returns false if `leader` led no colony.
    pub fn disband_colony(&mut self, leader: hecs::Entity) -> bool {
        let Ok(colony) = self.ecs.remove_one::<MicrobeColony>(leader) else {
            return false;
        };

        for member in colony.members {
            if member == leader {
                continue;
            }
            let belongs = self
                .ecs
                .get::<&ColonyMember>(member)
                .is_ok_and(|m| m.leader == leader);
            if belongs {
                // Members may have lost their attachment already
                let _ = self.ecs.remove::<(ColonyMember, AttachedToEntity)>(member);
                let _ = self.ecs.remove_one::<ColonyMember>(member);
            }
        }
        true
    }
}
