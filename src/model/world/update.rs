use crate::model::world::{systems, TickReport, World};
use protoplasm_core::TickContext;
use std::time::Instant;

impl World {
    /// Advances the simulation by one tick of `delta` seconds.
    ///
    /// Phases run strictly in order, each one a full pass over the cells:
    /// - colony control propagation
    /// - demand collection (movement and osmoregulation)
    /// - allocation from production and storage
    /// - movement resolution, then member draws and deferred commands
    /// - regeneration, starvation and toxin damage
    /// - budget reset
    ///
    /// # Errors
    /// Fails before touching any budget if world settings are missing or
    /// `delta` is not a finite, non-negative number.
    pub fn update(&mut self, delta: f32) -> anyhow::Result<TickReport> {
        anyhow::ensure!(
            delta.is_finite() && delta >= 0.0,
            "Tick delta must be finite and non-negative, got {delta}"
        );

        let started = Instant::now();
        let min_len = self.config.world.min_cells_per_job;

        let mut report = TickReport {
            tick: self.tick + 1,
            ..Default::default()
        };

        let ctx = self.context(delta);

        systems::propagate_control(&self.ecs);

        let demand = systems::demand_pass(&self.ecs, &ctx, min_len)?;
        report.mandatory_requested = demand.mandatory;
        report.discretionary_requested = demand.discretionary;

        let allocation = systems::allocation_pass(&self.ecs, &ctx, min_len);
        report.allocated_from_production = allocation.from_production;
        report.allocated_from_storage = allocation.from_storage;
        report.production_deposited = allocation.deposited;

        let snapshots = systems::capture_member_snapshots(&self.ecs);
        let movement = systems::movement_pass(&self.ecs, &snapshots, &ctx, min_len);
        systems::apply_member_draws(&self.ecs, &movement.member_draws);
        report.movement_atp_drawn = movement.atp_drawn;
        report.under_energized = movement.under_energized;

        self.tick = report.tick;
        self.commands.extend(movement.commands);
        report.colonies_disbanded = self.apply_deferred_commands();

        let toxin_triggers = self.toxin_timer.tick(delta);
        report.toxin_triggers = toxin_triggers;

        let ctx = self.context(delta);

        let outcome = systems::outcome_pass(&self.ecs, toxin_triggers, &ctx, min_len);
        report.regenerated = outcome.regenerated;
        report.starvation_hits = outcome.starvation_hits;
        report.toxin_hits = outcome.toxin_hits;
        report.deaths = outcome.deaths;

        report.cells = self.finalize_tick(&report, started.elapsed());

        tracing::debug!(
            tick = report.tick,
            mandatory = report.mandatory_requested,
            discretionary = report.discretionary_requested,
            allocated = report.allocated(),
            "Tick complete"
        );
        Ok(report)
    }

    fn context(&self, delta: f32) -> TickContext<'_> {
        TickContext {
            delta,
            config: &self.config,
            world_settings: self.world_settings.as_ref(),
            overrides: &self.overrides,
            notices: self.notices.as_ref(),
        }
    }
}
