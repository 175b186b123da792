//! Movement force resolution.
//!
//! Runs after allocation. A moving cell pays its base movement cost straight
//! from storage; a shortfall halves its force and cancels sprinting. Flagella
//! first spend the discretionary slack left in the budget and then storage.
//! The final force is written in world space.

use super::colony::{aggregate_colony_force, ColonyMemberSnapshot};
use super::movement_cost::{base_movement_cost, StrainLogic};
use super::TickContext;
use crate::budget::{BudgetLogic, EPSILON};
use crate::command::DeferredCommand;
use crate::config::MovementConfig;
use crate::error::SimError;
use crate::storage::CompoundPool;
use glam::{Quat, Vec3};
use protoplasm_data::{
    CellProperties, Compound, CompoundBag, EnergyBudget, Flagellum, MicrobeColony,
    MicrobeControl, MicrobeState, OrganelleContainer, SlimeJet, StrainAffected,
    TemporaryEffects, WorldPosition,
};
use std::collections::HashMap;

/// Borrowed view of one cell for movement resolution.
pub struct MovementCell<'a> {
    pub entity: hecs::Entity,
    pub control: &'a mut MicrobeControl,
    pub position: &'a WorldPosition,
    pub properties: &'a CellProperties,
    pub organelles: &'a OrganelleContainer,
    pub storage: &'a mut CompoundBag,
    pub budget: &'a mut EnergyBudget,
    pub strain: Option<&'a mut StrainAffected>,
    pub effects: Option<&'a TemporaryEffects>,
    pub colony: Option<&'a MicrobeColony>,
    pub is_player: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MovementOutput {
    /// World-space force for this tick.
    pub force: Vec3,
    /// ATP taken from the cell's own storage.
    pub atp_drawn: f32,
    pub under_energized: bool,
    /// ATP to take from colony members once the pass is done.
    pub member_draws: Vec<(hecs::Entity, f32)>,
    pub command: Option<DeferredCommand>,
}

/// Force a cell produces before any per-tick modifiers.
#[must_use]
pub fn base_movement_force(
    properties: &CellProperties,
    hex_count: u32,
    config: &MovementConfig,
) -> f32 {
    let size_scale = (hex_count.max(1) as f32).powf(-config.hex_size_exponent);
    let mut force = config.cell_base_thrust * properties.membrane.base_force * size_scale;
    if properties.is_bacteria {
        force *= config.bacteria_base_movement_multiplier;
    }
    force
}

/// Runs one flagellum for a tick and returns its force contribution.
///
/// Only flagella facing the movement direction work. The ATP they need comes
/// out of `available`; a partial supply gives a proportional force.
pub fn flagellum_force(
    flagellum: &Flagellum,
    rotation: Quat,
    direction: Vec3,
    delta: f32,
    available: &mut f32,
) -> f32 {
    let alignment = (rotation * flagellum.thrust_axis)
        .dot(direction.normalize_or_zero())
        .max(0.0);
    if alignment <= EPSILON {
        return 0.0;
    }

    let cost = flagellum.atp_cost_per_second * alignment * delta;
    let paid = cost.min((*available).max(0.0));
    *available -= paid;

    let supplied = if cost > EPSILON { paid / cost } else { 1.0 };
    flagellum.force * alignment * supplied
}

/// Total ATP the given flagella would need to run at full force.
#[must_use]
pub fn flagella_cost(flagella: &[Flagellum], rotation: Quat, direction: Vec3, delta: f32) -> f32 {
    let direction = direction.normalize_or_zero();
    flagella
        .iter()
        .map(|f| {
            let alignment = (rotation * f.thrust_axis).dot(direction).max(0.0);
            f.atp_cost_per_second * alignment * delta
        })
        .sum()
}

/// Push from the active slime jets, in cell-local space.
#[must_use]
pub fn slime_jet_movement(jets: &[SlimeJet]) -> Vec3 {
    jets.iter().filter(|j| j.active).map(|j| j.force).sum()
}

/// Resolves this tick's movement force for one cell.
///
/// Colony leaders also aggregate their members through `snapshots`. If that
/// fails the colony is queued for disbanding and the leader moves alone.
pub fn calculate_movement_force(
    cell: &mut MovementCell<'_>,
    snapshots: &HashMap<hecs::Entity, ColonyMemberSnapshot>,
    ctx: &TickContext,
) -> MovementOutput {
    let config = &ctx.config.movement;
    let delta = ctx.delta;
    let hex_count = cell.organelles.hex_count;
    let mut output = MovementOutput::default();
    let mut strain_multiplier = 1.0;

    if cell.control.movement_direction == Vec3::ZERO {
        if let Some(strain) = cell.strain.as_deref_mut() {
            strain_multiplier = strain.atp_multiplier(config.strain_to_atp_coefficient);
            strain.is_under_strain = false;
        }

        if strain_multiplier > 1.0 {
            let cost = base_movement_cost(hex_count, 1.0, delta, strain_multiplier, config);
            output.atp_drawn += cell.storage.take(Compound::Atp, cost);
        }

        let jets = slime_jet_movement(&cell.organelles.slime_jets);
        output.force = cell.position.rotation * jets;
        return output;
    }

    cell.control.movement_direction.y = 0.0;
    let mut length = cell.control.movement_direction.length();
    if length > 1.0 {
        cell.control.movement_direction /= length;
        length = 1.0;
    }
    let direction = cell.control.movement_direction;

    let mut force = base_movement_force(cell.properties, hex_count, config);

    let mut sprinting = false;
    if let Some(strain) = cell.strain.as_deref_mut() {
        strain_multiplier = strain.atp_multiplier(config.strain_to_atp_coefficient);
        sprinting = cell.control.sprinting;
        strain.is_under_strain = sprinting;
    }

    let cost = base_movement_cost(hex_count, length, delta, strain_multiplier, config);
    let paid = cell.storage.take(Compound::Atp, cost);
    output.atp_drawn += paid;

    if cost - paid > EPSILON {
        force *= 0.5;
        output.under_energized = true;
        if sprinting {
            cell.control.sprinting = false;
            sprinting = false;
            if let Some(strain) = cell.strain.as_deref_mut() {
                strain.is_under_strain = false;
            }
        }
    }

    if cell.effects.is_some_and(|e| e.speed_debuff_duration > 0.0) {
        force *= 1.0 - config.speed_debuff_fraction;
    }

    let flagella = &cell.organelles.flagella;
    if !flagella.is_empty() {
        let needed = flagella_cost(flagella, Quat::IDENTITY, direction, delta);
        let claimed = cell.budget.claim_discretionary_atp(needed);
        let from_storage = cell.storage.take(Compound::Atp, needed - claimed);
        output.atp_drawn += from_storage;

        let mut available = claimed + from_storage;
        for flagellum in flagella {
            force += flagellum_force(flagellum, Quat::IDENTITY, direction, delta, &mut available);
        }
        if available > EPSILON {
            cell.storage.add(Compound::Atp, available);
        }
    }

    force *= cell.properties.membrane.movement_factor
        - cell.properties.membrane_rigidity * config.membrane_rigidity_mobility_modifier;

    if sprinting {
        force *= config.sprinting_force_multiplier;
    }

    let mut colony_jets = Vec3::ZERO;
    if let Some(colony) = cell.colony {
        if direction != Vec3::ZERO {
            match aggregate_colony_force(
                cell.entity,
                colony,
                snapshots,
                direction,
                delta,
                &ctx.config.colony,
            ) {
                Ok(aggregate) => {
                    force = force * aggregate.speed_factor + aggregate.member_force;
                    colony_jets = aggregate.jet_movement;
                    output.member_draws = aggregate.member_draws;
                }
                Err(e) => {
                    let error = SimError::colony(cell.entity, e);
                    tracing::error!(%error, "Disbanding colony");
                    output.command = Some(DeferredCommand::DisbandColony {
                        leader: cell.entity,
                        reason: error.to_string(),
                    });
                }
            }
        }
    }

    if cell.control.slowed_by_slime {
        force /= config.slime_impede_factor;
    }

    if cell.control.state == MicrobeState::Engulf {
        force *= config.engulfing_movement_multiplier;
    }

    if cell.is_player && ctx.overrides.speed > 1.0 {
        force *= ctx.overrides.speed;
    }

    let mut movement = direction * force;
    movement += slime_jet_movement(&cell.organelles.slime_jets) + colony_jets;

    output.force = cell.position.rotation * movement;
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    struct Parts {
        control: MicrobeControl,
        position: WorldPosition,
        properties: CellProperties,
        organelles: OrganelleContainer,
        storage: CompoundBag,
        budget: EnergyBudget,
        strain: StrainAffected,
    }

    impl Parts {
        fn new(direction: Vec3, atp: f32) -> Self {
            Self {
                control: MicrobeControl {
                    movement_direction: direction,
                    ..Default::default()
                },
                position: WorldPosition::default(),
                properties: CellProperties::default(),
                organelles: OrganelleContainer {
                    hex_count: 1,
                    ..Default::default()
                },
                storage: CompoundBag::new(100.0).with_amount(Compound::Atp, atp),
                budget: EnergyBudget::default(),
                strain: StrainAffected::default(),
            }
        }

        fn cell(&mut self, entity: hecs::Entity) -> MovementCell<'_> {
            MovementCell {
                entity,
                control: &mut self.control,
                position: &self.position,
                properties: &self.properties,
                organelles: &self.organelles,
                storage: &mut self.storage,
                budget: &mut self.budget,
                strain: Some(&mut self.strain),
                effects: None,
                colony: None,
                is_player: false,
            }
        }
    }

    fn entity() -> hecs::Entity {
        hecs::World::new().spawn(())
    }

    #[test]
    fn test_idle_cell_has_no_force() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::ZERO, 10.0);

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        assert_eq!(output.force, Vec3::ZERO);
        assert_eq!(output.atp_drawn, 0.0);
        assert_eq!(parts.storage.amount_of(Compound::Atp), 10.0);
    }

    #[test]
    fn test_idle_strained_cell_pays_strain() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::ZERO, 10.0);
        parts.strain.current_strain = parts.strain.max_strain;
        parts.strain.is_under_strain = true;

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        let expected = config.movement.strain_to_atp_coefficient + 1.0;
        assert!((output.atp_drawn - expected).abs() < 1e-5);
        assert!(!parts.strain.is_under_strain);
    }

    #[test]
    fn test_full_energy_moves_at_base_force() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::NEG_Z, 10.0);

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        let expected = base_movement_force(&parts.properties, 1, &config.movement);
        assert!((output.force.z + expected).abs() < 1e-4);
        assert!(!output.under_energized);
        assert!((parts.storage.amount_of(Compound::Atp) - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_shortage_halves_force_and_stops_sprint() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::NEG_Z, 0.0);
        parts.control.sprinting = true;

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        let expected = base_movement_force(&parts.properties, 1, &config.movement) * 0.5;
        assert!(output.under_energized);
        assert!(!parts.control.sprinting);
        assert!((output.force.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_vertical_input_is_dropped() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::new(0.0, 5.0, -2.0), 10.0);

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        assert_eq!(output.force.y, 0.0);
        assert!((parts.control.movement_direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_flagella_use_discretionary_slack_first() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::NEG_Z, 10.0);
        parts.organelles.flagella.push(Flagellum::default());
        parts.budget.allocated = 5.0;

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        // Only the base movement cost comes from storage
        assert!((output.atp_drawn - 1.0).abs() < 1e-5);
        let flagellum = Flagellum::default();
        assert!((parts.budget.allocated - (5.0 - flagellum.atp_cost_per_second)).abs() < 1e-5);
    }

    #[test]
    fn test_engulf_and_slime_reduce_force() {
        let config = AppConfig::default();
        let ctx = TickContext::new(1.0, &config);
        let mut parts = Parts::new(Vec3::NEG_Z, 10.0);
        parts.control.state = MicrobeState::Engulf;
        parts.control.slowed_by_slime = true;

        let output = calculate_movement_force(&mut parts.cell(entity()), &HashMap::new(), &ctx);

        let expected = base_movement_force(&parts.properties, 1, &config.movement)
            / config.movement.slime_impede_factor
            * config.movement.engulfing_movement_multiplier;
        assert!((output.force.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_player_speed_override() {
        let config = AppConfig::default();
        let overrides = crate::config::DebugOverrides { speed: 3.0 };
        let ctx = TickContext::new(1.0, &config).with_overrides(&overrides);
        let mut parts = Parts::new(Vec3::NEG_Z, 10.0);
        let mut cell = parts.cell(entity());
        cell.is_player = true;

        let output = calculate_movement_force(&mut cell, &HashMap::new(), &ctx);

        let expected = base_movement_force(&CellProperties::default(), 1, &config.movement) * 3.0;
        assert!((output.force.length() - expected).abs() < 1e-3);
    }
}
