//! Discretionary movement demand.

use super::TickContext;
use crate::budget::{BudgetLogic, EPSILON};
use crate::config::MovementConfig;
use protoplasm_data::{EnergyBudget, MicrobeControl, OrganelleContainer, StrainAffected};

pub trait StrainLogic {
    /// Current strain as a fraction of the maximum, in `[0, 1]`.
    fn strain_fraction(&self) -> f32;

    /// Movement cost multiplier, `>= 1`.
    fn atp_multiplier(&self, coefficient: f32) -> f32 {
        self.strain_fraction() * coefficient + 1.0
    }
}

impl StrainLogic for StrainAffected {
    fn strain_fraction(&self) -> f32 {
        if self.max_strain <= 0.0 {
            return 0.0;
        }
        (self.current_strain / self.max_strain).clamp(0.0, 1.0)
    }
}

/// Strain multiplier for a cell that may not carry the strain facet.
#[must_use]
pub fn strain_atp_multiplier(strain: Option<&StrainAffected>, coefficient: f32) -> f32 {
    strain.map_or(1.0, |s| s.atp_multiplier(coefficient))
}

#[must_use]
pub fn base_movement_cost(
    hex_count: u32,
    intensity: f32,
    delta: f32,
    strain_multiplier: f32,
    config: &MovementConfig,
) -> f32 {
    config.base_movement_cost * hex_count as f32 * intensity * delta * strain_multiplier
}

/// Submits this tick's movement cost as a discretionary request.
///
/// Idle cells pay nothing unless strained; a strained idle cell pays the full
/// base cost so strain decay is still charged.
pub fn reserve_movement_cost(
    control: &MicrobeControl,
    organelles: &OrganelleContainer,
    strain: Option<&StrainAffected>,
    budget: &mut EnergyBudget,
    ctx: &TickContext,
) -> f32 {
    let config = &ctx.config.movement;
    let requested = control.movement_direction.length().min(1.0);
    let strain_multiplier = strain_atp_multiplier(strain, config.strain_to_atp_coefficient);

    let intensity = if strain_multiplier > 1.0 && requested <= EPSILON {
        1.0
    } else {
        requested
    };

    let cost = base_movement_cost(
        organelles.hex_count,
        intensity,
        ctx.delta,
        strain_multiplier,
        config,
    );
    budget.submit_request(cost, false);
    cost
}
