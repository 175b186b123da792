//! Mandatory osmoregulation demand.

use super::TickContext;
use crate::budget::BudgetLogic;
use crate::config::{OsmoregulationConfig, WorldSettings};
use crate::error::{Result, SimError};
use protoplasm_data::{
    CellProperties, ColonyMember, EnergyBudget, EnvironmentalEffects, MicrobeColony,
    OrganelleContainer, SpeciesMember,
};
use std::collections::HashMap;

/// Borrowed view of the components the osmoregulation collector reads.
pub struct OsmoregulationCell<'a> {
    pub organelles: &'a OrganelleContainer,
    pub properties: &'a CellProperties,
    pub species: &'a SpeciesMember,
    pub environment: Option<&'a mut EnvironmentalEffects>,
    /// Total members of the colony this cell belongs to, `0` when solitary.
    pub colony_size: usize,
}

/// Checks the collector's precondition once before the parallel pass.
pub fn require_world_settings<'a>(ctx: &TickContext<'a>) -> Result<&'a WorldSettings> {
    ctx.world_settings.ok_or(SimError::WorldSettingsMissing {
        system: "osmoregulation",
    })
}

/// Resolves a cell's colony size from its own colony or its leader's.
///
/// A member whose leader has no entry counts as solitary.
#[must_use]
pub fn colony_size_of(
    colony: Option<&MicrobeColony>,
    member: Option<&ColonyMember>,
    sizes: &HashMap<hecs::Entity, usize>,
) -> usize {
    if let Some(colony) = colony {
        return colony.len();
    }
    member
        .and_then(|m| sizes.get(&m.leader).copied())
        .unwrap_or(0)
}

#[must_use]
pub fn colony_discount(colony_size: usize, config: &OsmoregulationConfig) -> f32 {
    if colony_size == 0 {
        return 1.0;
    }
    config.colony_discount_base / (config.colony_discount_base + colony_size as f32)
}

/// Submits the osmoregulation cost as a mandatory request and returns it.
///
/// A non-finite or negative environmental multiplier is reset to `1.0` on the
/// component before use.
pub fn reserve_osmoregulation_cost(
    cell: OsmoregulationCell<'_>,
    settings: &WorldSettings,
    budget: &mut EnergyBudget,
    ctx: &TickContext,
) -> f32 {
    let config = &ctx.config.osmoregulation;

    let mut cost = cell.organelles.hex_count as f32
        * cell.properties.membrane.osmoregulation_factor
        * config.base_cost_per_hex
        * ctx.delta;

    cost *= colony_discount(cell.colony_size, config);

    if let Some(environment) = cell.environment {
        let multiplier = environment.osmoregulation_multiplier;
        if !multiplier.is_finite() || multiplier < 0.0 {
            tracing::warn!(
                multiplier,
                "Invalid environmental osmoregulation multiplier, resetting to 1"
            );
            environment.osmoregulation_multiplier = 1.0;
        } else {
            cost *= multiplier;
        }
    }

    if cell.species.player_species {
        cost *= settings.osmoregulation_multiplier;
    }

    budget.submit_request(cost, true);
    cost
}
