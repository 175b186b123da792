//! Outcome consumers: regeneration, starvation damage and toxin damage.

use super::TickContext;
use crate::budget::BudgetLogic;
use crate::config::StarvationSource;
use crate::health::{instant_kill_protection_threshold, HealthLogic};
use crate::interval::{advance, IntervalPolicy};
use crate::notice::Notice;
use crate::storage::CompoundPool;
use protoplasm_data::{
    Compound, CompoundBag, EnergyBudget, Engulfable, Health, MicrobeStatus, OrganelleContainer,
    PhagocytosisPhase,
};
use serde::Serialize;

pub const STARVATION_CAUSE: &str = "atpDamage";
pub const TOXIN_CAUSE: &str = "hydrogenSulfide";
pub const TOXIN_NOTICE: &str = "Hydrogen sulfide is damaging your cell";

/// Borrowed view of one cell for the outcome pass.
pub struct HealingCell<'a> {
    pub health: &'a mut Health,
    pub status: &'a mut MicrobeStatus,
    pub storage: &'a mut CompoundBag,
    pub budget: &'a EnergyBudget,
    pub organelles: &'a OrganelleContainer,
    pub engulfable: Option<&'a Engulfable>,
    pub is_player: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HealingOutcome {
    pub regenerated: f32,
    pub starvation_hits: u32,
    pub toxin_hits: u32,
    pub died: bool,
}

/// Runs regeneration, then starvation, then toxin damage for one cell.
///
/// `toxin_triggers` is the number of times the world-wide toxin interval
/// fired this tick. Dead cells are left untouched.
pub fn handle_healing(
    cell: &mut HealingCell<'_>,
    toxin_triggers: u32,
    ctx: &TickContext,
) -> HealingOutcome {
    let mut outcome = HealingOutcome::default();
    if !cell.health.is_alive() {
        return outcome;
    }

    outcome.regenerated = regenerate(cell, ctx);
    outcome.starvation_hits = apply_starvation_damage(cell, ctx);
    outcome.toxin_hits = apply_toxin_damage(cell, toxin_triggers, ctx);
    outcome.died = !cell.health.is_alive();
    outcome
}

/// Heals a cell that is off cooldown and has enough energy.
///
/// Energy is enough when stored ATP reaches the absolute threshold or the
/// store is at least the alternative fraction full.
pub fn regenerate(cell: &mut HealingCell<'_>, ctx: &TickContext) -> f32 {
    let config = &ctx.config.health;
    let health = &mut *cell.health;

    if health.regen_cooldown > 0.0 {
        health.regen_cooldown -= ctx.delta;
        return 0.0;
    }

    if health.current_health >= health.max_health {
        return 0.0;
    }

    let atp = cell.storage.amount_of(Compound::Atp);
    if atp < config.regeneration_atp_threshold
        && cell.storage.fullness_of(Compound::Atp) < config.regeneration_alternative_atp_fraction
    {
        return 0.0;
    }

    let before = health.current_health;
    health.heal(config.regeneration_rate * ctx.delta);
    health.current_health - before
}

fn is_starving(cell: &HealingCell<'_>, ctx: &TickContext) -> bool {
    match ctx.config.health.starvation_source {
        StarvationSource::Storage => {
            cell.storage.amount_of(Compound::Atp) <= ctx.config.health.atp_damage_threshold
        }
        StarvationSource::Budget => !cell.budget.is_mandatory_covered(),
    }
}

/// Applies one starvation hit per elapsed check interval.
///
/// An engulfed cell still consumes its intervals but takes no damage.
pub fn apply_starvation_damage(cell: &mut HealingCell<'_>, ctx: &TickContext) -> u32 {
    let config = &ctx.config.health;
    let checks = advance(
        &mut cell.status.last_checked_atp_damage,
        ctx.delta,
        config.damage_check_interval,
        IntervalPolicy::CatchUp,
    );

    let engulfed = cell
        .engulfable
        .is_some_and(|e| e.phagocytosis_step != PhagocytosisPhase::None);
    if engulfed {
        return 0;
    }

    let mut hits = 0;
    for _ in 0..checks {
        if !cell.health.is_alive() || !is_starving(cell, ctx) {
            break;
        }

        let amount = cell.health.max_health * config.no_atp_damage_fraction;
        let protection = instant_kill_protection_threshold(cell.health, cell.is_player, config);
        if cell.health.deal_damage(
            amount,
            STARVATION_CAUSE,
            protection,
            config.regen_cooldown_after_damage,
        ) {
            hits += 1;
        }
    }
    hits
}

/// Applies hydrogen sulfide damage once per global trigger.
pub fn apply_toxin_damage(
    cell: &mut HealingCell<'_>,
    toxin_triggers: u32,
    ctx: &TickContext,
) -> u32 {
    let toxin = &ctx.config.toxin;
    if toxin_triggers == 0 || cell.organelles.hydrogen_sulfide_protection {
        return 0;
    }

    let mut hits = 0;
    for _ in 0..toxin_triggers {
        if !cell.health.is_alive()
            || cell.storage.amount_of(Compound::HydrogenSulfide) <= toxin.damage_threshold
        {
            break;
        }

        cell.storage.take(Compound::HydrogenSulfide, toxin.compound_drain);
        let protection =
            instant_kill_protection_threshold(cell.health, cell.is_player, &ctx.config.health);
        if cell.health.deal_damage(
            toxin.damage,
            TOXIN_CAUSE,
            protection,
            ctx.config.health.regen_cooldown_after_damage,
        ) {
            hits += 1;
            if cell.is_player {
                ctx.notices.send(Notice::short(TOXIN_NOTICE));
            }
        }
    }
    hits
}
