//! Phase passes over the ECS.
//!
//! Each pass collects a hecs query into a `Vec` and hands it to rayon. Passes
//! never overlap: the caller runs them one after another, which is the only
//! barrier the budget protocol needs.

use crate::model::command::DeferredCommand;
use crate::model::world::{DemandComponents, MovementComponents, OutcomeComponents};
use protoplasm_core::error::Result;
use protoplasm_core::storage::CompoundPool;
use protoplasm_core::systems::allocation::{self, AllocationOutcome};
use protoplasm_core::systems::colony::{propagate_colony_control, ColonyMemberSnapshot};
use protoplasm_core::systems::healing::{handle_healing, HealingCell, HealingOutcome};
use protoplasm_core::systems::movement::{calculate_movement_force, MovementCell};
use protoplasm_core::systems::movement_cost::reserve_movement_cost;
use protoplasm_core::systems::osmoregulation::{
    colony_size_of, require_world_settings, reserve_osmoregulation_cost, OsmoregulationCell,
};
use protoplasm_core::TickContext;
use protoplasm_data::{
    AttachedToEntity, ColonyMember, Compound, CompoundBag, EnergyBudget, EnergyProduction,
    MicrobeColony, MicrobeControl, OrganelleContainer,
};
use rayon::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct DemandTotals {
    pub mandatory: f64,
    pub discretionary: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationTotals {
    pub from_production: f64,
    pub from_storage: f64,
    pub deposited: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MovementTotals {
    pub atp_drawn: f64,
    pub under_energized: usize,
    pub member_draws: Vec<(hecs::Entity, f32)>,
    pub commands: Vec<DeferredCommand>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutcomeTotals {
    pub regenerated: f64,
    pub starvation_hits: u32,
    pub toxin_hits: u32,
    pub deaths: usize,
}

/// Copies every leader's movement intent onto its members.
pub fn propagate_control(ecs: &hecs::World) {
    let leaders: Vec<(hecs::Entity, MicrobeControl, Vec<hecs::Entity>)> = ecs
        .query::<(&MicrobeControl, &MicrobeColony)>()
        .iter()
        .map(|(leader, (control, colony))| (leader, *control, colony.members.clone()))
        .collect();

    for (leader, control, members) in leaders {
        for member in members {
            if member == leader {
                continue;
            }
            let belongs = ecs
                .get::<&ColonyMember>(member)
                .is_ok_and(|m| m.leader == leader);
            if !belongs {
                continue;
            }
            if let Ok(mut member_control) = ecs.get::<&mut MicrobeControl>(member) {
                propagate_colony_control(&control, &mut member_control);
            }
        }
    }
}

/// Colony size per leader, for members looking up their colony.
pub fn colony_sizes(ecs: &hecs::World) -> HashMap<hecs::Entity, usize> {
    ecs.query::<&MicrobeColony>()
        .iter()
        .map(|(leader, colony)| (leader, colony.len()))
        .collect()
}

/// Runs both demand collectors for every cell.
pub fn demand_pass(ecs: &hecs::World, ctx: &TickContext, min_len: usize) -> Result<DemandTotals> {
    let settings = require_world_settings(ctx)?;
    let sizes = colony_sizes(ecs);

    let mut query = ecs.query::<DemandComponents>();
    let mut data: Vec<_> = query.iter().collect();

    let (mandatory, discretionary) = data
        .par_iter_mut()
        .with_min_len(min_len)
        .map(
            |(
                _,
                (control, organelles, properties, species, budget, strain, environment, colony, member),
            )| {
                reserve_movement_cost(control, organelles, *strain, budget, ctx);

                let cell = OsmoregulationCell {
                    organelles,
                    properties,
                    species,
                    environment: environment.as_deref_mut(),
                    colony_size: colony_size_of(*colony, *member, &sizes),
                };
                reserve_osmoregulation_cost(cell, settings, budget, ctx);

                (
                    f64::from(budget.mandatory_required),
                    f64::from(budget.discretionary_required),
                )
            },
        )
        .reduce(|| (0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1));

    Ok(DemandTotals {
        mandatory,
        discretionary,
    })
}

/// Fills every budget from production and storage.
pub fn allocation_pass(ecs: &hecs::World, ctx: &TickContext, min_len: usize) -> AllocationTotals {
    let mut query = ecs.query::<(
        &mut EnergyBudget,
        &mut CompoundBag,
        Option<&EnergyProduction>,
    )>();
    let mut data: Vec<_> = query.iter().collect();

    data.par_iter_mut()
        .with_min_len(min_len)
        .map(|(_, (budget, storage, production))| {
            allocation::allocate(budget, storage, *production, ctx)
        })
        .fold(AllocationTotals::default, |mut totals, outcome: AllocationOutcome| {
            totals.from_production += f64::from(outcome.from_production);
            totals.from_storage += f64::from(outcome.from_storage);
            totals.deposited += f64::from(outcome.deposited);
            totals
        })
        .reduce(AllocationTotals::default, |a, b| AllocationTotals {
            from_production: a.from_production + b.from_production,
            from_storage: a.from_storage + b.from_storage,
            deposited: a.deposited + b.deposited,
        })
}

/// Captures the member state colony leaders read during movement.
///
/// Only cells listed in some colony are captured. A listed cell that no
/// longer exists gets no snapshot, which the leader reports as missing.
pub fn capture_member_snapshots(ecs: &hecs::World) -> HashMap<hecs::Entity, ColonyMemberSnapshot> {
    let listed: Vec<hecs::Entity> = ecs
        .query::<&MicrobeColony>()
        .iter()
        .flat_map(|(leader, colony)| {
            colony
                .members
                .iter()
                .copied()
                .filter(move |&m| m != leader)
                .collect::<Vec<_>>()
        })
        .collect();

    let mut snapshots = HashMap::with_capacity(listed.len());
    for member in listed {
        let Ok(mut query) = ecs.query_one::<(
            &OrganelleContainer,
            &CompoundBag,
            Option<&ColonyMember>,
            Option<&AttachedToEntity>,
            Option<&MicrobeColony>,
        )>(member) else {
            continue;
        };
        if let Some((organelles, storage, colony_member, attachment, own_colony)) = query.get() {
            snapshots.insert(
                member,
                ColonyMemberSnapshot::capture(
                    organelles,
                    storage,
                    colony_member,
                    attachment,
                    own_colony.is_some(),
                ),
            );
        }
    }
    snapshots
}

/// Resolves movement for every cell that is not a non-leader colony member.
pub fn movement_pass(
    ecs: &hecs::World,
    snapshots: &HashMap<hecs::Entity, ColonyMemberSnapshot>,
    ctx: &TickContext,
    min_len: usize,
) -> MovementTotals {
    let mut query = ecs
        .query::<MovementComponents>()
        .without::<&ColonyMember>();
    let mut data: Vec<_> = query.iter().collect();

    let outputs: Vec<_> = data
        .par_iter_mut()
        .with_min_len(min_len)
        .map(
            |(
                entity,
                (
                    control,
                    position,
                    properties,
                    organelles,
                    storage,
                    budget,
                    force,
                    strain,
                    effects,
                    colony,
                    player,
                ),
            )| {
                let mut cell = MovementCell {
                    entity: *entity,
                    control: &mut **control,
                    position,
                    properties,
                    organelles,
                    storage: &mut **storage,
                    budget: &mut **budget,
                    strain: strain.as_deref_mut(),
                    effects: *effects,
                    colony: *colony,
                    is_player: player.is_some(),
                };
                let output = calculate_movement_force(&mut cell, snapshots, ctx);
                force.0 = output.force;
                output
            },
        )
        .collect();

    let mut totals = MovementTotals::default();
    for output in outputs {
        totals.atp_drawn += f64::from(output.atp_drawn);
        if output.under_energized {
            totals.under_energized += 1;
        }
        totals.member_draws.extend(output.member_draws);
        totals.commands.extend(output.command);
    }
    totals
}

/// Applies the ATP leaders took from their members, in order.
pub fn apply_member_draws(ecs: &hecs::World, draws: &[(hecs::Entity, f32)]) {
    for &(member, amount) in draws {
        match ecs.get::<&mut CompoundBag>(member) {
            Ok(mut storage) => {
                storage.take(Compound::Atp, amount);
            }
            Err(_) => {
                tracing::warn!(?member, amount, "Dropping ATP draw for missing colony member");
            }
        }
    }
}

/// Regeneration, starvation and toxin damage for every living cell.
pub fn outcome_pass(
    ecs: &hecs::World,
    toxin_triggers: u32,
    ctx: &TickContext,
    min_len: usize,
) -> OutcomeTotals {
    let mut query = ecs.query::<OutcomeComponents>();
    let mut data: Vec<_> = query.iter().collect();

    data.par_iter_mut()
        .with_min_len(min_len)
        .map(
            |(_, (health, status, storage, budget, organelles, engulfable, player))| {
                let mut cell = HealingCell {
                    health: &mut **health,
                    status: &mut **status,
                    storage: &mut **storage,
                    budget,
                    organelles,
                    engulfable: *engulfable,
                    is_player: player.is_some(),
                };
                handle_healing(&mut cell, toxin_triggers, ctx)
            },
        )
        .fold(OutcomeTotals::default, |mut totals, outcome: HealingOutcome| {
            totals.regenerated += f64::from(outcome.regenerated);
            totals.starvation_hits += outcome.starvation_hits;
            totals.toxin_hits += outcome.toxin_hits;
            if outcome.died {
                totals.deaths += 1;
            }
            totals
        })
        .reduce(OutcomeTotals::default, |a, b| OutcomeTotals {
            regenerated: a.regenerated + b.regenerated,
            starvation_hits: a.starvation_hits + b.starvation_hits,
            toxin_hits: a.toxin_hits + b.toxin_hits,
            deaths: a.deaths + b.deaths,
        })
}

/// Clears every budget, dead cells included.
pub fn reset_pass(ecs: &hecs::World, min_len: usize) -> usize {
    let mut query = ecs.query::<&mut EnergyBudget>();
    let mut data: Vec<_> = query.iter().collect();
    data.par_iter_mut()
        .with_min_len(min_len)
        .for_each(|(_, budget)| allocation::reset_budget(budget));
    data.len()
}
