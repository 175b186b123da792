//! Allocation fill and budget reset.

use super::TickContext;
use crate::budget::BudgetLogic;
use crate::storage::CompoundPool;
use protoplasm_data::{Compound, CompoundBag, EnergyBudget, EnergyProduction};
use serde::Serialize;

/// ATP moved by one cell's allocation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AllocationOutcome {
    pub from_production: f32,
    pub from_storage: f32,
    /// Unneeded production put back into storage.
    pub deposited: f32,
}

/// Fills the budget from this tick's production first, then from storage.
///
/// Production the budget does not need is stored when
/// `budget.deposit_leftover_production` is set and discarded otherwise.
pub fn allocate(
    budget: &mut EnergyBudget,
    storage: &mut CompoundBag,
    production: Option<&EnergyProduction>,
    ctx: &TickContext,
) -> AllocationOutcome {
    let mut outcome = AllocationOutcome::default();

    let mut leftover = 0.0;
    if let Some(production) = production {
        let produced = (production.per_second * ctx.delta).max(0.0);
        leftover = budget.fill_requests(produced);
        outcome.from_production = produced - leftover;
    }

    outcome.from_storage = budget.fill_from_storage(storage);

    if ctx.config.budget.deposit_leftover_production {
        outcome.deposited = storage.add(Compound::Atp, leftover);
    }

    outcome
}

/// Clears the budget at the end of a tick.
pub fn reset_budget(budget: &mut EnergyBudget) {
    budget.reset();
}
