//! Per-tick energy admission control.
//!
//! Demand collectors submit mandatory or discretionary requests, the
//! allocation pass fills the budget from storage, and outcome consumers read
//! the result before the reset pass clears it for the next tick.

use crate::storage::CompoundPool;
use protoplasm_data::{Compound, EnergyBudget};

/// Amounts at or below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Trait defining the allocation algorithm over an [`EnergyBudget`].
pub trait BudgetLogic {
    /// Adds a request. Negative amounts are dropped.
    fn submit_request(&mut self, amount: f32, is_mandatory: bool);

    /// Total demand not yet allocated. Negative when over-allocated.
    #[must_use]
    fn outstanding_required(&self) -> f32;

    #[must_use]
    fn is_mandatory_covered(&self) -> bool;

    /// Takes the outstanding demand from `pool` in a single saturating call.
    /// Returns the amount taken.
    fn fill_from_storage<P: CompoundPool + ?Sized>(&mut self, pool: &mut P) -> f32;

    /// Fills from energy already in hand and returns the unused remainder.
    fn fill_requests(&mut self, available: f32) -> f32;

    /// Hands allocated energy beyond the mandatory requirement to a third
    /// party. Both `allocated` and `mandatory_required` drop by the claimed
    /// amount so `outstanding_required` is unchanged by the claim.
    fn claim_discretionary_atp(&mut self, requested: f32) -> f32;

    fn reset(&mut self);
}

impl BudgetLogic for EnergyBudget {
    fn submit_request(&mut self, amount: f32, is_mandatory: bool) {
        // TODO: count dropped negative requests in Metrics::increment_counter
        if amount.is_nan() || amount < 0.0 {
            return;
        }

        if is_mandatory {
            self.mandatory_required += amount;
        } else {
            self.discretionary_required += amount;
        }
    }

    fn outstanding_required(&self) -> f32 {
        self.mandatory_required + self.discretionary_required - self.allocated
    }

    fn is_mandatory_covered(&self) -> bool {
        self.allocated >= self.mandatory_required
    }

    fn fill_from_storage<P: CompoundPool + ?Sized>(&mut self, pool: &mut P) -> f32 {
        let taken = pool.take(Compound::Atp, self.outstanding_required());
        self.allocated += taken;
        taken
    }

    fn fill_requests(&mut self, available: f32) -> f32 {
        if available <= 0.0 {
            return 0.0;
        }

        let required = self.outstanding_required();
        self.allocated += required.min(available);

        (available - required).max(0.0)
    }

    fn claim_discretionary_atp(&mut self, requested: f32) -> f32 {
        let available = (self.allocated - self.mandatory_required).max(0.0);
        if requested <= EPSILON || available <= EPSILON {
            return 0.0;
        }

        let claimed = available.min(requested);
        self.allocated -= claimed;
        self.mandatory_required -= claimed;
        claimed
    }

    fn reset(&mut self) {
        *self = EnergyBudget::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoplasm_data::CompoundBag;

    fn budget(mandatory: f32, discretionary: f32, allocated: f32) -> EnergyBudget {
        EnergyBudget {
            mandatory_required: mandatory,
            discretionary_required: discretionary,
            allocated,
        }
    }

    #[test]
    fn test_submit_accumulates_by_kind() {
        let mut b = EnergyBudget::default();
        b.submit_request(2.0, true);
        b.submit_request(1.5, false);
        b.submit_request(3.0, true);
        assert_eq!(b.mandatory_required, 5.0);
        assert_eq!(b.discretionary_required, 1.5);
        assert_eq!(b.allocated, 0.0);
    }

    #[test]
    fn test_negative_request_is_dropped() {
        let mut b = EnergyBudget::default();
        b.submit_request(-4.0, true);
        b.submit_request(-1.0, false);
        assert_eq!(b, EnergyBudget::default());
    }

    #[test]
    fn test_fill_from_storage_partial() {
        // mandatory 10, discretionary 5, storage holds 12
        let mut b = budget(10.0, 5.0, 0.0);
        let mut bag = CompoundBag::new(100.0).with_amount(Compound::Atp, 12.0);

        let taken = b.fill_from_storage(&mut bag);

        assert_eq!(taken, 12.0);
        assert_eq!(b.allocated, 12.0);
        assert!(b.is_mandatory_covered());
        assert_eq!(b.outstanding_required(), 3.0);
        assert_eq!(bag.amount_of(Compound::Atp), 0.0);
    }

    #[test]
    fn test_fill_from_storage_takes_only_outstanding() {
        let mut b = budget(4.0, 1.0, 2.0);
        let mut bag = CompoundBag::new(100.0).with_amount(Compound::Atp, 50.0);

        b.fill_from_storage(&mut bag);

        assert_eq!(b.allocated, 5.0);
        assert_eq!(bag.amount_of(Compound::Atp), 47.0);
    }

    #[test]
    fn test_fill_from_storage_over_allocated_takes_nothing() {
        let mut b = budget(1.0, 0.0, 3.0);
        let mut bag = CompoundBag::new(100.0).with_amount(Compound::Atp, 50.0);
        assert_eq!(b.fill_from_storage(&mut bag), 0.0);
        assert_eq!(b.allocated, 3.0);
    }

    #[test]
    fn test_fill_requests_returns_leftover() {
        let mut b = budget(3.0, 2.0, 0.0);
        assert_eq!(b.fill_requests(8.0), 3.0);
        assert_eq!(b.allocated, 5.0);
    }

    #[test]
    fn test_fill_requests_short_supply() {
        let mut b = budget(3.0, 2.0, 0.0);
        assert_eq!(b.fill_requests(4.0), 0.0);
        assert_eq!(b.allocated, 4.0);
        assert!(b.is_mandatory_covered());
    }

    #[test]
    fn test_fill_requests_non_positive_is_noop() {
        let mut b = budget(3.0, 2.0, 0.0);
        assert_eq!(b.fill_requests(0.0), 0.0);
        assert_eq!(b.fill_requests(-2.0), 0.0);
        assert_eq!(b.allocated, 0.0);
    }

    #[test]
    fn test_claim_without_slack_is_noop() {
        let mut b = budget(10.0, 0.0, 10.0);
        assert_eq!(b.claim_discretionary_atp(4.0), 0.0);
        assert_eq!(b, budget(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_claim_takes_slack_and_adjusts_mandatory() {
        let mut b = budget(10.0, 5.0, 13.0);
        let before = b.outstanding_required();

        let claimed = b.claim_discretionary_atp(5.0);

        assert_eq!(claimed, 3.0);
        assert_eq!(b.allocated, 10.0);
        assert_eq!(b.mandatory_required, 7.0);
        assert_eq!(b.outstanding_required(), before);
        assert!(b.is_mandatory_covered());
    }

    #[test]
    fn test_claim_below_epsilon_is_noop() {
        let mut b = budget(0.0, 0.0, 5.0);
        assert_eq!(b.claim_discretionary_atp(EPSILON / 2.0), 0.0);
        assert_eq!(b.allocated, 5.0);

        let mut tight = budget(5.0, 0.0, 5.0 + EPSILON / 2.0);
        assert_eq!(tight.claim_discretionary_atp(1.0), 0.0);
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let mut b = budget(1.0, 2.0, 3.0);
        b.reset();
        assert_eq!(b.mandatory_required, 0.0);
        assert_eq!(b.discretionary_required, 0.0);
        assert_eq!(b.allocated, 0.0);
    }
}
