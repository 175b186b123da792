//! Compound storage access.
//!
//! The budget only ever talks to storage through [`CompoundPool`], so any
//! bounded store can back it.

use protoplasm_data::{Compound, CompoundBag};

pub trait CompoundPool {
    /// Removes up to `amount` of `compound` and returns what was actually taken.
    fn take(&mut self, compound: Compound, amount: f32) -> f32;
    /// Adds up to `amount`, saturating at capacity; returns what was stored.
    fn add(&mut self, compound: Compound, amount: f32) -> f32;
    fn amount_of(&self, compound: Compound) -> f32;
    fn capacity_of(&self, compound: Compound) -> f32;

    /// Fraction of capacity currently filled, `0.0` for zero-capacity slots.
    fn fullness_of(&self, compound: Compound) -> f32 {
        let capacity = self.capacity_of(compound);
        if capacity <= 0.0 {
            0.0
        } else {
            self.amount_of(compound) / capacity
        }
    }
}

impl CompoundPool for CompoundBag {
    fn take(&mut self, compound: Compound, amount: f32) -> f32 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let slot = &mut self.amounts[compound.index()];
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }

    fn add(&mut self, compound: Compound, amount: f32) -> f32 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let idx = compound.index();
        let space = (self.capacities[idx] - self.amounts[idx]).max(0.0);
        let added = amount.min(space);
        self.amounts[idx] += added;
        added
    }

    fn amount_of(&self, compound: Compound) -> f32 {
        self.amounts[compound.index()]
    }

    fn capacity_of(&self, compound: Compound) -> f32 {
        self.capacities[compound.index()]
    }
}
