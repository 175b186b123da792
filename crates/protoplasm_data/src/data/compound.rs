use serde::{Deserialize, Serialize};

/// Compounds a cell can hold in its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compound {
    Atp,
    Glucose,
    HydrogenSulfide,
    Oxygen,
}

impl Compound {
    pub const COUNT: usize = 4;

    pub const ALL: [Compound; Self::COUNT] = [
        Compound::Atp,
        Compound::Glucose,
        Compound::HydrogenSulfide,
        Compound::Oxygen,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Compound::Atp => 0,
            Compound::Glucose => 1,
            Compound::HydrogenSulfide => 2,
            Compound::Oxygen => 3,
        }
    }
}

/// Bounded per-cell compound store.
///
/// Every compound has its own capacity; stored amounts never exceed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundBag {
    pub amounts: [f32; Compound::COUNT],
    pub capacities: [f32; Compound::COUNT],
}

impl CompoundBag {
    /// Creates an empty bag where every compound shares `nominal_capacity`.
    #[must_use]
    pub fn new(nominal_capacity: f32) -> Self {
        Self {
            amounts: [0.0; Compound::COUNT],
            capacities: [nominal_capacity.max(0.0); Compound::COUNT],
        }
    }

    #[must_use]
    pub fn with_amount(mut self, compound: Compound, amount: f32) -> Self {
        let idx = compound.index();
        self.amounts[idx] = amount.clamp(0.0, self.capacities[idx]);
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, compound: Compound, capacity: f32) -> Self {
        let idx = compound.index();
        self.capacities[idx] = capacity.max(0.0);
        self.amounts[idx] = self.amounts[idx].min(self.capacities[idx]);
        self
    }
}

impl Default for CompoundBag {
    fn default() -> Self {
        Self::new(0.0)
    }
}
