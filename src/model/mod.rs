pub use protoplasm_core::{BudgetLogic, CompoundPool, HealthLogic, StrainLogic};
pub mod budget {
    pub use protoplasm_core::budget::*;
}
pub mod command {
    pub use protoplasm_core::command::*;
}
pub mod config {
    pub use protoplasm_core::config::*;
}
pub mod health {
    pub use protoplasm_core::health::*;
}
pub mod interval {
    pub use protoplasm_core::interval::*;
}
pub mod lifecycle {
    pub use protoplasm_core::lifecycle::*;
}
pub mod notice {
    pub use protoplasm_core::notice::*;
}

pub mod state {
    pub use protoplasm_data::*;
}

pub mod world;
