use serde::Serialize;

/// Components read and written by the demand pass.
pub type DemandComponents<'a> = (
    &'a protoplasm_data::MicrobeControl,
    &'a protoplasm_data::OrganelleContainer,
    &'a protoplasm_data::CellProperties,
    &'a protoplasm_data::SpeciesMember,
    &'a mut protoplasm_data::EnergyBudget,
    Option<&'a protoplasm_data::StrainAffected>,
    Option<&'a mut protoplasm_data::EnvironmentalEffects>,
    Option<&'a protoplasm_data::MicrobeColony>,
    Option<&'a protoplasm_data::ColonyMember>,
);

/// Components read and written by movement resolution.
pub type MovementComponents<'a> = (
    &'a mut protoplasm_data::MicrobeControl,
    &'a protoplasm_data::WorldPosition,
    &'a protoplasm_data::CellProperties,
    &'a protoplasm_data::OrganelleContainer,
    &'a mut protoplasm_data::CompoundBag,
    &'a mut protoplasm_data::EnergyBudget,
    &'a mut protoplasm_data::MovementForce,
    Option<&'a mut protoplasm_data::StrainAffected>,
    Option<&'a protoplasm_data::TemporaryEffects>,
    Option<&'a protoplasm_data::MicrobeColony>,
    Option<&'a protoplasm_data::PlayerMarker>,
);

/// Components read and written by the outcome consumers.
pub type OutcomeComponents<'a> = (
    &'a mut protoplasm_data::Health,
    &'a mut protoplasm_data::MicrobeStatus,
    &'a mut protoplasm_data::CompoundBag,
    &'a protoplasm_data::EnergyBudget,
    &'a protoplasm_data::OrganelleContainer,
    Option<&'a protoplasm_data::Engulfable>,
    Option<&'a protoplasm_data::PlayerMarker>,
);

/// Summary of one call to `World::update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub cells: usize,
    pub mandatory_requested: f64,
    pub discretionary_requested: f64,
    pub allocated_from_production: f64,
    pub allocated_from_storage: f64,
    pub production_deposited: f64,
    pub movement_atp_drawn: f64,
    pub under_energized: usize,
    pub regenerated: f64,
    pub starvation_hits: u32,
    pub toxin_hits: u32,
    pub toxin_triggers: u32,
    pub deaths: usize,
    pub colonies_disbanded: usize,
}

impl TickReport {
    /// Total energy handed to budgets this tick.
    #[must_use]
    pub fn allocated(&self) -> f64 {
        self.allocated_from_production + self.allocated_from_storage
    }
}
