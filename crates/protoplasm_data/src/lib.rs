pub mod data;

pub use data::budget::EnergyBudget;
pub use data::cell::{
    CellProperties, EnergyProduction, Engulfable, EnvironmentalEffects, Flagellum, Health,
    Identity, MembraneType, MicrobeControl, MicrobeState, MicrobeStatus, MovementForce,
    OrganelleContainer, PhagocytosisPhase, PlayerMarker, SlimeJet, SpeciesMember,
    StrainAffected, TemporaryEffects, WorldPosition,
};
pub use data::colony::{AttachedToEntity, ColonyMember, MicrobeColony};
pub use data::compound::{Compound, CompoundBag};
