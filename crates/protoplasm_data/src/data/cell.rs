use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identification of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
}

/// World position and orientation of a cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldPosition {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for WorldPosition {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MicrobeState {
    #[default]
    Normal,
    Engulf,
    Binding,
}

/// Movement intent set by player input or AI.
///
/// `movement_direction` is relative to the cell's own rotation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MicrobeControl {
    pub movement_direction: Vec3,
    pub sprinting: bool,
    pub slowed_by_slime: bool,
    pub state: MicrobeState,
}

/// A single flagellum that pushes along `thrust_axis` in cell-local space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Flagellum {
    pub force: f32,
    pub atp_cost_per_second: f32,
    pub thrust_axis: Vec3,
}

impl Default for Flagellum {
    fn default() -> Self {
        Self {
            force: 0.75,
            atp_cost_per_second: 0.6,
            thrust_axis: Vec3::NEG_Z,
        }
    }
}

/// Slime jet organelle; pushes regardless of movement input while active.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SlimeJet {
    pub force: Vec3,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganelleContainer {
    pub hex_count: u32,
    pub flagella: Vec<Flagellum>,
    pub slime_jets: Vec<SlimeJet>,
    pub hydrogen_sulfide_protection: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MembraneType {
    pub osmoregulation_factor: f32,
    pub movement_factor: f32,
    pub base_force: f32,
}

impl Default for MembraneType {
    fn default() -> Self {
        Self {
            osmoregulation_factor: 1.0,
            movement_factor: 1.0,
            base_force: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CellProperties {
    pub membrane: MembraneType,
    /// In `[-1, 1]`; positive values are stiffer and slower.
    pub membrane_rigidity: f32,
    pub is_bacteria: bool,
}

/// Fatigue that builds up while sprinting and raises movement cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrainAffected {
    pub current_strain: f32,
    pub max_strain: f32,
    pub is_under_strain: bool,
}

impl Default for StrainAffected {
    fn default() -> Self {
        Self {
            current_strain: 0.0,
            max_strain: 400.0,
            is_under_strain: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnvironmentalEffects {
    pub osmoregulation_multiplier: f32,
}

impl Default for EnvironmentalEffects {
    fn default() -> Self {
        Self {
            osmoregulation_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TemporaryEffects {
    pub speed_debuff_duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesMember {
    pub species_id: Uuid,
    pub player_species: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub current_health: f32,
    pub max_health: f32,
    pub dead: bool,
    pub regen_cooldown: f32,
    #[serde(default)]
    pub last_damage_cause: Option<String>,
}

impl Health {
    #[must_use]
    pub fn new(max_health: f32) -> Self {
        Self {
            current_health: max_health,
            max_health,
            dead: false,
            regen_cooldown: 0.0,
            last_damage_cause: None,
        }
    }
}

/// Scratch state reserved for the healing/damage pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MicrobeStatus {
    pub last_checked_atp_damage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhagocytosisPhase {
    #[default]
    None,
    Ingestion,
    Ingested,
    Digested,
    Exocytosis,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Engulfable {
    pub phagocytosis_step: PhagocytosisPhase,
}

/// Marks the single cell controlled by the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerMarker;

/// World-space force produced by movement resolution this tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementForce(pub Vec3);

/// Energy produced in place each second, offered to the budget before storage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnergyProduction {
    pub per_second: f32,
}
