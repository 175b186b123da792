//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section falls back to its `Default` values,
//! so a file only needs to list what it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! initial_population = 500
//! seed = 42
//!
//! [osmoregulation]
//! base_cost_per_hex = 1.0
//!
//! [health]
//! starvation_source = "budget"
//!
//! [toxin]
//! policy = "catch_up"
//! ```

use crate::interval::IntervalPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Population and storage defaults used when the world spawns cells.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub initial_population: usize,
    pub colony_count: usize,
    pub colony_size: usize,
    pub seed: Option<u64>,
    pub min_hex_count: u32,
    pub max_hex_count: u32,
    pub atp_capacity: f32,
    pub initial_atp: f32,
    pub max_health: f32,
    /// Minimum number of cells handed to one rayon job.
    pub min_cells_per_job: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_population: 200,
            colony_count: 4,
            colony_size: 5,
            seed: None,
            min_hex_count: 1,
            max_hex_count: 20,
            atp_capacity: 50.0,
            initial_atp: 30.0,
            max_health: 100.0,
            min_cells_per_job: 64,
        }
    }
}

/// Allocation pass behaviour.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BudgetConfig {
    /// Store production the budget did not need instead of discarding it.
    pub deposit_leftover_production: bool,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            deposit_leftover_production: true,
        }
    }
}

/// Movement cost and force resolution.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MovementConfig {
    /// ATP per hex per second at full movement intensity.
    pub base_movement_cost: f32,
    pub strain_to_atp_coefficient: f32,
    pub cell_base_thrust: f32,
    /// Larger cells push less hard per unit of thrust: `hex_count^-exponent`.
    pub hex_size_exponent: f32,
    pub bacteria_base_movement_multiplier: f32,
    pub membrane_rigidity_mobility_modifier: f32,
    pub sprinting_force_multiplier: f32,
    pub speed_debuff_fraction: f32,
    pub slime_impede_factor: f32,
    pub engulfing_movement_multiplier: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_movement_cost: 1.0,
            strain_to_atp_coefficient: 0.6,
            cell_base_thrust: 50.0,
            hex_size_exponent: 0.5,
            bacteria_base_movement_multiplier: 1.2,
            membrane_rigidity_mobility_modifier: 0.1,
            sprinting_force_multiplier: 1.8,
            speed_debuff_fraction: 0.8,
            slime_impede_factor: 4.0,
            engulfing_movement_multiplier: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OsmoregulationConfig {
    /// ATP per hex per second before membrane and colony modifiers.
    pub base_cost_per_hex: f32,
    /// Colony discount is `base / (base + colony_size)`.
    pub colony_discount_base: f32,
}

impl Default for OsmoregulationConfig {
    fn default() -> Self {
        Self {
            base_cost_per_hex: 1.0,
            colony_discount_base: 20.0,
        }
    }
}

/// Which signal the starvation check reads.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StarvationSource {
    /// Stored ATP at or below `atp_damage_threshold`.
    #[default]
    Storage,
    /// Mandatory budget demand left uncovered this tick.
    Budget,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HealthConfig {
    pub damage_check_interval: f32,
    pub atp_damage_threshold: f32,
    pub no_atp_damage_fraction: f32,
    pub regeneration_rate: f32,
    pub regeneration_atp_threshold: f32,
    pub regeneration_alternative_atp_fraction: f32,
    pub regen_cooldown_after_damage: f32,
    pub instant_kill_protection_fraction: f32,
    pub starvation_source: StarvationSource,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            damage_check_interval: 0.9,
            atp_damage_threshold: 0.0001,
            no_atp_damage_fraction: 0.04,
            regeneration_rate: 1.5,
            regeneration_atp_threshold: 1.0,
            regeneration_alternative_atp_fraction: 0.9,
            regen_cooldown_after_damage: 1.5,
            instant_kill_protection_fraction: 0.2,
            starvation_source: StarvationSource::Storage,
        }
    }
}

/// Hydrogen sulfide poisoning.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ToxinConfig {
    pub damage_interval: f32,
    pub damage_threshold: f32,
    pub damage: f32,
    pub compound_drain: f32,
    pub policy: IntervalPolicy,
}

impl Default for ToxinConfig {
    fn default() -> Self {
        Self {
            damage_interval: 1.0,
            damage_threshold: 0.1,
            damage: 8.0,
            compound_drain: 0.5,
            policy: IntervalPolicy::SingleShot,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ColonyConfig {
    /// Weight of a non-leader member's flagella in the leader's force.
    pub member_force_multiplier: f32,
    /// Leader force is divided by `1 + penalty * (members - 1)`.
    pub movement_penalty_per_member: f32,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            member_force_multiplier: 0.5,
            movement_penalty_per_member: 0.25,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub budget: BudgetConfig,
    pub movement: MovementConfig,
    pub osmoregulation: OsmoregulationConfig,
    pub health: HealthConfig,
    pub toxin: ToxinConfig,
    pub colony: ColonyConfig,
    pub target_tps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            budget: BudgetConfig::default(),
            movement: MovementConfig::default(),
            osmoregulation: OsmoregulationConfig::default(),
            health: HealthConfig::default(),
            toxin: ToxinConfig::default(),
            colony: ColonyConfig::default(),
            target_tps: 60,
        }
    }
}

/// Game-wide settings chosen when the world is created.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    /// Applied to the player species' osmoregulation cost only.
    pub osmoregulation_multiplier: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            osmoregulation_multiplier: 1.0,
        }
    }
}

/// Debug overrides; only ever touch the player cell.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct DebugOverrides {
    pub speed: f32,
}

impl Default for DebugOverrides {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(
            self.world.min_hex_count > 0,
            "Minimum hex count must be positive"
        );
        anyhow::ensure!(
            self.world.min_hex_count <= self.world.max_hex_count,
            "Minimum hex count must not exceed maximum hex count"
        );
        anyhow::ensure!(
            self.world.initial_population <= 1_000_000,
            "Initial population too large (max 1000000)"
        );
        anyhow::ensure!(
            self.world.colony_count * self.world.colony_size <= self.world.initial_population,
            "Colonies need more cells than the initial population provides"
        );
        anyhow::ensure!(
            self.world.atp_capacity >= 0.0,
            "ATP capacity must be non-negative"
        );
        anyhow::ensure!(
            self.world.initial_atp >= 0.0 && self.world.initial_atp <= self.world.atp_capacity,
            "Initial ATP must be in [0.0, atp_capacity]"
        );
        anyhow::ensure!(self.world.max_health > 0.0, "Max health must be positive");
        anyhow::ensure!(
            self.world.min_cells_per_job > 0,
            "Cells per job must be positive"
        );

        // Movement validation
        anyhow::ensure!(
            self.movement.base_movement_cost >= 0.0,
            "Base movement cost must be non-negative"
        );
        anyhow::ensure!(
            self.movement.strain_to_atp_coefficient >= 0.0,
            "Strain coefficient must be non-negative"
        );
        anyhow::ensure!(
            self.movement.speed_debuff_fraction >= 0.0 && self.movement.speed_debuff_fraction <= 1.0,
            "Speed debuff fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.movement.slime_impede_factor > 0.0,
            "Slime impede factor must be positive"
        );

        // Osmoregulation validation
        anyhow::ensure!(
            self.osmoregulation.base_cost_per_hex >= 0.0,
            "Osmoregulation cost must be non-negative"
        );
        anyhow::ensure!(
            self.osmoregulation.colony_discount_base > 0.0,
            "Colony discount base must be positive"
        );

        // Health validation
        anyhow::ensure!(
            self.health.damage_check_interval > 0.0,
            "Damage check interval must be positive"
        );
        anyhow::ensure!(
            self.health.no_atp_damage_fraction >= 0.0 && self.health.no_atp_damage_fraction <= 1.0,
            "No-ATP damage fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.health.regeneration_rate >= 0.0,
            "Regeneration rate must be non-negative"
        );
        anyhow::ensure!(
            self.health.regeneration_alternative_atp_fraction >= 0.0
                && self.health.regeneration_alternative_atp_fraction <= 1.0,
            "Alternative regeneration ATP fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.health.instant_kill_protection_fraction >= 0.0
                && self.health.instant_kill_protection_fraction < 1.0,
            "Instant kill protection fraction must be in [0.0, 1.0)"
        );

        // Toxin validation
        anyhow::ensure!(
            self.toxin.damage_interval > 0.0,
            "Toxin damage interval must be positive"
        );
        anyhow::ensure!(self.toxin.damage >= 0.0, "Toxin damage must be non-negative");

        // Colony validation
        anyhow::ensure!(
            self.colony.movement_penalty_per_member >= 0.0,
            "Colony movement penalty must be non-negative"
        );

        anyhow::ensure!(self.target_tps > 0, "Target TPS must be positive");
        anyhow::ensure!(self.target_tps <= 1000, "Target TPS too high (max 1000)");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| e.context(format!("loading {}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            fingerprint = %config.fingerprint(),
            "Loaded config"
        );
        Ok(config)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.budget).as_bytes());
        hasher.update(format!("{:?}", self.movement).as_bytes());
        hasher.update(format!("{:?}", self.osmoregulation).as_bytes());
        hasher.update(format!("{:?}", self.health).as_bytes());
        hasher.update(format!("{:?}", self.toxin).as_bytes());
        hasher.update(format!("{:?}", self.colony).as_bytes());
        hex::encode(hasher.finalize())
    }
}
