//! # Protoplasm Core
//!
//! Per-cell energy admission control for the Protoplasm microbe simulation.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The energy budget and its allocation algorithm
//! - Demand collectors for movement and osmoregulation
//! - Movement force resolution with colony aggregation
//! - Regeneration, starvation and toxin damage
//! - Configuration, metrics and structured logging
//!
//! ## Architecture
//!
//! Components live in `protoplasm_data`; this crate adds behaviour through
//! extension traits and per-cell system functions. The world in the root
//! crate decides phase order and parallelism:
//!
//! 1. demand collectors submit requests
//! 2. allocation fills every budget
//! 3. movement resolution and outcome consumers read the result
//! 4. reset clears every budget
//!
//! ## Example
//!
//! ```
//! use protoplasm_core::budget::BudgetLogic;
//! use protoplasm_data::{Compound, CompoundBag, EnergyBudget};
//!
//! let mut budget = EnergyBudget::default();
//! budget.submit_request(2.0, true);
//! budget.submit_request(1.0, false);
//!
//! let mut storage = CompoundBag::new(10.0).with_amount(Compound::Atp, 2.5);
//! let taken = budget.fill_from_storage(&mut storage);
//!
//! assert_eq!(taken, 2.5);
//! assert!(budget.is_mandatory_covered());
//! ```

/// Energy budget allocation algorithm
pub mod budget;
/// Corrective actions deferred until after a parallel pass
pub mod command;
/// Configuration management for simulation parameters
pub mod config;
pub mod error;
/// Health, damage and instant-kill protection
pub mod health;
/// Fixed-interval accumulators
pub mod interval;
/// Cell construction
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Player-facing notices
pub mod notice;
/// Compound storage access
pub mod storage;
/// Per-cell systems run by the world each tick
pub mod systems;

pub use budget::{BudgetLogic, EPSILON};
pub use error::{ColonyError, Result, SimError};
pub use health::HealthLogic;
pub use metrics::{init_logging, Metrics};
pub use storage::CompoundPool;
pub use systems::movement_cost::StrainLogic;
pub use systems::TickContext;
