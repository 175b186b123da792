//! Error types for protoplasm_core.

use thiserror::Error;

/// Failure while walking a colony's member list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColonyError {
    #[error("colony member {0:?} has no movement snapshot")]
    MissingMember(hecs::Entity),

    #[error("colony leader {0:?} is not in its own member list")]
    LeaderNotMember(hecs::Entity),

    #[error("member {member:?} belongs to {actual:?}, expected {expected:?}")]
    MembershipMismatch {
        member: hecs::Entity,
        expected: hecs::Entity,
        actual: Option<hecs::Entity>,
    },

    #[error("member {0:?} leads a colony of its own")]
    NestedColony(hecs::Entity),
}

/// Main error type for the per-tick systems.
#[derive(Error, Debug)]
pub enum SimError {
    /// World settings must be set before the named system runs
    #[error("world settings not set before {system} ran")]
    WorldSettingsMissing { system: &'static str },

    #[error("colony movement aggregation failed for leader {leader:?}: {source}")]
    ColonyAggregation {
        leader: hecs::Entity,
        #[source]
        source: ColonyError,
    },
}

/// Result type alias for protoplasm_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    #[must_use]
    pub fn colony(leader: hecs::Entity, source: ColonyError) -> Self {
        Self::ColonyAggregation { leader, source }
    }
}
