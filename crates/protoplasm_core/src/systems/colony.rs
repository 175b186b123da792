//! Colony traversal for movement.
//!
//! The leader of a colony moves the whole colony. Members are read through
//! [`ColonyMemberSnapshot`]s captured before the parallel movement pass, so a
//! leader never touches another cell's live components. ATP a leader spends
//! from its members is returned as draws and applied afterwards.

use super::movement::{flagellum_force, slime_jet_movement};
use crate::budget::EPSILON;
use crate::config::ColonyConfig;
use crate::error::ColonyError;
use crate::storage::CompoundPool;
use glam::{Quat, Vec3};
use protoplasm_data::{
    AttachedToEntity, ColonyMember, Compound, CompoundBag, Flagellum, MicrobeColony,
    MicrobeControl, OrganelleContainer, SlimeJet,
};
use std::collections::HashMap;

/// Immutable copy of what the leader needs from one member.
#[derive(Debug, Clone)]
pub struct ColonyMemberSnapshot {
    pub flagella: Vec<Flagellum>,
    pub slime_jets: Vec<SlimeJet>,
    pub available_atp: f32,
    /// Member orientation relative to the leader.
    pub relative_rotation: Quat,
    /// Leader recorded on the member's own `ColonyMember`.
    pub leader: Option<hecs::Entity>,
    pub leads_colony: bool,
}

impl ColonyMemberSnapshot {
    #[must_use]
    pub fn capture(
        organelles: &OrganelleContainer,
        storage: &CompoundBag,
        member: Option<&ColonyMember>,
        attachment: Option<&AttachedToEntity>,
        leads_colony: bool,
    ) -> Self {
        Self {
            flagella: organelles.flagella.clone(),
            slime_jets: organelles.slime_jets.clone(),
            available_atp: storage.amount_of(Compound::Atp),
            relative_rotation: attachment.map_or(Quat::IDENTITY, |a| a.relative_rotation),
            leader: member.map(|m| m.leader),
            leads_colony,
        }
    }
}

/// Leader-side result of walking a colony.
#[derive(Debug, Clone, Default)]
pub struct ColonyForce {
    /// Multiplier on the leader's own force.
    pub speed_factor: f32,
    /// Weighted flagella force contributed by members.
    pub member_force: f32,
    /// Slime jet push from members, in leader-local space.
    pub jet_movement: Vec3,
    /// ATP to take from each member's storage.
    pub member_draws: Vec<(hecs::Entity, f32)>,
}

#[must_use]
pub fn colony_speed_factor(colony_size: usize, config: &ColonyConfig) -> f32 {
    let extra_members = colony_size.saturating_sub(1) as f32;
    1.0 / (1.0 + config.movement_penalty_per_member * extra_members)
}

/// Walks every non-leader member and sums what it contributes to movement.
///
/// Fails without partial output if the colony's membership is inconsistent.
pub fn aggregate_colony_force(
    leader: hecs::Entity,
    colony: &MicrobeColony,
    snapshots: &HashMap<hecs::Entity, ColonyMemberSnapshot>,
    direction: Vec3,
    delta: f32,
    config: &ColonyConfig,
) -> Result<ColonyForce, ColonyError> {
    if colony.leader != leader || !colony.members.contains(&leader) {
        return Err(ColonyError::LeaderNotMember(leader));
    }

    let mut result = ColonyForce {
        speed_factor: colony_speed_factor(colony.len(), config),
        ..Default::default()
    };

    for &member in &colony.members {
        if member == leader {
            continue;
        }

        let snapshot = snapshots
            .get(&member)
            .ok_or(ColonyError::MissingMember(member))?;
        if snapshot.leads_colony {
            return Err(ColonyError::NestedColony(member));
        }
        if snapshot.leader != Some(leader) {
            return Err(ColonyError::MembershipMismatch {
                member,
                expected: leader,
                actual: snapshot.leader,
            });
        }

        let mut available = snapshot.available_atp;
        let force: f32 = snapshot
            .flagella
            .iter()
            .map(|f| flagellum_force(f, snapshot.relative_rotation, direction, delta, &mut available))
            .sum();

        let drawn = snapshot.available_atp - available;
        if drawn > EPSILON {
            result.member_draws.push((member, drawn));
        }

        result.member_force += force * config.member_force_multiplier;
        result.jet_movement += snapshot.relative_rotation * slime_jet_movement(&snapshot.slime_jets);
    }

    Ok(result)
}

/// Copies the leader's movement intent onto a member.
pub fn propagate_colony_control(leader: &MicrobeControl, member: &mut MicrobeControl) {
    member.movement_direction = leader.movement_direction;
    member.sprinting = leader.sprinting;
}
