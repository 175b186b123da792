use glam::Quat;

/// Held by the colony leader. `members` includes the leader itself.
#[derive(Debug, Clone)]
pub struct MicrobeColony {
    pub leader: hecs::Entity,
    pub members: Vec<hecs::Entity>,
}

impl MicrobeColony {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Held by every non-leader member of a colony.
#[derive(Debug, Clone, Copy)]
pub struct ColonyMember {
    pub leader: hecs::Entity,
}

/// Attachment of a colony member to its leader's body.
#[derive(Debug, Clone, Copy)]
pub struct AttachedToEntity {
    pub attached_to: hecs::Entity,
    pub relative_rotation: Quat,
}
