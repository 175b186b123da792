//! Corrective actions that must run outside the parallel passes.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum DeferredCommand {
    /// Break up a colony whose state could not be traversed.
    DisbandColony { leader: hecs::Entity, reason: String },
}

impl DeferredCommand {
    fn key(&self) -> hecs::Entity {
        match self {
            DeferredCommand::DisbandColony { leader, .. } => *leader,
        }
    }
}

/// Commands queued during a tick, applied once the current pass is done.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Vec<DeferredCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, command: DeferredCommand) {
        self.pending.push(command);
    }

    pub fn extend<I: IntoIterator<Item = DeferredCommand>>(&mut self, commands: I) {
        self.pending.extend(commands);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes every queued command, keeping only the first per target.
    pub fn drain_unique(&mut self) -> Vec<DeferredCommand> {
        let mut seen = HashSet::new();
        let mut commands = std::mem::take(&mut self.pending);
        commands.retain(|c| seen.insert(c.key()));
        commands
    }
}
