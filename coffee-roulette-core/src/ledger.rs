/// Removal ledger: participants excluded from future rounds.
///
/// Removal never touches the registry or the matrix. The ID keeps its row and
/// column; the round generator just leaves it out of the eligible set.
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::types::{ParticipantId, StarterPosition};

/// Snapshot of a participant taken at removal time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemovedParticipant {
    pub id: ParticipantId,
    pub name: String,
    pub starter_history: Vec<StarterPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemovalLedger {
    entries: BTreeMap<ParticipantId, RemovedParticipant>,
}

impl RemovalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<RemovedParticipant>) -> Self {
        RemovalLedger {
            entries: entries.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// Remove the first participant called `name` that is not already removed.
    pub fn remove(&mut self, registry: &Registry, name: &str) -> Result<ParticipantId> {
        let id = registry
            .participants()
            .iter()
            .find(|p| p.name == name && !self.is_removed(p.id))
            .map(|p| p.id)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        self.remove_id(registry, id)?;
        Ok(id)
    }

    /// Remove by ID, snapshotting the participant's current history.
    pub fn remove_id(&mut self, registry: &Registry, id: ParticipantId) -> Result<()> {
        let participant = registry.get(id)?;
        self.entries.insert(
            id,
            RemovedParticipant {
                id,
                name: participant.name.clone(),
                starter_history: participant.starter_history.clone(),
            },
        );
        Ok(())
    }

    pub fn is_removed(&self, id: ParticipantId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.entries.keys().copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RemovedParticipant> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut reg = Registry::new();
        reg.bulk_add(&["Ada", "Grace", "Linus"]);
        reg.record_meeting_history(1, 3).unwrap();
        reg
    }

    #[test]
    fn test_remove_snapshots_history() {
        let reg = registry();
        let mut ledger = RemovalLedger::new();
        let id = ledger.remove(&reg, "Grace").unwrap();

        assert_eq!(id, 1);
        assert!(ledger.is_removed(1));
        assert!(!ledger.is_removed(0));
        let entry = ledger.entries().next().unwrap();
        assert_eq!(entry.name, "Grace");
        assert_eq!(entry.starter_history, vec![3]);
        // Registry untouched.
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_remove_unknown_name() {
        let reg = registry();
        let mut ledger = RemovalLedger::new();
        assert!(matches!(ledger.remove(&reg, "Zane"), Err(Error::NotFound(_))));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_skips_already_removed_namesake() {
        let mut reg = registry();
        reg.register("Ada");
        let mut ledger = RemovalLedger::new();
        assert_eq!(ledger.remove(&reg, "Ada").unwrap(), 0);
        assert_eq!(ledger.remove(&reg, "Ada").unwrap(), 3);
        assert!(matches!(ledger.remove(&reg, "Ada"), Err(Error::NotFound(_))));
        assert_eq!(ledger.ids().collect::<Vec<_>>(), vec![0, 3]);
    }
}
