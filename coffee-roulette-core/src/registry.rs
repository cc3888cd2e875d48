/// Participant registry: stable IDs, names and conversation-starter history.
///
/// IDs are handed out sequentially from 0 and never reused, so a participant's
/// ID is always its index into `participants` and into the affinity matrix.
use crate::error::{Error, Result};
use crate::types::{Participant, ParticipantId, StarterPosition};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registry {
    participants: Vec<Participant>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored records. Records must be ordered by ID with no gaps.
    pub fn from_participants(participants: Vec<Participant>) -> Result<Self> {
        for (idx, p) in participants.iter().enumerate() {
            if p.id != idx {
                return Err(Error::InconsistentState(format!(
                    "participant \"{}\" stored with ID {} at position {}",
                    p.name, p.id, idx
                )));
            }
        }
        Ok(Registry { participants })
    }

    /// Assign the next sequential ID. Names are not checked for uniqueness here.
    pub fn register(&mut self, name: impl Into<String>) -> ParticipantId {
        let id = self.participants.len();
        self.participants.push(Participant::new(id, name));
        id
    }

    /// Register each name in order. Growing the matrix is the caller's job.
    pub fn bulk_add<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<ParticipantId> {
        names.iter().map(|n| self.register(n.as_ref())).collect()
    }

    /// Append a starter position to a participant's history.
    pub fn record_meeting_history(&mut self, id: ParticipantId, position: StarterPosition) -> Result<()> {
        let participant = self.participants.get_mut(id).ok_or(Error::UnknownId(id))?;
        participant.starter_history.push(position);
        Ok(())
    }

    /// First participant with this name, removed ones included.
    pub fn lookup_id_by_name(&self, name: &str) -> Result<ParticipantId> {
        self.participants
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn get(&self, id: ParticipantId) -> Result<&Participant> {
        self.participants.get(id).ok_or(Error::UnknownId(id))
    }

    pub fn name(&self, id: ParticipantId) -> Result<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    pub fn history(&self, id: ParticipantId) -> Result<&[StarterPosition]> {
        self.get(id).map(|p| p.starter_history.as_slice())
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Number of participants ever registered.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut reg = Registry::new();
        assert_eq!(reg.register("Ada"), 0);
        assert_eq!(reg.bulk_add(&["Grace", "Linus"]), vec![1, 2]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.name(2).unwrap(), "Linus");
        assert!(reg.history(1).unwrap().is_empty());
    }

    #[test]
    fn test_lookup_by_name() {
        let mut reg = Registry::new();
        reg.bulk_add(&["Ada", "Grace"]);
        assert_eq!(reg.lookup_id_by_name("Grace").unwrap(), 1);
        assert!(matches!(reg.lookup_id_by_name("Zane"), Err(Error::NotFound(n)) if n == "Zane"));
    }

    #[test]
    fn test_lookup_duplicate_takes_first_match() {
        let mut reg = Registry::new();
        reg.bulk_add(&["Sam", "Ada", "Sam"]);
        assert_eq!(reg.lookup_id_by_name("Sam").unwrap(), 0);
    }

    #[test]
    fn test_record_meeting_history_appends() {
        let mut reg = Registry::new();
        reg.register("Ada");
        reg.record_meeting_history(0, 4).unwrap();
        reg.record_meeting_history(0, 1).unwrap();
        assert_eq!(reg.history(0).unwrap(), &[4, 1]);
        assert!(matches!(reg.record_meeting_history(7, 0), Err(Error::UnknownId(7))));
    }

    #[test]
    fn test_from_participants_rejects_gaps() {
        let ok = vec![Participant::new(0, "Ada"), Participant::new(1, "Grace")];
        assert_eq!(Registry::from_participants(ok).unwrap().len(), 2);

        let gap = vec![Participant::new(0, "Ada"), Participant::new(2, "Grace")];
        assert!(matches!(
            Registry::from_participants(gap),
            Err(Error::InconsistentState(_))
        ));
    }
}
