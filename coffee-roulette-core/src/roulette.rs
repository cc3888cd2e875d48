/// Coffee roulette orchestrator.
///
/// Each operation loads what it needs from the injected store, works on it in
/// memory, and writes it back whole. Nothing is cached between calls.
use std::collections::HashSet;

use rand::Rng;
use tracing::info;

use crate::error::{Error, Result};
use crate::ledger::{RemovalLedger, RemovedParticipant};
use crate::matrix::AffinityMatrix;
use crate::registry::Registry;
use crate::round;
use crate::starters::StarterPool;
use crate::store::RouletteStore;
use crate::types::{Participant, ParticipantId, RoundOptions, RoundReport, SitOutPolicy};

/// Snapshot of who is in the group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub active: Vec<Participant>,
    pub removed: Vec<RemovedParticipant>,
}

pub struct Roulette<S> {
    store: S,
}

impl<S: RouletteStore> Roulette<S> {
    pub fn new(store: S) -> Self {
        Roulette { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// One-time creation of the group. Fails if the store already has data.
    pub fn initialize<N: AsRef<str>>(&mut self, names: &[N]) -> Result<Vec<ParticipantId>> {
        if self.store.exists()? {
            return Err(Error::AlreadyInitialized);
        }
        check_new_names(&[], names)?;

        let mut registry = Registry::new();
        let ids = registry.bulk_add(names);
        let matrix = AffinityMatrix::with_participants(ids.len());

        self.store.save_matrix(&matrix)?;
        self.store.save_registry(&registry)?;
        self.store.save_ledger(&RemovalLedger::new())?;
        info!(participants = ids.len(), "coffee roulette created");
        Ok(ids)
    }

    /// Register new participants and grow the matrix to match.
    pub fn add<N: AsRef<str>>(&mut self, names: &[N]) -> Result<Vec<ParticipantId>> {
        let (mut registry, mut matrix) = self.load()?;
        let ledger = self.store.load_ledger()?;
        check_new_names(&active_names(&registry, &ledger), names)?;

        let ids = registry.bulk_add(names);
        matrix.expand(ids.len());

        self.store.save_matrix(&matrix)?;
        self.store.save_registry(&registry)?;
        info!(added = ids.len(), total = registry.len(), "participants added");
        Ok(ids)
    }

    /// Exclude participants from future rounds. All names must resolve or
    /// nothing is saved.
    pub fn remove<N: AsRef<str>>(&mut self, names: &[N]) -> Result<Vec<ParticipantId>> {
        let registry = self.store.load_registry()?;
        let mut ledger = self.store.load_ledger()?;

        let ids = names
            .iter()
            .map(|n| ledger.remove(&registry, n.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        self.store.save_ledger(&ledger)?;
        info!(removed = ids.len(), "participants removed");
        Ok(ids)
    }

    /// Run one pairing round and persist the result.
    ///
    /// On `StarterPoolExhausted` the pairs made before the pool ran dry are
    /// persisted and returned inside the error.
    pub fn run_round(
        &mut self,
        starters: &StarterPool,
        options: &RoundOptions,
        rng: &mut impl Rng,
    ) -> Result<RoundReport> {
        let (mut registry, mut matrix) = self.load()?;
        let ledger = self.store.load_ledger()?;

        let outcome = round::run_round(&mut registry, &mut matrix, &ledger, starters, options, rng);
        if matches!(outcome, Ok(_) | Err(Error::StarterPoolExhausted(_))) {
            self.store.save_matrix(&matrix)?;
            self.store.save_registry(&registry)?;
        }
        outcome
    }

    /// Forget who has met whom. Starter histories are kept.
    pub fn reset_meeting_history(&mut self) -> Result<()> {
        let (_, mut matrix) = self.load()?;
        matrix.reset_all();
        self.store.save_matrix(&matrix)?;
        info!(participants = matrix.size(), "meeting history reset");
        Ok(())
    }

    /// Resolve a name among participants that have not been removed.
    pub fn active_id_by_name(&self, name: &str) -> Result<ParticipantId> {
        let registry = self.store.load_registry()?;
        let ledger = self.store.load_ledger()?;
        registry
            .participants()
            .iter()
            .find(|p| p.name == name && !ledger.is_removed(p.id))
            .map(|p| p.id)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Sit-out policy for a named participant. The name only has to resolve
    /// when the active population is odd; otherwise nobody sits out anyway.
    pub fn sit_out_by_name(&self, name: &str) -> Result<SitOutPolicy> {
        let active = self.status()?.active;
        if active.len() % 2 == 0 {
            return Ok(SitOutPolicy::Random);
        }
        active
            .iter()
            .find(|p| p.name == name)
            .map(|p| SitOutPolicy::Deterministic(p.id))
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn status(&self) -> Result<Status> {
        let registry = self.store.load_registry()?;
        let ledger = self.store.load_ledger()?;
        Ok(Status {
            active: registry
                .participants()
                .iter()
                .filter(|p| !ledger.is_removed(p.id))
                .cloned()
                .collect(),
            removed: ledger.entries().cloned().collect(),
        })
    }

    pub fn matrix(&self) -> Result<AffinityMatrix> {
        self.load().map(|(_, matrix)| matrix)
    }

    fn load(&self) -> Result<(Registry, AffinityMatrix)> {
        if !self.store.exists()? {
            return Err(Error::NotInitialized);
        }
        let registry = self.store.load_registry()?;
        let matrix = self.store.load_matrix()?;
        if matrix.size() != registry.len() {
            return Err(Error::InconsistentState(format!(
                "matrix covers {} participants but {} are registered",
                matrix.size(),
                registry.len()
            )));
        }
        Ok((registry, matrix))
    }
}

fn active_names(registry: &Registry, ledger: &RemovalLedger) -> Vec<String> {
    registry
        .participants()
        .iter()
        .filter(|p| !ledger.is_removed(p.id))
        .map(|p| p.name.clone())
        .collect()
}

/// New names must differ from each other and from every active participant.
fn check_new_names<N: AsRef<str>>(existing: &[String], names: &[N]) -> Result<()> {
    let mut taken: HashSet<&str> = existing.iter().map(String::as_str).collect();
    for name in names {
        if !taken.insert(name.as_ref()) {
            return Err(Error::DuplicateName(name.as_ref().to_string()));
        }
    }
    Ok(())
}
