/// JSON file store: one file per resource inside a data directory.
///
///   matrix.json        affinity matrix as an array of rows
///   participants.json  registry records (id, name, starter history)
///   removed.json       removal ledger snapshots
use coffee_roulette_core::{
    AffinityMatrix, Error, Participant, Registry, RemovalLedger, RemovedParticipant, Result,
    RouletteStore,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

const MATRIX_FILE: &str = "matrix.json";
const REGISTRY_FILE: &str = "participants.json";
const LEDGER_FILE: &str = "removed.json";

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        let path = self.path(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Store(format!("failed to read {}: {e}", path.display()))),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Store(format!("failed to parse {}: {e}", path.display())))
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Store(format!("failed to create {}: {e}", self.dir.display())))?;
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| Error::Store(format!("failed to serialize {file}: {e}")))?;
        std::fs::write(&path, json)
            .map_err(|e| Error::Store(format!("failed to write {}: {e}", path.display())))
    }
}

impl RouletteStore for JsonFileStore {
    fn exists(&self) -> Result<bool> {
        Ok(self.path(MATRIX_FILE).exists() && self.path(REGISTRY_FILE).exists())
    }

    fn load_matrix(&self) -> Result<AffinityMatrix> {
        let rows: Vec<Vec<f64>> = self.read(MATRIX_FILE)?.ok_or(Error::NotInitialized)?;
        AffinityMatrix::from_rows(rows)
    }

    fn save_matrix(&mut self, matrix: &AffinityMatrix) -> Result<()> {
        self.write(MATRIX_FILE, &matrix.to_rows())
    }

    fn load_registry(&self) -> Result<Registry> {
        let participants: Vec<Participant> = self.read(REGISTRY_FILE)?.ok_or(Error::NotInitialized)?;
        Registry::from_participants(participants)
    }

    fn save_registry(&mut self, registry: &Registry) -> Result<()> {
        self.write(REGISTRY_FILE, registry.participants())
    }

    fn load_ledger(&self) -> Result<RemovalLedger> {
        let entries: Vec<RemovedParticipant> = self.read(LEDGER_FILE)?.unwrap_or_default();
        Ok(RemovalLedger::from_entries(entries))
    }

    fn save_ledger(&mut self, ledger: &RemovalLedger) -> Result<()> {
        let entries: Vec<&RemovedParticipant> = ledger.entries().collect();
        self.write(LEDGER_FILE, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_roulette_core::{Roulette, RoundOptions, StarterPool};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fresh_directory_is_not_initialized() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data"));
        assert!(!store.exists().unwrap());
        assert!(matches!(store.load_matrix(), Err(Error::NotInitialized)));
        assert!(store.load_ledger().unwrap().is_empty());
    }

    #[test]
    fn test_state_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let mut roulette = Roulette::new(JsonFileStore::new(dir.path()));
        roulette.initialize(&["Ada", "Grace", "Linus"]).unwrap();
        roulette.remove(&["Linus"]).unwrap();

        let pool = StarterPool::from_lines("one\ntwo");
        let mut rng = StdRng::seed_from_u64(21);
        let report = roulette.run_round(&pool, &RoundOptions::default(), &mut rng).unwrap();
        assert_eq!(report.pairings.len(), 1);
        let before = roulette.matrix().unwrap();

        let reopened = Roulette::new(JsonFileStore::new(dir.path()));
        assert_eq!(reopened.matrix().unwrap(), before);
        let status = reopened.status().unwrap();
        assert_eq!(status.active.len(), 2);
        assert_eq!(status.removed[0].name, "Linus");
        assert_eq!(status.active[0].starter_history.len(), 1);
    }

    #[test]
    fn test_corrupt_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MATRIX_FILE), "not json").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.load_matrix(), Err(Error::Store(_))));
    }
}
