/// Persistence seam: read-whole / write-whole access to the three stored resources.
///
/// The core never touches the filesystem. Drivers implement `RouletteStore`
/// over whatever they like; `MemoryStore` is the in-process version.
use crate::error::{Error, Result};
use crate::ledger::RemovalLedger;
use crate::matrix::AffinityMatrix;
use crate::registry::Registry;

pub trait RouletteStore {
    /// True once matrix and registry have both been saved.
    fn exists(&self) -> Result<bool>;

    fn load_matrix(&self) -> Result<AffinityMatrix>;
    fn save_matrix(&mut self, matrix: &AffinityMatrix) -> Result<()>;

    fn load_registry(&self) -> Result<Registry>;
    fn save_registry(&mut self, registry: &Registry) -> Result<()>;

    /// An absent ledger loads as empty.
    fn load_ledger(&self) -> Result<RemovalLedger>;
    fn save_ledger(&mut self, ledger: &RemovalLedger) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    matrix: Option<AffinityMatrix>,
    registry: Option<Registry>,
    ledger: Option<RemovalLedger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RouletteStore for MemoryStore {
    fn exists(&self) -> Result<bool> {
        Ok(self.matrix.is_some() && self.registry.is_some())
    }

    fn load_matrix(&self) -> Result<AffinityMatrix> {
        self.matrix.clone().ok_or(Error::NotInitialized)
    }

    fn save_matrix(&mut self, matrix: &AffinityMatrix) -> Result<()> {
        self.matrix = Some(matrix.clone());
        Ok(())
    }

    fn load_registry(&self) -> Result<Registry> {
        self.registry.clone().ok_or(Error::NotInitialized)
    }

    fn save_registry(&mut self, registry: &Registry) -> Result<()> {
        self.registry = Some(registry.clone());
        Ok(())
    }

    fn load_ledger(&self) -> Result<RemovalLedger> {
        Ok(self.ledger.clone().unwrap_or_default())
    }

    fn save_ledger(&mut self, ledger: &RemovalLedger) -> Result<()> {
        self.ledger = Some(ledger.clone());
        Ok(())
    }
}
