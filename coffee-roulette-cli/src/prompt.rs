/// Conversation-starter prompt file loading.
use coffee_roulette_core::StarterPool;
use std::path::Path;

use crate::bail;

/// Read a line-delimited prompt file into a pool.
pub fn load_starters(path: &Path) -> StarterPool {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read conversation starters {}: {e}", path.display())));
    StarterPool::from_lines(&content)
}
