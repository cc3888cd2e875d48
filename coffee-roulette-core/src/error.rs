/// Error types for coffee roulette operations.
use thiserror::Error;

use crate::types::{ParticipantId, RoundReport};

/// Result type for coffee roulette operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported to the caller. None of them leave stored state half-written.
#[derive(Debug, Error)]
pub enum Error {
    /// `initialize` was called against a store that already holds data.
    #[error("coffee roulette already exists, run another command")]
    AlreadyInitialized,

    /// An operation needed stored data and there was none.
    #[error("coffee roulette has not been initialized")]
    NotInitialized,

    /// No active participant has this name.
    #[error("no participant named \"{0}\"")]
    NotFound(String),

    /// No participant was ever registered with this ID.
    #[error("no participant with ID {0}")]
    UnknownId(ParticipantId),

    /// An active participant already uses this name.
    #[error("a participant named \"{0}\" already exists")]
    DuplicateName(String),

    /// Every prompt has already been used by one of the next pair. The pairs
    /// selected before this point were kept and persisted.
    #[error(
        "all conversation starters have been used, add more (round stopped after {} pairs)",
        .0.pairings.len()
    )]
    StarterPoolExhausted(Box<RoundReport>),

    /// Fewer than two participants can be paired.
    #[error("not enough eligible participants to pair ({eligible})")]
    EmptyEligibleSet { eligible: usize },

    /// The deterministic sit-out target is removed or unknown.
    #[error("participant {0} cannot sit out: not an active participant")]
    SitOutNotEligible(ParticipantId),

    /// Loaded matrix and registry disagree.
    #[error("inconsistent stored state: {0}")]
    InconsistentState(String),

    /// Backend failure inside a store implementation.
    #[error("store error: {0}")]
    Store(String),
}
