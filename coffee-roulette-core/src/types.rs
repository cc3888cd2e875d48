/// Stable participant identifier: a dense 0..N index assigned once at
/// registration and never reused. Doubles as the row/column index in the
/// affinity matrix, so removing someone never moves anyone else's row.
pub type ParticipantId = usize;

/// Position of a prompt in the conversation-starter pool (zero-based).
pub type StarterPosition = usize;

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Starter positions this participant has been given, oldest first.
    /// Append-only.
    pub starter_history: Vec<StarterPosition>,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Participant {
            id,
            name: name.into(),
            starter_history: Vec::new(),
        }
    }
}

/// Who sits out when the eligible population is odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SitOutPolicy {
    /// This participant is held back before pairing starts.
    Deterministic(ParticipantId),
    /// Whoever is left over after pairing sits out.
    #[default]
    Random,
}

/// How zeroed (already met) cells become eligible again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReEligibility {
    /// Zeroed cells stay zero until participants are added or the history is
    /// reset explicitly.
    #[default]
    Never,
    /// At the end of a round in which every active pair has met, all cells
    /// among active participants are restored.
    ResetExhaustedRows,
}

/// Options for a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOptions {
    /// Attach an unused conversation starter to every pair.
    pub use_starters: bool,
    pub sit_out: SitOutPolicy,
    pub re_eligibility: ReEligibility,
}

impl Default for RoundOptions {
    fn default() -> Self {
        RoundOptions {
            use_starters: true,
            sit_out: SitOutPolicy::Random,
            re_eligibility: ReEligibility::Never,
        }
    }
}

/// A conversation starter handed to a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Starter {
    pub position: StarterPosition,
    pub text: String,
}

/// One announced pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pairing {
    pub first: ParticipantId,
    pub second: ParticipantId,
    pub first_name: String,
    pub second_name: String,
    pub starter: Option<Starter>,
}

impl Pairing {
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.first == id || self.second == id
    }
}

/// The participant left without a partner in an odd round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatOut {
    pub id: ParticipantId,
    pub name: String,
}

/// Everything a round announced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundReport {
    /// Pairs in the order they were selected.
    pub pairings: Vec<Pairing>,
    /// Set only when the round ran to completion with an odd population.
    pub sat_out: Option<SatOut>,
    /// Eligible participants that never got a partner because the round
    /// stopped early. Empty for completed rounds.
    pub unpaired: Vec<ParticipantId>,
}
