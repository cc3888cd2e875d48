/// coffee-roulette-core: Pure-computation pairing engine for recurring coffee chats.
///
/// Participants → affinity matrix → one round of disjoint pairs that avoids
/// repeat meetings until nobody new is left. No filesystem and no printing: the
/// driver supplies a `RouletteStore` and an `Rng`.
///
/// Participants are identified by dense `usize` IDs assigned at registration
/// and never reused, so removing someone never shifts anyone else's row.
///
/// # Quick start
///
/// ```rust
/// use coffee_roulette_core::{MemoryStore, Roulette, RoundOptions, StarterPool};
///
/// let mut roulette = Roulette::new(MemoryStore::new());
/// roulette.initialize(&["Ada", "Grace", "Linus", "Barbara"]).unwrap();
///
/// let starters = StarterPool::from_lines("Best meal this year?\nFirst computer?");
/// let mut rng = rand::rng();
/// let report = roulette.run_round(&starters, &RoundOptions::default(), &mut rng).unwrap();
///
/// for p in &report.pairings {
///     println!("{} will have coffee with {}", p.first_name, p.second_name);
/// }
/// assert_eq!(report.pairings.len(), 2);
/// ```

pub mod constants;
pub mod error;
pub mod ledger;
pub mod matrix;
pub mod registry;
pub mod roulette;
pub mod round;
pub mod starters;
pub mod store;
pub mod types;

// Re-export primary public API at crate root.
pub use error::{Error, Result};
pub use ledger::{RemovalLedger, RemovedParticipant};
pub use matrix::AffinityMatrix;
pub use registry::Registry;
pub use roulette::{Roulette, Status};
pub use round::run_round;
pub use starters::StarterPool;
pub use store::{MemoryStore, RouletteStore};
pub use types::{
    Pairing, Participant, ParticipantId, ReEligibility, RoundOptions, RoundReport, SatOut,
    SitOutPolicy, Starter, StarterPosition,
};
