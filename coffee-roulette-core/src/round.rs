/// Round generator: one pass of greedy, highest-affinity pairing.
///
/// Per round:
///   1. Eligible set = registered minus removed, minus the deterministic
///      sit-out when the active population is odd.
///   2. floor(eligible / 2) times: find the highest affinity among cells whose
///      row and column are both still unpaired, pick one of the tied cells
///      uniformly at random, optionally hand the pair an unused starter, and
///      zero the pair's cells.
///   3. Report the odd one out, apply the re-eligibility policy, renormalize.
///      `ResetExhaustedRows` only fires once no active pair is left unmet.
///
/// All randomness comes from the caller's `Rng` so runs can be replayed.
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::ledger::RemovalLedger;
use crate::matrix::AffinityMatrix;
use crate::registry::Registry;
use crate::starters::StarterPool;
use crate::types::{
    Pairing, ParticipantId, ReEligibility, RoundOptions, RoundReport, SatOut, SitOutPolicy, Starter,
};

/// Run one round against in-memory state.
///
/// On success the matrix and registry have been updated in place. On
/// `StarterPoolExhausted` they have been updated too (for the pairs that were
/// made) and the partial report travels inside the error. Any other error
/// leaves both untouched.
pub fn run_round(
    registry: &mut Registry,
    matrix: &mut AffinityMatrix,
    ledger: &RemovalLedger,
    starters: &StarterPool,
    options: &RoundOptions,
    rng: &mut impl Rng,
) -> Result<RoundReport> {
    if matrix.size() != registry.len() {
        return Err(Error::InconsistentState(format!(
            "matrix covers {} participants but {} are registered",
            matrix.size(),
            registry.len()
        )));
    }

    let active: Vec<ParticipantId> = registry.ids().filter(|&id| !ledger.is_removed(id)).collect();
    if active.len() < 2 {
        return Err(Error::EmptyEligibleSet { eligible: active.len() });
    }

    let held_back = match options.sit_out {
        SitOutPolicy::Deterministic(id) if active.len() % 2 == 1 => {
            if !active.contains(&id) {
                return Err(Error::SitOutNotEligible(id));
            }
            Some(id)
        }
        SitOutPolicy::Deterministic(_) | SitOutPolicy::Random => None,
    };

    let eligible: Vec<ParticipantId> = active.iter().copied().filter(|&id| Some(id) != held_back).collect();
    let pairs_target = eligible.len() / 2;

    let mut unpaired = eligible.clone();
    let mut pairings = Vec::with_capacity(pairs_target);
    let mut exhausted = false;

    for _ in 0..pairs_target {
        let Some((first, second)) = select_pair(matrix, &unpaired, rng) else {
            break;
        };

        let starter = if options.use_starters {
            let picked = starters.pick_for(registry.history(first)?, registry.history(second)?, rng);
            let Some(position) = picked else {
                warn!(first, second, pool = starters.len(), "no unused conversation starter left for pair");
                exhausted = true;
                break;
            };
            registry.record_meeting_history(first, position)?;
            registry.record_meeting_history(second, position)?;
            Some(Starter {
                position,
                text: starters.get(position).unwrap_or_default().to_string(),
            })
        } else {
            None
        };

        matrix.zero_pair(first, second);
        unpaired.retain(|&id| id != first && id != second);

        pairings.push(Pairing {
            first,
            second,
            first_name: registry.name(first)?.to_string(),
            second_name: registry.name(second)?.to_string(),
            starter,
        });
    }

    let sat_out_id = match held_back {
        Some(id) => Some(id),
        None if !exhausted && eligible.len() % 2 == 1 => unpaired.first().copied(),
        None => None,
    };
    let sat_out = match sat_out_id {
        Some(id) => Some(SatOut {
            id,
            name: registry.name(id)?.to_string(),
        }),
        None => None,
    };

    if options.re_eligibility == ReEligibility::ResetExhaustedRows
        && active.iter().all(|&id| !matrix.has_eligible_partner(id, &active))
    {
        debug!(active = active.len(), "every active pair has met, restoring eligibility");
        matrix.restore_among(&active);
    }
    matrix.renormalize_all_rows();

    info!(
        eligible = eligible.len(),
        pairs = pairings.len(),
        sat_out = ?sat_out.as_ref().map(|s| s.id),
        "round complete"
    );

    let report = RoundReport {
        pairings,
        sat_out,
        unpaired: if exhausted { unpaired } else { Vec::new() },
    };

    if exhausted {
        Err(Error::StarterPoolExhausted(Box::new(report)))
    } else {
        Ok(report)
    }
}

/// Every ordered cell (i, j), i != j, among `unpaired` that holds the current
/// maximum affinity.
pub fn max_affinity_candidates(
    matrix: &AffinityMatrix,
    unpaired: &[ParticipantId],
) -> Vec<(ParticipantId, ParticipantId)> {
    let mut best = f64::NEG_INFINITY;
    let mut candidates = Vec::new();
    for &i in unpaired {
        for &j in unpaired {
            if i == j {
                continue;
            }
            let value = matrix.get(i, j);
            if value > best {
                best = value;
                candidates.clear();
            }
            if value == best {
                candidates.push((i, j));
            }
        }
    }
    candidates
}

/// Uniform random choice among the tied maximum cells.
fn select_pair(
    matrix: &AffinityMatrix,
    unpaired: &[ParticipantId],
    rng: &mut impl Rng,
) -> Option<(ParticipantId, ParticipantId)> {
    let candidates = max_affinity_candidates(matrix, unpaired);
    if candidates.is_empty() {
        return None;
    }
    let (first, second) = candidates[rng.random_range(0..candidates.len())];
    debug!(
        first,
        second,
        affinity = matrix.get(first, second),
        tied = candidates.len(),
        "pair selected"
    );
    Some((first, second))
}
