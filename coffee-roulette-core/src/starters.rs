/// Conversation-starter pool: an ordered list of prompts addressed by position.
use std::collections::BTreeSet;

use rand::Rng;

use crate::types::StarterPosition;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StarterPool {
    prompts: Vec<String>,
}

impl StarterPool {
    pub fn new(prompts: Vec<String>) -> Self {
        StarterPool { prompts }
    }

    /// One prompt per line. Blank lines are skipped and surrounding whitespace trimmed.
    pub fn from_lines(text: &str) -> Self {
        StarterPool {
            prompts: text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, position: StarterPosition) -> Option<&str> {
        self.prompts.get(position).map(String::as_str)
    }

    /// Positions used by neither participant.
    pub fn available_for(&self, first: &[StarterPosition], second: &[StarterPosition]) -> Vec<StarterPosition> {
        let used: BTreeSet<StarterPosition> = first.iter().chain(second).copied().collect();
        (0..self.prompts.len()).filter(|p| !used.contains(p)).collect()
    }

    /// Uniformly random unused position, or `None` if the pair has used them all.
    pub fn pick_for(
        &self,
        first: &[StarterPosition],
        second: &[StarterPosition],
        rng: &mut impl Rng,
    ) -> Option<StarterPosition> {
        let available = self.available_for(first, second);
        if available.is_empty() {
            return None;
        }
        Some(available[rng.random_range(0..available.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_lines_skips_blanks() {
        let pool = StarterPool::from_lines("Favourite book?\n\n  Best trip?  \n");
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(1), Some("Best trip?"));
        assert_eq!(pool.get(2), None);
    }

    #[test]
    fn test_available_excludes_both_histories() {
        let pool = StarterPool::from_lines("a\nb\nc\nd\ne");
        assert_eq!(pool.available_for(&[0, 3], &[3, 4]), vec![1, 2]);
    }

    #[test]
    fn test_pick_for_exhausted_pair() {
        let pool = StarterPool::from_lines("a\nb");
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pool.pick_for(&[0], &[1], &mut rng), None);
        assert_eq!(pool.pick_for(&[0], &[], &mut rng), Some(1));
        assert_eq!(StarterPool::default().pick_for(&[], &[], &mut rng), None);
    }
}
