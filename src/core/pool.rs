use crate::domain::model::{DataItem, MemoryState};
use crate::utils::error::{GameError, Result};
use rand::seq::{index, SliceRandom};
use rand::Rng;

pub struct DataPool;

impl DataPool {
    /// `total_items` distinct items labelled A, B, C, ... in order.
    pub fn generate(total_items: usize) -> Vec<DataItem> {
        (0..total_items)
            .map(|i| DataItem::from_index(i as u16))
            .collect()
    }

    /// Picks `fast_tier_size` distinct items uniformly without replacement.
    /// The fast tier comes back shuffled; the slow-only remainder keeps input order.
    pub fn partition<R: Rng + ?Sized>(
        all_items: &[DataItem],
        fast_tier_size: usize,
        rng: &mut R,
    ) -> Result<MemoryState> {
        if fast_tier_size > all_items.len() {
            return Err(GameError::config(
                "fast_tier_size",
                fast_tier_size,
                format!("cannot exceed the {} available items", all_items.len()),
            ));
        }

        let picked = index::sample(rng, all_items.len(), fast_tier_size);
        let mut in_fast = vec![false; all_items.len()];
        let mut fast_tier = Vec::with_capacity(fast_tier_size);
        for i in picked.iter() {
            in_fast[i] = true;
            fast_tier.push(all_items[i]);
        }
        fast_tier.shuffle(rng);

        let slow_only = all_items
            .iter()
            .zip(&in_fast)
            .filter_map(|(&item, &cached)| (!cached).then_some(item))
            .collect();

        Ok(MemoryState::from_parts(
            all_items.to_vec(),
            fast_tier,
            slow_only,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_is_sequential() {
        let items = DataPool::generate(4);
        let labels: Vec<String> = items.iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
        assert_eq!(DataPool::generate(4), items);
        assert!(DataPool::generate(0).is_empty());
    }

    #[test]
    fn test_partition_invariants_hold_for_many_seeds() {
        let all = DataPool::generate(16);
        let all_set: HashSet<DataItem> = all.iter().copied().collect();

        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let memory = DataPool::partition(&all, 8, &mut rng).unwrap();

            let fast: HashSet<DataItem> = memory.fast_tier().iter().copied().collect();
            let slow: HashSet<DataItem> = memory.slow_only().iter().copied().collect();

            assert_eq!(memory.fast_tier().len(), 8);
            assert_eq!(fast.len(), 8, "fast tier has duplicates");
            assert!(fast.is_disjoint(&slow));
            assert_eq!(fast.union(&slow).copied().collect::<HashSet<_>>(), all_set);
            assert_eq!(memory.all_items(), all.as_slice());
        }
    }

    #[test]
    fn test_partition_is_reproducible_with_seed() {
        let all = DataPool::generate(16);
        let a = DataPool::partition(&all, 8, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = DataPool::partition(&all, 8, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_partition_does_not_always_pick_the_first_items() {
        let all = DataPool::generate(16);
        let first_half: HashSet<DataItem> = all[..8].iter().copied().collect();
        let differs = (0..20).any(|seed| {
            let memory =
                DataPool::partition(&all, 8, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            memory.fast_tier().iter().copied().collect::<HashSet<_>>() != first_half
        });
        assert!(differs);
    }

    #[test]
    fn test_partition_rejects_oversized_fast_tier() {
        let all = DataPool::generate(4);
        let err = DataPool::partition(&all, 5, &mut ChaCha8Rng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, GameError::Config { .. }));
    }
}
