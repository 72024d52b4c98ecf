//! Weighted random seeding.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use super::automaton::CellularError;

/// Create the generator used for random seeding.
///
/// A fixed seed gives a reproducible initial grid; `None` draws from entropy.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Draw an index with probability proportional to its weight.
///
/// Draws `p` uniformly in `[0, sum)` and returns the smallest index whose
/// cumulative weight exceeds `p`. Zero-weight entries are never selected.
pub fn sample_index<R: Rng + ?Sized>(weights: &[u32], rng: &mut R) -> Result<usize, CellularError> {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return Err(CellularError::DegenerateDistribution);
    }

    let p = rng.gen_range(0..total);
    let mut cumulative = 0u64;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += u64::from(weight);
        if cumulative > p {
            return Ok(index);
        }
    }
    unreachable!("draw {} is below the total weight {}", p, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_distribution() {
        let mut rng = seeded_rng(Some(1));
        assert_eq!(sample_index(&[0, 0, 0], &mut rng), Err(CellularError::DegenerateDistribution));
        assert_eq!(sample_index(&[], &mut rng), Err(CellularError::DegenerateDistribution));
    }

    #[test]
    fn test_zero_weights_never_drawn() {
        let mut rng = seeded_rng(Some(7));
        for _ in 0..500 {
            let index = sample_index(&[0, 3, 0, 1], &mut rng).unwrap();
            assert!(index == 1 || index == 3);
        }
    }

    #[test]
    fn test_single_weight_always_drawn() {
        let mut rng = seeded_rng(Some(7));
        for _ in 0..50 {
            assert_eq!(sample_index(&[0, 0, 9], &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_weights_bias_the_draw() {
        let mut rng = seeded_rng(Some(42));
        let mut counts = [0usize; 2];
        for _ in 0..4000 {
            counts[sample_index(&[1, 3], &mut rng).unwrap()] += 1;
        }
        // Expected 1000 / 3000; allow a wide margin.
        assert!(counts[0] > 700 && counts[0] < 1300, "counts: {:?}", counts);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = seeded_rng(Some(99));
        let mut b = seeded_rng(Some(99));
        let draws_a: Vec<_> = (0..20).map(|_| sample_index(&[1, 1, 1], &mut a).unwrap()).collect();
        let draws_b: Vec<_> = (0..20).map(|_| sample_index(&[1, 1, 1], &mut b).unwrap()).collect();
        assert_eq!(draws_a, draws_b);
    }
}
