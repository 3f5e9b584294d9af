//! Sampling without replacement.

use rand::Rng;

/// Draw `min(n, n_total)` distinct indices from `0..n_total`.
///
/// Uses a partial Fisher-Yates shuffle, so only the first `n` positions are
/// touched. The result is sorted ascending, which keeps gathered rows in their
/// source order.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    n_total: usize,
    n: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = n.min(n_total);
    let mut indices: Vec<usize> = (0..n_total).collect();
    for i in 0..n {
        let j = rng.gen_range(i..n_total);
        indices.swap(i, j);
    }
    indices.truncate(n);
    indices.sort_unstable();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn draws_distinct_sorted_indices() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let sample = sample_without_replacement(100, 10, &mut rng);
        assert_eq!(sample.len(), 10);
        assert!(sample.windows(2).all(|w| w[0] < w[1]));
        assert!(sample.iter().all(|&i| i < 100));
    }

    #[test]
    fn clamps_to_population() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        assert_eq!(sample_without_replacement(4, 10, &mut rng), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_population() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        assert!(sample_without_replacement(0, 3, &mut rng).is_empty());
    }

    #[test]
    fn same_seed_same_sample() {
        let a = sample_without_replacement(50, 5, &mut Xoshiro256PlusPlus::seed_from_u64(1));
        let b = sample_without_replacement(50, 5, &mut Xoshiro256PlusPlus::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
