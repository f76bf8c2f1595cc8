use crate::models::{LengthFrequency, ProbabilityTable};
use rand::Rng;
use std::collections::BTreeMap;

/// Strategy for turning per-length probabilities into whole read counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RealizationMode {
    /// One Bernoulli trial per observed read
    Sample,
    /// Round `count * P(x)` to the nearest integer, halves rounding down
    #[default]
    Deterministic,
}

/// Number of reads kept for each observed length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealizedLengths {
    kept: BTreeMap<usize, usize>,
}

impl RealizedLengths {
    /// Kept count for `length`, zero if absent.
    pub fn kept(&self, length: usize) -> usize {
        self.kept.get(&length).copied().unwrap_or(0)
    }

    /// Iterates `(length, kept)` pairs, longest length first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        self.kept.iter().rev().map(|(&length, &kept)| (length, kept))
    }

    pub fn total_kept(&self) -> usize {
        self.kept.values().sum()
    }

    /// Each length repeated by its kept count, longest first.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .flat_map(|(length, kept)| std::iter::repeat_n(length, kept))
    }
}

/// Keeps reads `i` in `0..count` with `i <= probability * count - 0.5`.
pub fn deterministic_kept(count: usize, probability: f64) -> usize {
    let cutoff = probability * count as f64 - 0.5;
    (0..count).filter(|&i| i as f64 <= cutoff).count()
}

/// Runs `count` Bernoulli trials with success probability `probability`.
pub fn sampled_kept<R: Rng>(count: usize, probability: f64, rng: &mut R) -> usize {
    (0..count)
        .filter(|_| rng.random::<f64>() < probability)
        .count()
}

/// Realizes the uncontained sub-population of `table`.
///
/// The random source is only drawn from in [`RealizationMode::Sample`]; lengths
/// are visited longest first so a seeded generator gives reproducible output.
///
/// # Arguments
/// * `table` - Observed read length frequencies
/// * `probs` - Uncontained probabilities computed from `table`
/// * `mode` - Sampling or deterministic rounding
/// * `rng` - Random number generator
pub fn realize<R: Rng>(
    table: &LengthFrequency,
    probs: &ProbabilityTable,
    mode: RealizationMode,
    rng: &mut R,
) -> RealizedLengths {
    let kept = table
        .iter()
        .map(|(length, count)| {
            let probability = probs.get(length).unwrap_or(0.0);
            let kept = match mode {
                RealizationMode::Sample => sampled_kept(count, probability, rng),
                RealizationMode::Deterministic => deterministic_kept(count, probability),
            };
            (length, kept)
        })
        .collect();

    RealizedLengths { kept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContainmentModel;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Replays a fixed cycle of raw outputs.
    struct FixedRng {
        values: Vec<u64>,
        position: usize,
    }

    impl FixedRng {
        fn new(values: Vec<u64>) -> Self {
            Self {
                values,
                position: 0,
            }
        }
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.values[self.position % self.values.len()];
            self.position += 1;
            value
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    fn example() -> (LengthFrequency, ProbabilityTable) {
        let table = LengthFrequency::from_lengths([100, 100, 200]);
        let probs = ContainmentModel::new(1000).unwrap().compute(&table);
        (table, probs)
    }

    #[test]
    fn test_deterministic_rounding() {
        assert_eq!(deterministic_kept(5, 0.5), 3);
        assert_eq!(deterministic_kept(4, 0.5), 2);
        assert_eq!(deterministic_kept(3, 0.0), 0);
        assert_eq!(deterministic_kept(3, 1.0), 3);
        assert_eq!(deterministic_kept(10, 0.26), 3);
        assert_eq!(deterministic_kept(0, 0.9), 0);
    }

    #[test]
    fn test_deterministic_negative_probability_keeps_nothing() {
        assert_eq!(deterministic_kept(4, -2.8), 0);
    }

    #[test]
    fn test_deterministic_realization() {
        let (table, probs) = example();
        let mut rng = StdRng::seed_from_u64(1);
        let realized = realize(&table, &probs, RealizationMode::Deterministic, &mut rng);

        // 2 * 0.898 = 1.796 rounds to 2
        assert_eq!(realized.kept(200), 1);
        assert_eq!(realized.kept(100), 2);
        assert_eq!(realized.lengths().collect::<Vec<_>>(), vec![200, 100, 100]);
        assert_eq!(realized.total_kept(), 3);
    }

    #[test]
    fn test_deterministic_is_reproducible() {
        let table = LengthFrequency::from_lengths(
            (1..=300).map(|i| (i * 37) % 1500 + 1).chain([800; 20]),
        );
        let probs = ContainmentModel::new(3000).unwrap().compute(&table);

        let first = realize(
            &table,
            &probs,
            RealizationMode::Deterministic,
            &mut StdRng::seed_from_u64(1),
        );
        let second = realize(
            &table,
            &probs,
            RealizationMode::Deterministic,
            &mut StdRng::seed_from_u64(2),
        );
        assert_eq!(first, second);
        assert!(first.iter().all(|(length, kept)| kept <= table.count(length)));
    }

    #[test]
    fn test_sample_with_fixed_draws() {
        let (table, probs) = example();

        // Draws of 0.0 are always below a positive probability
        let mut always = FixedRng::new(vec![0]);
        let realized = realize(&table, &probs, RealizationMode::Sample, &mut always);
        assert_eq!(realized.lengths().collect::<Vec<_>>(), vec![200, 100, 100]);

        // Draws just under 1.0 only pass for P(x) == 1
        let mut never = FixedRng::new(vec![u64::MAX]);
        let realized = realize(&table, &probs, RealizationMode::Sample, &mut never);
        assert_eq!(realized.kept(200), 1);
        assert_eq!(realized.kept(100), 0);

        // Alternating draws: 200 takes the first, then 100 gets a miss and a hit
        let mut alternating = FixedRng::new(vec![0, u64::MAX]);
        let realized = realize(&table, &probs, RealizationMode::Sample, &mut alternating);
        assert_eq!(realized.kept(200), 1);
        assert_eq!(realized.kept(100), 1);
    }

    #[test]
    fn test_sample_mean_converges() {
        let (table, probs) = example();
        let mut rng = StdRng::seed_from_u64(42);
        let runs = 20_000;

        let total: usize = (0..runs)
            .map(|_| realize(&table, &probs, RealizationMode::Sample, &mut rng).kept(100))
            .sum();
        let mean = total as f64 / runs as f64;
        let expected = 2.0 * probs.get(100).unwrap();

        assert!((mean - expected).abs() < 0.03, "mean {mean}, expected {expected}");
    }

    #[test]
    fn test_sample_never_exceeds_count() {
        let table = LengthFrequency::from_lengths([10, 10, 10, 20, 30, 30]);
        let probs = ContainmentModel::new(100).unwrap().compute(&table);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let realized = realize(&table, &probs, RealizationMode::Sample, &mut rng);
            assert!(realized.iter().all(|(length, kept)| kept <= table.count(length)));
        }
    }
}
