use crate::models::LengthFrequency;
use anyhow::{Result, bail};
use std::collections::BTreeMap;

/// Probability model for a read being contained in another read of the dataset.
///
/// Every read is assumed to be placed independently and uniformly on a genome of
/// `genome_length` bases. A read of length `y` can only contain a read of length
/// `x` when `y >= x`, so shorter reads never contribute to `P(x)`.
///
/// # Boundary behaviour
/// When `1 + y - x` exceeds the genome length the per-read factor
/// `(G - (1 + y - x)) / G` becomes negative. The value is passed through as is,
/// so the resulting "probability" may fall outside `[0, 1]`. Callers can detect
/// this with [`ProbabilityTable::degenerate_lengths`].
#[derive(Debug, Clone, Copy)]
pub struct ContainmentModel {
    genome_length: u64,
}

impl ContainmentModel {
    /// Creates a model for a genome of the given length.
    ///
    /// # Errors
    /// Returns an error if `genome_length` is zero.
    ///
    /// # Example
    /// ```
    /// use uncontained::models::{ContainmentModel, LengthFrequency};
    ///
    /// let table = LengthFrequency::from_lengths([100, 100, 200]);
    /// let probs = ContainmentModel::new(1000).unwrap().compute(&table);
    /// assert_eq!(probs.get(200), Some(1.0));
    /// ```
    pub fn new(genome_length: u64) -> Result<Self> {
        if genome_length == 0 {
            bail!("Genome length must be a positive integer, got 0");
        }
        Ok(Self { genome_length })
    }

    pub fn genome_length(&self) -> u64 {
        self.genome_length
    }

    /// Probability that a read of `length` is not contained in any other read of `table`.
    ///
    /// Longer lengths are visited first; the scan stops at `length` itself, whose
    /// remaining `count - 1` reads are treated as same-length competitors.
    pub fn uncontained_probability(&self, table: &LengthFrequency, length: usize) -> f64 {
        let genome = self.genome_length as f64;
        let mut probability = 1.0;

        for (other, count) in table.iter() {
            if other == length {
                let same_length = count.saturating_sub(1) as f64;
                probability *= ((genome - 1.0) / genome).powf(same_length);
                break;
            }
            if other < length {
                break;
            }
            let span = (1 + other - length) as f64;
            probability *= ((genome - span) / genome).powf(count as f64);
        }

        probability
    }

    /// Computes `P(x)` for every distinct length in `table`.
    pub fn compute(&self, table: &LengthFrequency) -> ProbabilityTable {
        let probabilities = table
            .iter()
            .map(|(length, _)| (length, self.uncontained_probability(table, length)))
            .collect();

        ProbabilityTable { probabilities }
    }
}

/// Per-length uncontained probabilities, keyed by the same lengths as the
/// [`LengthFrequency`] they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    probabilities: BTreeMap<usize, f64>,
}

impl ProbabilityTable {
    pub fn get(&self, length: usize) -> Option<f64> {
        self.probabilities.get(&length).copied()
    }

    /// Iterates `(length, probability)` pairs, longest length first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, f64)> + '_ {
        self.probabilities
            .iter()
            .rev()
            .map(|(&length, &probability)| (length, probability))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Lengths whose value is not a probability, which happens when the genome is
    /// shorter than the spans involved. Longest first.
    pub fn degenerate_lengths(&self) -> Vec<usize> {
        self.iter()
            .filter(|(_, p)| !(0.0..=1.0).contains(p))
            .map(|(length, _)| length)
            .collect()
    }
}
