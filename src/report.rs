//! Expected number of uncontained reads below fixed length thresholds.

use crate::models::{LengthFrequency, ProbabilityTable};
use std::fmt;

/// Length cutoffs reported when none are configured.
pub const DEFAULT_THRESHOLDS: [usize; 7] = [500, 1000, 2500, 5000, 10000, 20000, 50000];

/// Aggregate statistics for reads of length `<= threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdStats {
    pub threshold: usize,
    /// Number of reads at or below the threshold
    pub total: usize,
    /// Expected number of those reads that are uncontained
    pub expected: f64,
}

impl ThresholdStats {
    /// Percentage of reads at or below the threshold expected to be uncontained.
    ///
    /// NaN when no read falls under the threshold.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        100.0 * self.expected / self.total as f64
    }
}

impl fmt::Display for ThresholdStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total reads of length <= {}: {}", self.threshold, self.total)?;
        writeln!(
            f,
            "Expected number of uncontained reads of length <= {}: {:.2}",
            self.threshold, self.expected
        )?;

        let percentage = self.percentage();
        if percentage.is_nan() {
            write!(f, "Percentage uncontained: no data")
        } else {
            write!(f, "Percentage uncontained: {:.2}", percentage)
        }
    }
}

/// Computes the statistics for a single threshold.
pub fn threshold_stats(
    table: &LengthFrequency,
    probs: &ProbabilityTable,
    threshold: usize,
) -> ThresholdStats {
    let mut total = 0;
    let mut expected = 0.0;

    for (length, count) in table.iter().filter(|&(length, _)| length <= threshold) {
        total += count;
        expected += count as f64 * probs.get(length).unwrap_or(0.0);
    }

    ThresholdStats {
        threshold,
        total,
        expected,
    }
}

/// Computes the statistics for every threshold, in the order given.
pub fn threshold_report(
    table: &LengthFrequency,
    probs: &ProbabilityTable,
    thresholds: &[usize],
) -> Vec<ThresholdStats> {
    thresholds
        .iter()
        .map(|&threshold| threshold_stats(table, probs, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContainmentModel;

    fn example() -> (LengthFrequency, ProbabilityTable) {
        let table = LengthFrequency::from_lengths([100, 100, 200]);
        let probs = ContainmentModel::new(1000).unwrap().compute(&table);
        (table, probs)
    }

    #[test]
    fn test_threshold_500() {
        let (table, probs) = example();
        let stats = threshold_stats(&table, &probs, 500);

        assert_eq!(stats.total, 3);
        let expected = 1.0 + 2.0 * 0.899 * 0.999;
        assert!((stats.expected - expected).abs() < 1e-12);
        assert!((stats.percentage() - 100.0 * expected / 3.0).abs() < 1e-9);

        let rendered = stats.to_string();
        assert!(rendered.contains("Total reads of length <= 500: 3"));
        assert!(rendered.contains("length <= 500: 2.80"));
        assert!(rendered.contains("Percentage uncontained: 93.21"));
    }

    #[test]
    fn test_threshold_between_lengths() {
        let (table, probs) = example();
        let stats = threshold_stats(&table, &probs, 150);

        assert_eq!(stats.total, 2);
        assert!((stats.expected - 2.0 * 0.899 * 0.999).abs() < 1e-12);
    }

    #[test]
    fn test_largest_threshold_covers_all_reads() {
        let table = LengthFrequency::from_lengths([120, 4000, 4000, 18_000, 49_999, 77]);
        let probs = ContainmentModel::new(5_000_000).unwrap().compute(&table);
        let report = threshold_report(&table, &probs, &DEFAULT_THRESHOLDS);

        assert_eq!(report.len(), DEFAULT_THRESHOLDS.len());
        assert_eq!(report.last().unwrap().total, table.total_count());
        assert!(report.windows(2).all(|w| w[0].total <= w[1].total));
    }

    #[test]
    fn test_empty_input_reports_no_data() {
        let table = LengthFrequency::new();
        let probs = ContainmentModel::new(1000).unwrap().compute(&table);
        let report = threshold_report(&table, &probs, &DEFAULT_THRESHOLDS);

        for stats in report {
            assert_eq!(stats.total, 0);
            assert_eq!(stats.expected, 0.0);
            assert!(stats.percentage().is_nan());
            assert!(stats.to_string().ends_with("Percentage uncontained: no data"));
        }
    }

    #[test]
    fn test_threshold_below_all_reads() {
        let (table, probs) = example();
        let stats = threshold_stats(&table, &probs, 50);
        assert_eq!(stats.total, 0);
        assert!(stats.percentage().is_nan());
    }
}
