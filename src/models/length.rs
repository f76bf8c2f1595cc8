use std::collections::BTreeMap;

/// Frequency table of observed read lengths.
///
/// Iteration always runs from the longest length to the shortest, which is the
/// order the containment model depends on.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LengthFrequency {
    length_histogram: BTreeMap<usize, usize>,
    total_count: usize,
}

impl LengthFrequency {
    /// Creates a new empty frequency table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frequency table from a sequence of read lengths.
    pub fn from_lengths<I: IntoIterator<Item = usize>>(lengths: I) -> Self {
        let mut table = Self::new();
        for length in lengths {
            table.add_value(length);
        }
        table
    }

    /// Records one observed read length.
    ///
    /// # Arguments
    /// * `length` - Read length to add
    pub fn add_value(&mut self, length: usize) {
        self.length_histogram
            .entry(length)
            .and_modify(|c| *c += 1)
            .or_insert(1);
        self.total_count += 1;
    }

    /// Number of reads observed with exactly `length`, zero if absent.
    pub fn count(&self, length: usize) -> usize {
        self.length_histogram.get(&length).copied().unwrap_or(0)
    }

    /// Iterates `(length, count)` pairs, longest length first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        self.length_histogram
            .iter()
            .rev()
            .map(|(&length, &count)| (length, count))
    }

    /// Total number of reads recorded.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Number of distinct lengths.
    pub fn num_lengths(&self) -> usize {
        self.length_histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.length_histogram.is_empty()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.length_histogram.keys().next_back().copied()
    }
}

impl FromIterator<usize> for LengthFrequency {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_lengths(iter)
    }
}
