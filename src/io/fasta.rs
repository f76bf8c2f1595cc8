// FASTA read lengths using noodles

use anyhow::{Context, Result};
use noodles::fasta;
use std::io::BufRead;

/// Yields the total sequence length of every FASTA record, summed over all of
/// its sequence lines.
pub struct FastaLengths<R> {
    reader: fasta::io::Reader<R>,
    definition: String,
    sequence: Vec<u8>,
}

impl<R: BufRead> FastaLengths<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: fasta::io::Reader::new(reader),
            definition: String::new(),
            sequence: Vec::new(),
        }
    }

    fn read_length(&mut self) -> Result<Option<usize>> {
        self.definition.clear();
        if self
            .reader
            .read_definition(&mut self.definition)
            .context("Failed to parse FASTA definition")?
            == 0
        {
            return Ok(None);
        }

        self.sequence.clear();
        self.reader
            .read_sequence(&mut self.sequence)
            .with_context(|| format!("Failed to parse FASTA sequence for {}", self.definition))?;

        Ok(Some(self.sequence.len()))
    }
}

impl<R: BufRead> Iterator for FastaLengths<R> {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_length().transpose()
    }
}
