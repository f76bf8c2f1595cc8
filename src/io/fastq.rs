//! FASTQ read lengths.

use anyhow::Result;
use noodles::fastq;
use std::io::BufRead;

/// Yields the sequence length of every FASTQ record.
pub struct FastqLengths<R> {
    reader: fastq::io::Reader<R>,
    record: fastq::Record,
}

impl<R: BufRead> FastqLengths<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: fastq::io::Reader::new(reader),
            record: fastq::Record::default(),
        }
    }
}

impl<R: BufRead> Iterator for FastqLengths<R> {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(0) => None,
            Ok(_) => Some(Ok(self.record.sequence().len())),
            Err(e) => Some(Err(
                anyhow::Error::new(e).context("Failed to parse FASTQ record")
            )),
        }
    }
}
