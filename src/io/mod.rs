//! I/O module for reading read lengths and writing realized length lists.
//!
//! Input may be a plain list of lengths, FASTQ or FASTA, optionally gzip or
//! BGZF compressed. The format is detected from the first byte of the content.

pub mod fasta;
pub mod fastq;
pub mod plain;
pub mod writer;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Re-export main types
pub use fasta::FastaLengths;
pub use fastq::FastqLengths;
pub use plain::PlainLengths;
pub use writer::LengthWriter;

/// Layout of a read length input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One integer length per line
    PlainLengths,
    Fastq,
    Fasta,
}

impl InputFormat {
    /// Guesses the format from the first byte of the (decompressed) content.
    ///
    /// Empty content is treated as a plain list.
    pub fn detect(head: &[u8]) -> Self {
        match head.first() {
            Some(b'@') => InputFormat::Fastq,
            Some(b'>') => InputFormat::Fasta,
            _ => InputFormat::PlainLengths,
        }
    }
}

/// Streaming reader yielding one length per read, whatever the input format.
pub enum LengthReader {
    PlainLengths(PlainLengths<Box<dyn BufRead>>),
    Fastq(FastqLengths<Box<dyn BufRead>>),
    Fasta(FastaLengths<Box<dyn BufRead>>),
}

impl LengthReader {
    /// Opens a length, FASTQ or FASTA file, compressed or not.
    ///
    /// # Example
    /// ```no_run
    /// use uncontained::io::LengthReader;
    /// use std::path::Path;
    ///
    /// let reader = LengthReader::from_path(Path::new("reads.fastq.gz"))?;
    /// for length in reader {
    ///     println!("{}", length?);
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;

        let mut buffered = BufReader::new(file);
        let reader: Box<dyn BufRead> = if is_gzip_compressed(&mut buffered)? {
            // BGZF is multi-member gzip
            Box::new(BufReader::new(MultiGzDecoder::new(buffered)))
        } else {
            Box::new(buffered)
        };

        Self::from_reader(reader)
            .with_context(|| format!("Failed to read input file: {}", path.display()))
    }

    /// Wraps an already opened, uncompressed stream.
    ///
    /// Leading whitespace is consumed before the format is detected, so every
    /// reader starts on its first record.
    pub fn from_reader(mut reader: Box<dyn BufRead>) -> Result<Self> {
        skip_leading_whitespace(&mut reader)?;
        let head = reader.fill_buf().context("Failed to read input header")?;

        Ok(match InputFormat::detect(head) {
            InputFormat::PlainLengths => LengthReader::PlainLengths(PlainLengths::new(reader)),
            InputFormat::Fastq => LengthReader::Fastq(FastqLengths::new(reader)),
            InputFormat::Fasta => LengthReader::Fasta(FastaLengths::new(reader)),
        })
    }

    pub fn format(&self) -> InputFormat {
        match self {
            LengthReader::PlainLengths(_) => InputFormat::PlainLengths,
            LengthReader::Fastq(_) => InputFormat::Fastq,
            LengthReader::Fasta(_) => InputFormat::Fasta,
        }
    }
}

impl Iterator for LengthReader {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            LengthReader::PlainLengths(r) => r.next(),
            LengthReader::Fastq(r) => r.next(),
            LengthReader::Fasta(r) => r.next(),
        }
    }
}

fn is_gzip_compressed<R: std::io::Read>(reader: &mut BufReader<R>) -> Result<bool> {
    let magic = reader.fill_buf().context("Failed to read input header")?;
    Ok(magic.starts_with(&[0x1f, 0x8b]))
}

fn skip_leading_whitespace<R: BufRead + ?Sized>(reader: &mut R) -> Result<()> {
    loop {
        let buffer = reader.fill_buf().context("Failed to read input header")?;
        if buffer.is_empty() {
            return Ok(());
        }

        let blank = buffer
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        let exhausted = blank == buffer.len();
        reader.consume(blank);
        if !exhausted {
            return Ok(());
        }
    }
}
