use crate::io::{InputFormat, LengthReader};
use crate::models::LengthFrequency;
use anyhow::Result;
use std::path::Path;

/// Builds the read length frequency table from an input file.
///
/// # Arguments
/// * `path` - Plain length list, FASTQ or FASTA file, optionally compressed
///
/// # Returns
/// The frequency table and the detected input format
pub fn load_frequencies(path: &Path) -> Result<(LengthFrequency, InputFormat)> {
    let reader = LengthReader::from_path(path)?;
    let format = reader.format();

    let mut table = LengthFrequency::new();
    for length in reader {
        table.add_value(length?);
    }

    Ok((table, format))
}
