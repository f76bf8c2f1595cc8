use anyhow::{Context, Result};
use std::io::BufRead;

/// Reads one integer length per line. Blank lines are skipped.
pub struct PlainLengths<R> {
    reader: R,
    line: String,
    line_number: usize,
}

impl<R: BufRead> PlainLengths<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }

    fn read_length(&mut self) -> Result<Option<usize>> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_line(&mut self.line)
                .context("Failed to read length list")?;
            if n == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let value = self.line.trim();
            if value.is_empty() {
                continue;
            }

            let length = value.parse::<usize>().with_context(|| {
                format!(
                    "Invalid read length {:?} on line {}",
                    value, self.line_number
                )
            })?;
            return Ok(Some(length));
        }
    }
}

impl<R: BufRead> Iterator for PlainLengths<R> {
    type Item = Result<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_length().transpose()
    }
}
