//! Writing realized read lengths, one integer per line.

use anyhow::{Context, Result};
use noodles::bgzf;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::Path;

/// Writer supporting both uncompressed and BGZF-compressed output.
enum LengthWriterInner {
    Uncompressed(BufWriter<File>),
    Compressed(bgzf::io::MultithreadedWriter<File>),
}

impl LengthWriterInner {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            LengthWriterInner::Uncompressed(w) => w,
            LengthWriterInner::Compressed(w) => w,
        }
    }

    fn finish(self) -> Result<()> {
        match self {
            LengthWriterInner::Uncompressed(mut w) => {
                w.flush().context("Failed to flush uncompressed writer")
            }
            LengthWriterInner::Compressed(mut w) => {
                // Shuts down the worker threads and writes the BGZF EOF block
                w.finish()
                    .map(|_| ())
                    .context("Failed to finish BGZF writer")
            }
        }
    }
}

/// Writer for read length lists.
///
/// Compression is enabled from the file extension (`.gz`, `.bgz` or `.bgzf`).
/// Call [`LengthWriter::finish`] to surface errors from the final flush.
///
/// # Example
/// ```no_run
/// use uncontained::io::LengthWriter;
/// use std::path::Path;
///
/// let mut writer = LengthWriter::new(Path::new("uncontained.txt"), 0)?;
/// writer.write_lengths([5000, 1200, 1200])?;
/// writer.finish()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct LengthWriter {
    writer: LengthWriterInner,
}

impl LengthWriter {
    /// Creates a new writer for the specified path.
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `compression_threads` - Number of compression threads (0 = auto-detect)
    pub fn new(path: &Path, compression_threads: usize) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        let writer = if should_compress(path) {
            let worker_count = match NonZeroUsize::new(compression_threads) {
                Some(n) => n,
                None => std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            };

            LengthWriterInner::Compressed(bgzf::io::MultithreadedWriter::with_worker_count(
                worker_count,
                file,
            ))
        } else {
            LengthWriterInner::Uncompressed(BufWriter::new(file))
        };

        Ok(Self { writer })
    }

    /// Writes a single length on its own line.
    pub fn write_length(&mut self, length: usize) -> Result<()> {
        writeln!(self.writer.writer(), "{}", length).context("Failed to write read length")
    }

    /// Writes every length in order.
    pub fn write_lengths<I: IntoIterator<Item = usize>>(&mut self, lengths: I) -> Result<()> {
        for length in lengths {
            self.write_length(length)?;
        }
        Ok(())
    }

    /// Flushes buffered output and finalizes compression if enabled.
    pub fn finish(self) -> Result<()> {
        self.writer.finish()
    }
}

/// Helper function to check if a file should be compressed based on its extension
fn should_compress(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ["gz", "bgz", "bgzf"]
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}
