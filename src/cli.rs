// Command-line interface definition

use crate::realizer::RealizationMode;
use crate::report::DEFAULT_THRESHOLDS;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "uncontained",
    version,
    about = "Estimate the length distribution of reads not contained in any other read",
    long_about = "Estimate the length distribution of reads not contained in any other read.\n\n\
        INPUT holds one read length (in bp) per line, or reads in FASTQ or FASTA format. \
        OUTPUT receives a sample of non-contained read lengths, one per line. \
        GENOME_LENGTH is the length of the genome in bp."
)]
pub struct Cli {
    /// Read lengths, FASTQ or FASTA file (optionally gzip compressed)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file for the non-contained read lengths
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Genome length in bp
    #[arg(value_name = "GENOME_LENGTH", value_parser = clap::value_parser!(u64).range(1..))]
    pub genome_length: u64,

    /// Sample kept reads at random instead of rounding expected counts
    #[arg(short = 's', long)]
    pub sample: bool,

    /// Random seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Length threshold to report (repeatable, replaces the default set)
    #[arg(short = 't', long = "threshold", value_name = "LENGTH")]
    pub thresholds: Vec<usize>,

    /// Number of compression threads for .gz output (0 = auto-detect)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses arguments, returning `Ok(None)` when positional arguments are
    /// missing or unexpected so the caller can print usage and stop.
    pub fn from_args<I, T>(args: I) -> Result<Option<Self>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(Some(cli)),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::MissingRequiredArgument
                        | ErrorKind::UnknownArgument
                        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Full usage text.
    pub fn usage() -> String {
        Self::command().render_long_help().to_string()
    }

    pub fn mode(&self) -> RealizationMode {
        if self.sample {
            RealizationMode::Sample
        } else {
            RealizationMode::Deterministic
        }
    }

    /// Configured thresholds, or the default set when none were given.
    pub fn thresholds(&self) -> Vec<usize> {
        if self.thresholds.is_empty() {
            DEFAULT_THRESHOLDS.to_vec()
        } else {
            self.thresholds.clone()
        }
    }
}

/// Styled console messages for stderr diagnostics.
pub mod fmt {
    use console::style;
    use std::fmt::Display;

    pub fn header(title: &str) -> String {
        style(format!("=== {} ===", title)).bold().cyan().to_string()
    }

    /// Parameter name left-aligned to `width` columns.
    pub fn param_aligned(name: &str, width: usize) -> String {
        style(format!("{:<width$}", name, width = width)).bold().to_string()
    }

    pub fn progress(message: impl Display) -> String {
        format!("{} {}", style("→").cyan(), message)
    }

    pub fn success(message: impl Display) -> String {
        format!("{} {}", style("✓").green(), message)
    }

    pub fn warning(message: impl Display) -> String {
        format!("{} {}", style("warning:").yellow().bold(), message)
    }
}
