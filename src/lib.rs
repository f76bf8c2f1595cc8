//! Expected read length distribution of uncontained reads.
//!
//! Given the observed read lengths of a sequencing run and the genome length,
//! estimates for each length the probability that a read is not contained in any
//! other read, then summarizes and realizes the uncontained sub-population.

pub mod cli;
pub mod io;
pub mod models;
pub mod realizer;
pub mod report;
pub mod utils;
