//! Empirical read length model and the containment probabilities derived from it.

pub mod containment;
pub mod length;

pub use containment::{ContainmentModel, ProbabilityTable};
pub use length::LengthFrequency;
