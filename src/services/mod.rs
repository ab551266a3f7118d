pub mod analysis;
pub mod providers;
pub mod recommendations;
pub mod scoring;

pub use scoring::{Scorer, ScoringWeights};
