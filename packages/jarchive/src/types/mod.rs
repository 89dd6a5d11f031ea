//! Data types shared across the extractor, index and sampler.

pub mod clue;
pub mod config;

pub use clue::{Category, Clue, Coordinate, Round, Sampled, VALUE_STEP};
pub use config::SamplerConfig;
