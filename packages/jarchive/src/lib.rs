//! Clue Extraction and Sampling over a Game-Show Archive
//!
//! Reads trivia clues out of the archive's episode pages and draws them
//! uniformly at random, skipping the many ids and cells that hold nothing
//! usable.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jarchive::{HttpFetcher, Round, Sampler, SamplerConfig, DEFAULT_BASE_URL};
//!
//! let fetcher = Arc::new(HttpFetcher::new(DEFAULT_BASE_URL)?);
//! let sampler = Sampler::new(fetcher, SamplerConfig::default().with_max_attempts(10));
//!
//! // One clue from anywhere on the board
//! let clue = sampler.sample_clue().await?;
//!
//! // A whole category from the second round
//! let category = sampler.sample_category(Round::Second).await?;
//! ```
//!
//! # Modules
//!
//! - [`extract`] - HTML to record extraction (game pages, archive index)
//! - [`index`] - Known id range and banned ids
//! - [`sampler`] - Retrying sampling engine
//! - [`traits`] - Fetcher abstraction
//! - [`fetchers`] - HTTP and mock fetchers
//! - [`types`] - Records, coordinates and configuration
//! - [`testing`] - Synthetic archive documents

pub mod error;
pub mod extract;
pub mod fetchers;
pub mod index;
pub mod sampler;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    ExtractError, ExtractResult, FetchError, FetchResult, SampleError, SampleResult,
};
pub use extract::{extract_high_water_mark, grid_offset, GameDocument};
pub use fetchers::{HttpFetcher, MockFetcher, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use index::{GameIndex, IndexStats, Watermark};
pub use sampler::Sampler;
pub use traits::fetcher::{DocumentRef, Fetcher};
pub use types::{Category, Clue, Coordinate, Round, Sampled, SamplerConfig, VALUE_STEP};
