//! Core trait abstractions for the sampler.
//!
//! The network sits behind [`fetcher::Fetcher`] so the index and sampling
//! engine can run against canned documents in tests.

pub mod fetcher;
