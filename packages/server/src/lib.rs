// Trivia Clue Sampler - API Core
//
// This crate serves random clues and categories drawn from the game-show
// archive. Extraction and sampling live in the `jarchive` library; this crate
// adds configuration and the HTTP surface.

pub mod config;
pub mod server;

pub use config::*;
