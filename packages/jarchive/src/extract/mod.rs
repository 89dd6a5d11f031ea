//! Record extraction from archive documents.
//!
//! Everything here is synchronous: `scraper::Html` is not `Send`, so documents
//! are parsed and read to completion without crossing an `.await`.

pub mod game;
pub mod grid;
pub mod listing;

pub use game::GameDocument;
pub use grid::grid_offset;
pub use listing::extract_high_water_mark;
