// HTTP routes
pub mod clues;
pub mod health;

pub use clues::*;
pub use health::*;
