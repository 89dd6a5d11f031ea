//! Grid offset arithmetic.
//!
//! A game document lists its clue cells row by row: within a round the
//! category varies fastest and the value slowest, and the second round's 30
//! cells follow the first round's.

use crate::types::Round;

pub const CATEGORIES_PER_ROUND: usize = 6;
pub const VALUES_PER_CATEGORY: usize = 5;
pub const CELLS_PER_ROUND: usize = CATEGORIES_PER_ROUND * VALUES_PER_CATEGORY;

/// Position of a (round, category, value) cell in the document-order list of
/// clue cells. Indices are 1-based; callers validate them through
/// [`Coordinate::new`](crate::types::Coordinate::new).
pub fn grid_offset(round: Round, category: u8, value: u8) -> usize {
    let round = usize::from(round.number()) - 1;
    let category = usize::from(category) - 1;
    let value = usize::from(value) - 1;
    round * CELLS_PER_ROUND + category + value * CATEGORIES_PER_ROUND
}
