//! Clue, category and grid coordinate types.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extract::grid::{grid_offset, CATEGORIES_PER_ROUND, VALUES_PER_CATEGORY};

/// Base unit of the displayed dollar value.
pub const VALUE_STEP: u32 = 200;

/// One of the two played rounds of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "Jeopardy")]
    First,
    #[serde(rename = "Double Jeopardy")]
    Second,
}

impl Round {
    pub const ALL: [Round; 2] = [Round::First, Round::Second];

    /// 1 for the first round, 2 for the second.
    pub fn number(self) -> u8 {
        match self {
            Round::First => 1,
            Round::Second => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Round::First),
            2 => Some(Round::Second),
            _ => None,
        }
    }

    /// Either round with equal probability.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Round::First
        } else {
            Round::Second
        }
    }

    /// Display name used in responses.
    pub fn label(self) -> &'static str {
        match self {
            Round::First => "Jeopardy",
            Round::Second => "Double Jeopardy",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of one clue inside a game's grid.
///
/// Categories run 1..=6 and values 1..=5 within a round. The value index is
/// an ordinal position, not a currency amount; see [`Coordinate::displayed_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    round: Round,
    category: u8,
    value: u8,
}

impl Coordinate {
    /// Returns `None` when either index is outside the grid.
    pub fn new(round: Round, category: u8, value: u8) -> Option<Self> {
        let category_ok = (1..=CATEGORIES_PER_ROUND as u8).contains(&category);
        let value_ok = (1..=VALUES_PER_CATEGORY as u8).contains(&value);
        (category_ok && value_ok).then_some(Self {
            round,
            category,
            value,
        })
    }

    /// Uniform category and value within `round`.
    pub fn random<R: Rng>(round: Round, rng: &mut R) -> Self {
        Self {
            round,
            category: rng.random_range(1..=CATEGORIES_PER_ROUND as u8),
            value: rng.random_range(1..=VALUES_PER_CATEGORY as u8),
        }
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn category(&self) -> u8 {
        self.category
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Index of this cell in the document's flattened clue-cell sequence.
    pub fn offset(&self) -> usize {
        grid_offset(self.round, self.category, self.value)
    }

    /// Dollar value shown on the board: `value * 200 * round_number`.
    pub fn displayed_value(&self) -> u32 {
        u32::from(self.value) * VALUE_STEP * u32::from(self.round.number())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {} category {} value {}",
            self.round.number(),
            self.category,
            self.value
        )
    }
}

/// One question/answer unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub category: String,
    pub coordinate: Coordinate,
    pub question: String,
    pub answer: String,
}

impl Clue {
    pub fn round(&self) -> Round {
        self.coordinate.round()
    }

    pub fn displayed_value(&self) -> u32 {
        self.coordinate.displayed_value()
    }
}

/// A full column of five clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub round: Round,
    pub index: u8,
    /// Ordered by value index, always five entries
    pub clues: Vec<Clue>,
}

impl Category {
    pub fn questions(&self) -> Vec<String> {
        self.clues.iter().map(|c| c.question.clone()).collect()
    }

    pub fn answers(&self) -> Vec<String> {
        self.clues.iter().map(|c| c.answer.clone()).collect()
    }
}

/// A sampled record together with the game it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sampled<T> {
    pub game_id: u32,
    /// Air date as printed in the game title
    pub date: String,
    pub record: T,
}
