//! Testing utilities: synthetic archive documents.
//!
//! The generated markup follows the live archive's structure closely enough
//! for the extractor to treat it as a real game, including the escaped answer
//! markup inside each clue's `onmouseover` handler.

use std::collections::HashMap;

use crate::extract::grid::{CATEGORIES_PER_ROUND, VALUES_PER_CATEGORY};
use crate::types::{Coordinate, Round};

const DEFAULT_TITLE: &str = "Show #4680 - Monday, January 3, 2005";

#[derive(Debug, Clone)]
enum Cell {
    Revealed { question: String, answer: String },
    Linked { question: String, answer: String },
    Unrevealed,
}

/// Builder for a synthetic two-round game page.
///
/// Every cell starts revealed with text derived from its coordinate, e.g.
/// `"Question 2-3-4"` / `"Answer 2-3-4"` for round 2, category 3, value 4.
///
/// # Example
///
/// ```rust
/// use jarchive::testing::GameFixture;
/// use jarchive::types::{Coordinate, Round};
///
/// let hole = Coordinate::new(Round::First, 1, 5).unwrap();
/// let html = GameFixture::new()
///     .with_title("Show #1 - Friday, September 10, 1984")
///     .with_unrevealed(hole)
///     .to_html();
/// ```
#[derive(Debug, Clone)]
pub struct GameFixture {
    title: String,
    categories: HashMap<(Round, u8), String>,
    cells: HashMap<Coordinate, Cell>,
    omitted: Vec<Round>,
}

impl Default for GameFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFixture {
    /// A fully revealed game.
    pub fn new() -> Self {
        let mut categories = HashMap::new();
        let mut cells = HashMap::new();

        for round in Round::ALL {
            for category in 1..=CATEGORIES_PER_ROUND as u8 {
                categories.insert(
                    (round, category),
                    format!("ROUND {} CATEGORY {}", round.number(), category),
                );
                for value in 1..=VALUES_PER_CATEGORY as u8 {
                    if let Some(at) = Coordinate::new(round, category, value) {
                        let tag = format!("{}-{}-{}", round.number(), category, value);
                        cells.insert(
                            at,
                            Cell::Revealed {
                                question: format!("Question {}", tag),
                                answer: format!("Answer {}", tag),
                            },
                        );
                    }
                }
            }
        }

        Self {
            title: DEFAULT_TITLE.to_string(),
            categories,
            cells,
            omitted: Vec::new(),
        }
    }

    /// Set the game title (`"Show #N - <date>"`).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Rename a category.
    pub fn with_category_name(mut self, round: Round, category: u8, name: impl Into<String>) -> Self {
        self.categories.insert((round, category), name.into());
        self
    }

    /// Replace the text of one clue.
    pub fn with_clue(
        mut self,
        at: Coordinate,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        self.cells.insert(
            at,
            Cell::Revealed {
                question: question.into(),
                answer: answer.into(),
            },
        );
        self
    }

    /// Leave a cell empty, as for a clue that was never revealed on air.
    pub fn with_unrevealed(mut self, at: Coordinate) -> Self {
        self.cells.insert(at, Cell::Unrevealed);
        self
    }

    /// Wrap a clue's question in a media link. The answer stays extractable.
    pub fn with_link_clue(mut self, at: Coordinate) -> Self {
        let (question, answer) = (self.question(at), self.answer(at));
        self.cells.insert(at, Cell::Linked { question, answer });
        self
    }

    /// Drop a whole round from the page.
    pub fn without_round(mut self, round: Round) -> Self {
        self.omitted.push(round);
        self
    }

    pub fn category_name(&self, round: Round, category: u8) -> &str {
        self.categories
            .get(&(round, category))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Question text at a cell; empty for unrevealed cells.
    pub fn question(&self, at: Coordinate) -> String {
        match self.cells.get(&at) {
            Some(Cell::Revealed { question, .. } | Cell::Linked { question, .. }) => {
                question.clone()
            }
            Some(Cell::Unrevealed) | None => String::new(),
        }
    }

    /// Answer text at a cell; empty for unrevealed cells.
    pub fn answer(&self, at: Coordinate) -> String {
        match self.cells.get(&at) {
            Some(Cell::Revealed { answer, .. } | Cell::Linked { answer, .. }) => answer.clone(),
            Some(Cell::Unrevealed) | None => String::new(),
        }
    }

    /// Air date as it appears after the last hyphen of the title.
    pub fn date(&self) -> &str {
        self.title.rsplit('-').next().unwrap_or_default().trim()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html><head><title>J! Archive</title></head><body>\n");
        html.push_str("<div id=\"content\">\n");
        html.push_str(&format!(
            "<div id=\"game_title\"><h1>{}</h1></div>\n",
            escape_html(&self.title)
        ));

        for round in Round::ALL {
            if !self.omitted.contains(&round) {
                html.push_str(&self.round_html(round));
            }
        }

        html.push_str(
            "<div id=\"final_jeopardy_round\">\n<table class=\"final_round\">\n\
             <tr><td class=\"category\"><table><tr><td class=\"category_name\">FINAL CATEGORY</td></tr></table></td></tr>\n\
             <tr><td class=\"clue\"><table><tr><td class=\"clue_text\">Final question</td></tr></table></td></tr>\n\
             </table>\n</div>\n",
        );
        html.push_str("</div>\n</body></html>\n");
        html
    }

    fn round_html(&self, round: Round) -> String {
        let (id, prefix) = match round {
            Round::First => ("jeopardy_round", "J"),
            Round::Second => ("double_jeopardy_round", "DJ"),
        };

        let mut html = format!("<div id=\"{}\">\n<table class=\"round\">\n<tr>\n", id);
        for category in 1..=CATEGORIES_PER_ROUND as u8 {
            html.push_str(&format!(
                "<td class=\"category\"><table>\
                 <tr><td class=\"category_name\">{}</td></tr>\
                 <tr><td class=\"category_comments\"></td></tr>\
                 </table></td>\n",
                escape_html(self.category_name(round, category))
            ));
        }
        html.push_str("</tr>\n");

        for value in 1..=VALUES_PER_CATEGORY as u8 {
            html.push_str("<tr>\n");
            for category in 1..=CATEGORIES_PER_ROUND as u8 {
                let cell = Coordinate::new(round, category, value)
                    .and_then(|at| self.cells.get(&at).map(|cell| (at, cell)));
                match cell {
                    Some((at, cell)) => html.push_str(&cell_html(prefix, at, cell)),
                    None => html.push_str("<td class=\"clue\">\n</td>\n"),
                }
            }
            html.push_str("</tr>\n");
        }

        html.push_str("</table>\n</div>\n");
        html
    }
}

fn cell_html(prefix: &str, at: Coordinate, cell: &Cell) -> String {
    let (question, answer) = match cell {
        Cell::Unrevealed => return "<td class=\"clue\">\n</td>\n".to_string(),
        Cell::Revealed { question, answer } => (escape_html(question), answer),
        Cell::Linked { question, answer } => (
            format!(
                "<a href=\"http://www.j-archive.com/media/{}_{}.jpg\" target=\"_blank\">{}</a>",
                prefix,
                at.offset(),
                escape_html(question)
            ),
            answer,
        ),
    };

    let clue_id = format!("clue_{}_{}_{}", prefix, at.category(), at.value());
    let reveal = format!(
        "toggle('{id}', '{id}_stuck', '<em class=\"correct_response\">{answer}</em>')",
        id = clue_id,
        answer = escape_html(answer)
    );

    format!(
        "<td class=\"clue\">\n<table>\n\
         <tr><td><div onmouseover=\"{reveal}\" onmouseout=\"toggle('{id}', '{id}_stuck', '')\">\
         <table class=\"clue_header\"><tr>\
         <td id=\"{id}_stuck\" class=\"clue_unstuck\">&nbsp;</td>\
         <td class=\"clue_value\">${value}</td>\
         </tr></table></div></td></tr>\n\
         <tr><td id=\"{id}\" class=\"clue_text\">{question}</td></tr>\n\
         </table>\n</td>\n",
        reveal = escape_html(&reveal),
        id = clue_id,
        value = at.displayed_value(),
        question = question
    )
}

/// Archive front page listing the given game ids.
pub fn archive_index_html(ids: &[u32]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html><head><title>J! Archive</title></head><body>\n<div id=\"content\">\n",
    );
    for id in ids {
        html.push_str(&format!(
            "<table class=\"splash_clue\"><tr>\
             <td class=\"splash_clue_footer\">from game \
             <a href=\"showgame.php?game_id={id}\">#{id}</a></td>\
             </tr></table>\n",
            id = id
        ));
    }
    html.push_str("</div>\n</body></html>\n");
    html
}

/// Page the archive serves for an id with no game behind it.
pub fn missing_game_html() -> String {
    "<!DOCTYPE html>\n<html><head><title>J! Archive</title></head><body>\n\
     <div id=\"content\"><p class=\"error\">ERROR: No game found in database.</p></div>\n\
     </body></html>\n"
        .to_string()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
