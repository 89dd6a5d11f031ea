//! Parsing of a single game document.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::grid::CATEGORIES_PER_ROUND;
use crate::error::{ExtractError, ExtractResult};
use crate::types::{Coordinate, Round};

static FIRST_ROUND: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#jeopardy_round").unwrap());
static SECOND_ROUND: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#double_jeopardy_round").unwrap());
static CATEGORY_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.category_name").unwrap());
static CLUE_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td.clue").unwrap());
static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static EMPHASIS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("em").unwrap());
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div#game_title h1").unwrap());

/// A parsed game page holding both round grids.
///
/// Construction fails with [`ExtractError::GameMissing`] unless both rounds
/// are present, so every accessor can assume a complete two-round game. A page
/// missing either round is treated as malformed in full, whichever round a
/// caller is interested in.
pub struct GameDocument {
    html: Html,
}

impl GameDocument {
    pub fn parse(content: &str) -> ExtractResult<Self> {
        let html = Html::parse_document(content);

        let has_first = html.select(&FIRST_ROUND).next().is_some();
        let has_second = html.select(&SECOND_ROUND).next().is_some();
        if !(has_first && has_second) {
            return Err(ExtractError::GameMissing);
        }

        Ok(Self { html })
    }

    /// The six category names of a round, in board order.
    pub fn categories(&self, round: Round) -> ExtractResult<Vec<String>> {
        let start = (usize::from(round.number()) - 1) * CATEGORIES_PER_ROUND;

        let names: Vec<String> = self
            .html
            .select(&CATEGORY_NAME)
            .skip(start)
            .take(CATEGORIES_PER_ROUND)
            .map(text_of)
            .collect();

        if names.len() < CATEGORIES_PER_ROUND {
            return Err(ExtractError::malformed(format!(
                "expected {} categories for {}, found {}",
                CATEGORIES_PER_ROUND,
                round,
                names.len()
            )));
        }
        Ok(names)
    }

    /// Question and answer text at a grid coordinate, in that order.
    pub fn clue(&self, coordinate: Coordinate) -> ExtractResult<(String, String)> {
        let cell = self
            .html
            .select(&CLUE_CELL)
            .nth(coordinate.offset())
            .ok_or_else(|| {
                ExtractError::malformed(format!("no clue cell for {}", coordinate))
            })?;

        // Unrevealed clues leave an empty (or whitespace-only) cell
        if !cell.children().any(|child| child.value().is_element()) {
            return Err(ExtractError::ClueMissing { coordinate });
        }

        let table = cell
            .select(&TABLE)
            .next()
            .ok_or_else(|| ExtractError::malformed(format!("no clue table at {}", coordinate)))?;
        let rows = child_rows(table);
        let (header, body) = match rows.as_slice() {
            [header, body, ..] => (*header, *body),
            _ => {
                return Err(ExtractError::malformed(format!(
                    "expected two clue rows at {}, found {}",
                    coordinate,
                    rows.len()
                )))
            }
        };

        let question = body
            .select(&CELL)
            .next()
            .ok_or_else(|| ExtractError::malformed(format!("no question at {}", coordinate)))?;
        if question.select(&LINK).next().is_some() {
            return Err(ExtractError::LinkClue { coordinate });
        }

        let answer = header
            .select(&CELL)
            .next()
            .and_then(|td| td.select(&DIV).next())
            .and_then(|div| div.value().attr("onmouseover"))
            .and_then(answer_from_mouseover)
            .ok_or_else(|| ExtractError::malformed(format!("no answer at {}", coordinate)))?;

        Ok((text_of(question), answer))
    }

    /// Air date: whatever follows the last hyphen of the game title.
    pub fn date(&self) -> ExtractResult<String> {
        let title = self
            .html
            .select(&TITLE)
            .next()
            .ok_or_else(|| ExtractError::malformed("no game title"))?;
        let title: String = title.text().collect();

        Ok(title.rsplit('-').next().unwrap_or_default().trim().to_string())
    }
}

/// Pull the answer out of the reveal handler, e.g.
/// `toggle('clue_J_1_1', 'clue_J_1_1_stuck', '<em class="correct_response">Nile</em>')`.
///
/// The third argument is itself markup; the answer is its emphasized text.
fn answer_from_mouseover(handler: &str) -> Option<String> {
    let markup = handler
        .splitn(3, ',')
        .nth(2)?
        .trim_matches(|c| matches!(c, '\'' | ')' | ' '));

    let fragment = Html::parse_fragment(markup);
    let answer = fragment.select(&EMPHASIS).next()?;
    Some(text_of(answer))
}

/// Direct `<tr>` children of a table, looking through the implicit `<tbody>`
/// the HTML parser inserts.
fn child_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|row| row.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{missing_game_html, GameFixture};

    fn coordinate(round: Round, category: u8, value: u8) -> Coordinate {
        Coordinate::new(round, category, value).unwrap()
    }

    #[test]
    fn test_missing_rounds_is_game_missing() {
        assert_eq!(
            GameDocument::parse(&missing_game_html()).err(),
            Some(ExtractError::GameMissing)
        );

        let first_only = GameFixture::new().without_round(Round::Second).to_html();
        assert_eq!(
            GameDocument::parse(&first_only).err(),
            Some(ExtractError::GameMissing)
        );

        let second_only = GameFixture::new().without_round(Round::First).to_html();
        assert_eq!(
            GameDocument::parse(&second_only).err(),
            Some(ExtractError::GameMissing)
        );
    }

    #[test]
    fn test_categories_per_round() {
        let fixture = GameFixture::new();
        let game = GameDocument::parse(&fixture.to_html()).unwrap();

        for round in Round::ALL {
            let names = game.categories(round).unwrap();
            assert_eq!(names.len(), 6);
            for (i, name) in names.iter().enumerate() {
                assert_eq!(name, fixture.category_name(round, i as u8 + 1));
            }
        }
    }

    #[test]
    fn test_final_round_category_is_ignored() {
        let game = GameDocument::parse(&GameFixture::new().to_html()).unwrap();
        let second = game.categories(Round::Second).unwrap();
        assert!(!second.iter().any(|name| name == "FINAL CATEGORY"));
    }

    #[test]
    fn test_every_cell_resolves_to_its_own_clue() {
        let fixture = GameFixture::new();
        let game = GameDocument::parse(&fixture.to_html()).unwrap();

        for round in Round::ALL {
            for category in 1..=6 {
                for value in 1..=5 {
                    let at = coordinate(round, category, value);
                    let (question, answer) = game.clue(at).unwrap();
                    assert_eq!(question, fixture.question(at));
                    assert_eq!(answer, fixture.answer(at));
                }
            }
        }
    }

    #[test]
    fn test_empty_cell_is_clue_missing() {
        let at = coordinate(Round::Second, 4, 2);
        let fixture = GameFixture::new().with_unrevealed(at);
        let game = GameDocument::parse(&fixture.to_html()).unwrap();

        assert_eq!(game.clue(at), Err(ExtractError::ClueMissing { coordinate: at }));
        // Neighbours are untouched
        assert!(game.clue(coordinate(Round::Second, 5, 2)).is_ok());
    }

    #[test]
    fn test_link_in_question_is_link_clue() {
        let at = coordinate(Round::First, 2, 3);
        let fixture = GameFixture::new().with_link_clue(at);
        let game = GameDocument::parse(&fixture.to_html()).unwrap();

        assert_eq!(game.clue(at), Err(ExtractError::LinkClue { coordinate: at }));
    }

    #[test]
    fn test_answer_with_commas_and_markup() {
        let at = coordinate(Round::First, 1, 1);
        let fixture = GameFixture::new().with_clue(
            at,
            "This river, the longest in Africa, flows north",
            "the Nile, of course & more",
        );
        let game = GameDocument::parse(&fixture.to_html()).unwrap();

        let (question, answer) = game.clue(at).unwrap();
        assert_eq!(question, "This river, the longest in Africa, flows north");
        assert_eq!(answer, "the Nile, of course & more");
    }

    #[test]
    fn test_answer_from_mouseover() {
        let handler = r#"toggle('clue_DJ_3_2', 'clue_DJ_3_2_stuck', '<em class="correct_response">Mount Everest</em>')"#;
        assert_eq!(answer_from_mouseover(handler), Some("Mount Everest".to_string()));

        assert_eq!(answer_from_mouseover("toggle('clue_J_1_1')"), None);
        assert_eq!(
            answer_from_mouseover("toggle('a', 'b', 'no emphasis here')"),
            None
        );
    }

    #[test]
    fn test_date_is_text_after_last_hyphen() {
        let fixture = GameFixture::new().with_title("Show #4680 - Monday, January 3, 2005");
        let game = GameDocument::parse(&fixture.to_html()).unwrap();
        assert_eq!(game.date().unwrap(), "Monday, January 3, 2005");

        let fixture = GameFixture::new().with_title("Show #12 - Tournament - Friday, May 1, 1998");
        let game = GameDocument::parse(&fixture.to_html()).unwrap();
        assert_eq!(game.date().unwrap(), "Friday, May 1, 1998");
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let html = GameFixture::new().to_html().replace("game_title", "other_title");
        let game = GameDocument::parse(&html).unwrap();
        assert!(matches!(game.date(), Err(ExtractError::Malformed { .. })));
    }
}
