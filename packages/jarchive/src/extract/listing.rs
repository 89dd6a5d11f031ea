//! Parsing of the archive index page.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::error::{ExtractError, ExtractResult};

static LISTING_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.splash_clue_footer a[href]").unwrap());

/// Largest game id linked from the archive index.
///
/// Each listing entry links to `showgame.php?game_id=<id>`; the id is whatever
/// follows the last `=` of the href. Entries that do not end in a positive
/// number are skipped. An index with no usable entries is a
/// [`ExtractError::ParseFailure`].
pub fn extract_high_water_mark(content: &str) -> ExtractResult<u32> {
    let html = Html::parse_document(content);

    html.select(&LISTING_LINK)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| href.rsplit('=').next()?.trim().parse::<u32>().ok())
        .filter(|id| *id > 0)
        .max()
        .ok_or_else(|| ExtractError::ParseFailure {
            reason: "no game listings on archive index".to_string(),
        })
}
