//! Uniform sampling of clues and categories.
//!
//! Each attempt draws a fresh game id from the [`GameIndex`], fetches the game
//! and reads a record at a fresh random coordinate. Failures that say something
//! about the drawn game or cell (missing game, unrevealed cell, link clue,
//! malformed markup, transport error) move on to the next attempt; anything
//! else is returned immediately. The attempt budget is shared by both sampling
//! paths.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult, SampleError, SampleResult};
use crate::extract::grid::{CATEGORIES_PER_ROUND, VALUES_PER_CATEGORY};
use crate::extract::GameDocument;
use crate::index::GameIndex;
use crate::traits::fetcher::{DocumentRef, Fetcher};
use crate::types::{Category, Clue, Coordinate, Round, Sampled, SamplerConfig};

/// Sampling engine over a fetcher and a shared game index.
///
/// # Example
///
/// ```rust,ignore
/// use jarchive::{HttpFetcher, Sampler, SamplerConfig};
///
/// let fetcher = Arc::new(HttpFetcher::new(DEFAULT_BASE_URL)?);
/// let sampler = Sampler::new(fetcher, SamplerConfig::default());
///
/// let clue = sampler.sample_clue().await?;
/// println!("{}: {}", clue.record.category, clue.record.question);
/// ```
pub struct Sampler {
    fetcher: Arc<dyn Fetcher>,
    index: Arc<GameIndex>,
    rng: Mutex<StdRng>,
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: SamplerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            fetcher,
            index: Arc::new(GameIndex::new(config.refresh_interval)),
            rng: Mutex::new(rng),
            config,
        }
    }

    /// Share an existing index instead of the one created by [`Sampler::new`].
    pub fn with_index(mut self, index: Arc<GameIndex>) -> Self {
        self.index = index;
        self
    }

    pub fn index(&self) -> &Arc<GameIndex> {
        &self.index
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Either round with equal probability, for callers that did not ask for one.
    pub fn random_round(&self) -> Round {
        Round::random(&mut *self.rng())
    }

    /// One clue from a random game at a uniformly random round, category and value.
    pub async fn sample_clue(&self) -> SampleResult<Sampled<Clue>> {
        self.sample("clue", |game, rng| {
            let round = Round::random(rng);
            read_clue(game, Coordinate::random(round, rng))
        })
        .await
    }

    /// All five clues of one random category in `round`.
    ///
    /// A category with any unusable clue is discarded as a whole.
    pub async fn sample_category(&self, round: Round) -> SampleResult<Sampled<Category>> {
        self.sample("category", |game, rng| {
            let index = rng.random_range(1..=CATEGORIES_PER_ROUND as u8);
            read_category(game, round, index)
        })
        .await
    }

    async fn sample<T, F>(&self, kind: &'static str, read: F) -> SampleResult<Sampled<T>>
    where
        F: Fn(&GameDocument, &mut StdRng) -> ExtractResult<T>,
    {
        // Index failures are not part of the attempt budget
        self.index
            .refresh_if_stale(self.fetcher.as_ref(), Utc::now())
            .await?;

        let mut attempt = 0;
        loop {
            attempt += 1;

            let game_id = self.pick_game_id()?;
            let result = match self.fetcher.fetch(&DocumentRef::Game(game_id)).await {
                Ok(content) => self.read_game(game_id, &content, &read),
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(sampled) => {
                    debug!(kind, game_id, attempt, "Sampled record");
                    return Ok(sampled);
                }
                Err(e) if e.is_retryable() => {
                    if attempt >= self.config.max_attempts {
                        warn!(kind, attempts = attempt, error = %e, "Sampling budget exhausted");
                        return Err(SampleError::Aborted {
                            attempts: attempt,
                            last: Box::new(e),
                        });
                    }
                    debug!(kind, game_id, attempt, error = %e, "Sampling attempt failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn pick_game_id(&self) -> SampleResult<u32> {
        self.index.pick_unbanned_id(&mut *self.rng())
    }

    /// Parse a fetched game and read one record from it.
    ///
    /// Kept synchronous: the parsed document must not live across an await.
    fn read_game<T, F>(&self, game_id: u32, content: &str, read: &F) -> SampleResult<Sampled<T>>
    where
        F: Fn(&GameDocument, &mut StdRng) -> ExtractResult<T>,
    {
        let game = match GameDocument::parse(content) {
            Ok(game) => game,
            Err(ExtractError::GameMissing) => {
                if self.index.ban(game_id) {
                    warn!(game_id, "Game missing, banned");
                }
                return Err(ExtractError::GameMissing.into());
            }
            Err(e) => return Err(e.into()),
        };

        let record = read(&game, &mut *self.rng())?;
        let date = game.date()?;

        Ok(Sampled {
            game_id,
            date,
            record,
        })
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn category_name(game: &GameDocument, round: Round, index: u8) -> ExtractResult<String> {
    game.categories(round)?
        .into_iter()
        .nth(usize::from(index) - 1)
        .ok_or_else(|| ExtractError::malformed(format!("no category {} in {}", index, round)))
}

fn read_clue(game: &GameDocument, coordinate: Coordinate) -> ExtractResult<Clue> {
    let category = category_name(game, coordinate.round(), coordinate.category())?;
    let (question, answer) = game.clue(coordinate)?;

    Ok(Clue {
        category,
        coordinate,
        question,
        answer,
    })
}

fn read_category(game: &GameDocument, round: Round, index: u8) -> ExtractResult<Category> {
    let name = category_name(game, round, index)?;

    let clues = (1..=VALUES_PER_CATEGORY as u8)
        .filter_map(|value| Coordinate::new(round, index, value))
        .map(|coordinate| {
            let (question, answer) = game.clue(coordinate)?;
            Ok(Clue {
                category: name.clone(),
                coordinate,
                question,
                answer,
            })
        })
        .collect::<ExtractResult<Vec<_>>>()?;

    Ok(Category {
        name,
        round,
        index,
        clues,
    })
}
