//! Known range of game ids plus the ids known not to hold a game.
//!
//! The index is the only process-wide mutable state. It is shared behind an
//! `Arc` and synchronises internally:
//!
//! - refreshes are serialised by an async mutex, and a caller that waited
//!   re-checks staleness before fetching
//! - the high-water mark and its timestamp are published together as one
//!   [`Watermark`]
//! - the ban set only grows

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{SampleError, SampleResult};
use crate::extract::extract_high_water_mark;
use crate::traits::fetcher::{DocumentRef, Fetcher};

/// Largest known game id and when it was learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Watermark {
    pub max_known_id: u32,
    pub refreshed_at: DateTime<Utc>,
}

/// Snapshot of the index for health reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub max_known_id: Option<u32>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub banned_games: usize,
}

pub struct GameIndex {
    refresh_interval: Duration,
    refresh_lock: Mutex<()>,
    watermark: RwLock<Option<Watermark>>,
    banned: RwLock<HashSet<u32>>,
}

impl GameIndex {
    pub fn new(refresh_interval: Duration) -> Self {
        Self {
            refresh_interval,
            refresh_lock: Mutex::new(()),
            watermark: RwLock::new(None),
            banned: RwLock::new(HashSet::new()),
        }
    }

    pub fn watermark(&self) -> Option<Watermark> {
        *self.watermark.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Unset, or older than the refresh interval at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.watermark() {
            None => true,
            Some(mark) => now - mark.refreshed_at > self.refresh_interval,
        }
    }

    /// Refetch the archive index if the watermark is stale.
    ///
    /// Returns whether a refresh happened. Fetch and parse failures propagate
    /// and leave the previous watermark in place.
    pub async fn refresh_if_stale(
        &self,
        fetcher: &dyn Fetcher,
        now: DateTime<Utc>,
    ) -> SampleResult<bool> {
        if !self.is_stale(now) {
            return Ok(false);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited
        if !self.is_stale(now) {
            debug!("Index refreshed by a concurrent caller");
            return Ok(false);
        }

        let content = fetcher.fetch(&DocumentRef::Index).await?;
        let max_known_id = extract_high_water_mark(&content)?;

        let mark = Watermark {
            max_known_id,
            refreshed_at: now,
        };
        *self.watermark.write().unwrap_or_else(PoisonError::into_inner) = Some(mark);

        info!(
            max_known_id = max_known_id,
            fetcher = fetcher.name(),
            "Game index refreshed"
        );
        Ok(true)
    }

    /// Mark an id as not holding a game. Returns false if it already was.
    pub fn ban(&self, id: u32) -> bool {
        self.banned
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id)
    }

    pub fn is_banned(&self, id: u32) -> bool {
        self.banned
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }

    pub fn banned_count(&self) -> usize {
        self.banned
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Uniform draw from `1..=max_known_id`, redrawn while banned.
    ///
    /// An unset index, or one whose range is empty, is
    /// [`SampleError::IndexUnset`]. Does not terminate if every id in range is
    /// banned.
    pub fn pick_unbanned_id<R: Rng>(&self, rng: &mut R) -> SampleResult<u32> {
        let max_known_id = self
            .watermark()
            .map(|mark| mark.max_known_id)
            .filter(|max| *max > 0)
            .ok_or(SampleError::IndexUnset)?;

        loop {
            let id = rng.random_range(1..=max_known_id);
            if !self.is_banned(id) {
                return Ok(id);
            }
        }
    }

    pub fn stats(&self) -> IndexStats {
        let mark = self.watermark();
        IndexStats {
            max_known_id: mark.map(|m| m.max_known_id),
            last_refresh: mark.map(|m| m.refreshed_at),
            banned_games: self.banned_count(),
        }
    }
}
