//! Integration tests for sampling over a mocked archive.
//!
//! These tests go through the public API only:
//! 1. Build an archive out of fixtures
//! 2. Sample concurrently from a shared sampler
//! 3. Check the index and ban set afterwards

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use jarchive::{
    testing::{archive_index_html, missing_game_html, GameFixture},
    Coordinate, DocumentRef, GameIndex, MockFetcher, Round, SampleError, Sampler, SamplerConfig,
};

/// Helper to build an archive of `count` games where every third id has no game.
fn archive(count: u32) -> (MockFetcher, Vec<GameFixture>) {
    let fetcher = MockFetcher::new().with_index(archive_index_html(&[count]));
    let mut fixtures = Vec::new();

    for id in 1..=count {
        let fixture = GameFixture::new()
            .with_title(format!("Show #{} - Wednesday, March {}, 2010", id, id))
            .with_category_name(Round::First, 1, format!("GAME {} OPENER", id));
        if id % 3 == 0 {
            fetcher.add_document(DocumentRef::Game(id), missing_game_html());
        } else {
            fetcher.add_document(DocumentRef::Game(id), fixture.to_html());
        }
        fixtures.push(fixture);
    }

    (fetcher, fixtures)
}

fn sampler_for(fetcher: &MockFetcher, seed: u64) -> Sampler {
    Sampler::new(
        Arc::new(fetcher.clone()),
        SamplerConfig::new().with_max_attempts(40).with_seed(seed),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sampling_refreshes_index_once() {
    let (fetcher, fixtures) = archive(12);
    let sampler = Arc::new(sampler_for(&fetcher, 99));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let sampler = Arc::clone(&sampler);
        handles.push(tokio::spawn(async move { sampler.sample_clue().await }));
    }

    for handle in handles {
        let sampled = handle.await.unwrap().unwrap();
        assert_ne!(sampled.game_id % 3, 0, "sampled a missing game");

        let fixture = &fixtures[(sampled.game_id - 1) as usize];
        let at = sampled.record.coordinate;
        assert_eq!(sampled.record.question, fixture.question(at));
        assert_eq!(sampled.record.answer, fixture.answer(at));
        assert_eq!(sampled.date, format!("Wednesday, March {}, 2010", sampled.game_id));
    }

    assert_eq!(fetcher.calls_for(&DocumentRef::Index), 1);
    assert_eq!(sampler.index().stats().max_known_id, Some(12));
}

#[tokio::test]
async fn test_bans_accumulate_and_are_never_refetched() {
    let (fetcher, _) = archive(9);
    let sampler = sampler_for(&fetcher, 3);

    for _ in 0..60 {
        sampler.sample_category(Round::First).await.unwrap();
    }

    let index = sampler.index();
    let banned: HashSet<u32> = (1..=9).filter(|id| index.is_banned(*id)).collect();
    assert!(banned.iter().all(|id| id % 3 == 0));
    assert_eq!(index.banned_count(), banned.len());

    for id in [3, 6, 9] {
        assert!(fetcher.calls_for(&DocumentRef::Game(id)) <= 1);
    }
}

#[tokio::test]
async fn test_samplers_share_an_index() {
    let (fetcher, _) = archive(6);
    let index = Arc::new(GameIndex::new(Duration::days(1)));

    let first = sampler_for(&fetcher, 1).with_index(Arc::clone(&index));
    let second = sampler_for(&fetcher, 2).with_index(Arc::clone(&index));

    first.sample_clue().await.unwrap();
    second.sample_clue().await.unwrap();

    assert_eq!(fetcher.calls_for(&DocumentRef::Index), 1);
    assert!(Arc::ptr_eq(first.index(), second.index()));
}

#[tokio::test]
async fn test_category_from_named_column() {
    let (fetcher, fixtures) = archive(2);
    let sampler = sampler_for(&fetcher, 77);

    for _ in 0..20 {
        let sampled = sampler.sample_category(Round::First).await.unwrap();
        let category = sampled.record;
        let fixture = &fixtures[(sampled.game_id - 1) as usize];

        assert_eq!(category.name, fixture.category_name(Round::First, category.index));
        let expected: Vec<String> = (1..=5)
            .map(|value| Coordinate::new(Round::First, category.index, value).unwrap())
            .map(|at| fixture.question(at))
            .collect();
        assert_eq!(category.questions(), expected);
    }
}

#[tokio::test]
async fn test_archive_without_games_aborts() {
    let fetcher = MockFetcher::new().with_index(archive_index_html(&[4]));
    for id in 1..=4 {
        fetcher.add_document(DocumentRef::Game(id), missing_game_html());
    }
    let sampler = Sampler::new(
        Arc::new(fetcher.clone()),
        SamplerConfig::new().with_max_attempts(4).with_seed(0),
    );

    let err = sampler.sample_clue().await.unwrap_err();
    assert!(matches!(err, SampleError::Aborted { attempts: 4, .. }));
    assert_eq!(sampler.index().banned_count(), 4);
}
