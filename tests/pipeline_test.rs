//! End-to-end tests of the load, clean, select, exclude and export pipeline.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use anex::cache::CollectionCache;
use anex::config::AnexConfig;
use anex::document::loader::LoadOptions;
use anex::error::Result;
use anex::query::{FilterMode, Pattern, TokenEscaping, build_exclusion_pattern, filter};
use anex::session::ExplorerSession;

const DATASET: &str = "\
label,full_text
1,had a seizure today
2,seizure free for a year
3,my seizure alert dog is the best
4,
5,seizure free for a year
6,nothing to report
7,NaN
8,seizure at work again
9,bad seizure after training
10,fit as a fiddle
";

fn write_dataset(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_open_cleans_dataset() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();

    let (session, counts) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    assert_eq!(counts.rows_before, 10);
    assert_eq!(counts.na_count, 2);
    // rows 2 and 5 differ by label, so nothing is a full-record duplicate
    assert_eq!(counts.duplicate_count, 0);
    assert_eq!(counts.rows_after, 8);
    assert_eq!(session.source().len(), 8);
    Ok(())
}

#[test]
fn test_full_record_duplicates_removed() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "dupes.csv",
        "label,full_text\nx,same text\nx,same text\ny,same text\n",
    );
    let cache = CollectionCache::new();

    let (session, counts) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    assert_eq!(counts.duplicate_count, 1);
    assert_eq!(session.source().rows(), vec![0, 2]);
    Ok(())
}

#[test]
fn test_select_exclude_export() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let (mut session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    let summary = session.set_inclusion_pattern("seizure")?.unwrap();
    assert_eq!(summary.selected, 6);

    let summary = session
        .exclude_words(vec![
            "dog".to_string(),
            "training".to_string(),
            "today".to_string(),
        ])?
        .unwrap();
    assert_eq!(summary.remaining, Some(3));
    assert_eq!(summary.excluded(), 3);

    let destination = dir.path().join("tweets_filtered.csv");
    let report = session.export(&destination)?;
    assert_eq!(report.rows, 3);

    let content = fs::read_to_string(&destination)?;
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("label,full_text"));
    assert_eq!(lines.count(), 3);
    assert!(!content.contains("dog"));
    Ok(())
}

#[test]
fn test_export_refused_without_selection() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let (session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    let destination = dir.path().join("out.csv");
    let err = session.export(&destination).unwrap_err();

    assert!(err.is_precondition());
    assert!(err.to_string().contains("filter on a selection"));
    assert!(!destination.exists());
    Ok(())
}

#[test]
fn test_export_overwrites_existing_file() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let destination = write_dataset(&dir, "out.csv", "stale content\n");
    let cache = CollectionCache::new();
    let (mut session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    session.set_inclusion_pattern("fiddle")?;
    session.export(&destination)?;

    let content = fs::read_to_string(&destination)?;
    assert!(!content.contains("stale"));
    assert_eq!(content.lines().count(), 2);
    Ok(())
}

#[test]
fn test_sessions_share_cache_but_not_state() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let config = AnexConfig::default();

    let (mut first, _) = ExplorerSession::open(&cache, &path, &config)?;
    let (second, _) = ExplorerSession::open(&cache, &path, &config)?;
    assert_eq!(cache.len(), 1);

    first.set_inclusion_pattern("seizure")?;
    first.exclude_words(vec!["dog".to_string()])?;

    assert!(second.summary().is_none());
    assert_eq!(second.source().len(), 8);

    let cached = cache.get_or_load(&path, &LoadOptions::new("full_text"))?;
    assert_eq!(cached.len(), 10);
    Ok(())
}

#[test]
fn test_exclusion_partitions_selection() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let (session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    let selected = filter(
        session.source(),
        &Pattern::new("seizure")?,
        FilterMode::Include,
    );
    let exclusion = build_exclusion_pattern(&["free", "alert"], TokenEscaping::Literal)?;
    let kept = filter(&selected, &exclusion, FilterMode::Exclude);
    let dropped = filter(&selected, &exclusion, FilterMode::Include);

    assert_eq!(kept.len() + dropped.len(), selected.len());

    let mut rows = kept.rows();
    rows.extend(dropped.rows());
    rows.sort_unstable();
    assert_eq!(rows, selected.rows());

    for row in kept.rows() {
        assert!(selected.rows().contains(&row));
    }
    Ok(())
}

#[test]
fn test_token_boundaries() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "words.csv",
        "full_text\nbad\nnot bad\nembadded word\nbad day\nbadly\n",
    );
    let cache = CollectionCache::new();
    let (mut session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    session.set_inclusion_pattern("bad")?;
    session.exclude_words(vec!["bad".to_string()])?;

    let remaining = session.remaining().unwrap();
    let texts: Vec<_> = remaining.texts().flatten().collect();
    assert_eq!(texts, vec!["embadded word", "badly"]);
    Ok(())
}

#[test]
fn test_multi_word_exclusion() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let (mut session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;

    session.set_inclusion_pattern("seizure")?;
    session.set_multi_word(true)?;

    let phrases = session.ngram_candidates()?.unwrap();
    assert!(phrases.contains("free for a"));
    assert!(phrases.contains("seizure alert"));

    let summary = session
        .exclude_phrases(vec!["free for a".to_string()])?
        .unwrap();
    assert_eq!(summary.remaining, Some(4));
    Ok(())
}

#[test]
fn test_raw_escaping_allows_regex_tokens() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let config = AnexConfig {
        token_escaping: TokenEscaping::Raw,
        ..AnexConfig::default()
    };
    let (mut session, _) = ExplorerSession::open(&cache, &path, &config)?;

    session.set_inclusion_pattern("seizure")?;
    let summary = session
        .exclude_words(vec!["(dog|today)".to_string()])?
        .unwrap();
    assert_eq!(summary.remaining, Some(4));
    Ok(())
}

#[test]
fn test_lookup_finds_corpus_misspellings() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        "spelling.csv",
        "full_text\nseizure today\nsiezure again\nseizure free\n",
    );
    let cache = CollectionCache::new();
    let config = AnexConfig::default();
    let (session, _) = ExplorerSession::open(&cache, &path, &config)?;

    let lookup = session.corpus_lookup(config.lookup);
    let response = session.lookup_word(&lookup, "seizure and more");

    assert!(response.input.has_ignored_words());
    assert_eq!(response.candidates, Some(vec!["siezure".to_string()]));

    let response = session.lookup_word(&lookup, &"x".repeat(30));
    assert_eq!(response.candidates, None);
    Ok(())
}

#[test]
fn test_missing_text_column_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let config = AnexConfig {
        text_column: "body".to_string(),
        ..AnexConfig::default()
    };

    let err = ExplorerSession::open(&cache, &path, &config).unwrap_err();
    assert!(err.to_string().contains("body"));
    assert!(cache.is_empty());
}

#[test]
fn test_cached_collection_survives_sessions() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "tweets.csv", DATASET);
    let cache = CollectionCache::new();
    let options = LoadOptions::new("full_text");

    let before = cache.get_or_load(&path, &options)?;
    {
        let (mut session, _) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;
        session.set_inclusion_pattern("seizure")?;
    }
    let after = cache.get_or_load(&path, &options)?;

    assert!(Arc::ptr_eq(&before, &after));
    Ok(())
}

#[test]
fn test_sessions_with_different_markers_do_not_share_parse() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, "markers.csv", "full_text\nNA\nhello\n");
    let cache = CollectionCache::new();

    let (first, counts) = ExplorerSession::open(&cache, &path, &AnexConfig::default())?;
    assert_eq!(first.source().len(), 1);
    assert_eq!(counts.na_count, 1);

    let keep_markers = AnexConfig {
        na_values: Vec::new(),
        ..AnexConfig::default()
    };
    let (second, counts) = ExplorerSession::open(&cache, &path, &keep_markers)?;
    assert_eq!(second.source().len(), 2);
    assert_eq!(counts.na_count, 0);
    assert_eq!(cache.len(), 2);
    Ok(())
}
