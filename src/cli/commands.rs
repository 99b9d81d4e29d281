//! Command implementations for the anex CLI.

use std::path::{Path, PathBuf};

use log::debug;

use crate::analysis::tokenizer::ngram::NgramRange;
use crate::cache::CollectionCache;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnexConfig;
use crate::document::clean::CleanCounts;
use crate::document::export::default_export_name;
use crate::error::{AnexError, Result};
use crate::query::exclusion::TokenEscaping;
use crate::session::ExplorerSession;

/// Execute a CLI command.
pub fn execute_command(args: AnexArgs) -> Result<()> {
    let config = build_config(&args)?;
    let cache = CollectionCache::new();

    match &args.command {
        Command::Info(info_args) => show_info(info_args, &cache, &config, &args),
        Command::Lookup(lookup_args) => lookup(lookup_args, &cache, &config, &args),
        Command::Tokens(tokens_args) => list_tokens(tokens_args, &cache, &config, &args),
        Command::Filter(filter_args) => filter_dataset(filter_args, &cache, &config, &args),
    }
}

/// Assemble the configuration: file (or defaults), then command line overrides.
pub fn build_config(args: &AnexArgs) -> Result<AnexConfig> {
    let mut config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            AnexConfig::from_file(path)?
        }
        None => AnexConfig::default(),
    };

    if let Some(column) = &args.text_column {
        config.text_column = column.clone();
    }
    if let Some(encoding) = &args.encoding {
        config.encoding = encoding.parse()?;
    }

    match &args.command {
        Command::Lookup(lookup_args) => {
            if let Some(max) = lookup_args.max_candidates {
                config.lookup.max_candidates = max;
            }
        }
        Command::Tokens(tokens_args) => {
            config.ngram_range = NgramRange {
                min: tokens_args.ngram_min.unwrap_or(config.ngram_range.min),
                max: tokens_args.ngram_max.unwrap_or(config.ngram_range.max),
            };
        }
        Command::Filter(filter_args) => {
            if filter_args.raw_tokens {
                config.token_escaping = TokenEscaping::Raw;
            }
        }
        Command::Info(info_args) => {
            if let Some(size) = info_args.sample {
                config.sample_size = size;
            }
            if let Some(seed) = info_args.seed {
                config.sample_seed = seed;
            }
        }
    }

    config.validate()?;
    Ok(config)
}

fn open_session(
    dataset: &Path,
    cache: &CollectionCache,
    config: &AnexConfig,
    cli_args: &AnexArgs,
) -> Result<(ExplorerSession, CleanCounts)> {
    if cli_args.verbosity() > 1 {
        println!("Loading dataset: {}", dataset.display());
    }
    ExplorerSession::open(cache, dataset, config)
}

/// Show dataset size, cleaning counts and a sample.
fn show_info(
    args: &InfoArgs,
    cache: &CollectionCache,
    config: &AnexConfig,
    cli_args: &AnexArgs,
) -> Result<()> {
    let (session, counts) = open_session(&args.dataset, cache, config, cli_args)?;
    let sample = session
        .source()
        .sample(config.sample_size, config.sample_seed);

    output_result(
        "Dataset loaded",
        &DatasetInfo {
            dataset: args.dataset.clone(),
            text_column: config.text_column.clone(),
            clean: counts,
            sample: RowsView::of(&sample),
        },
        cli_args,
    )
}

/// Look up misspelling candidates of a word.
fn lookup(
    args: &LookupArgs,
    cache: &CollectionCache,
    config: &AnexConfig,
    cli_args: &AnexArgs,
) -> Result<()> {
    let (session, _) = open_session(&args.dataset, cache, config, cli_args)?;
    let corpus = session.corpus_lookup(config.lookup);
    debug!("Vocabulary of {} words", corpus.vocabulary().word_count());
    let response = session.lookup_word(&corpus, &args.word);

    output_result(
        "Lookup completed",
        &LookupOutput {
            limit: config.characters_limit,
            response,
        },
        cli_args,
    )
}

/// List the candidate tokens of a selection.
fn list_tokens(
    args: &TokensArgs,
    cache: &CollectionCache,
    config: &AnexConfig,
    cli_args: &AnexArgs,
) -> Result<()> {
    let (mut session, _) = open_session(&args.dataset, cache, config, cli_args)?;
    if args.select.is_empty() {
        return Err(AnexError::invalid_argument("the selection pattern is empty"));
    }

    let summary = session.set_inclusion_pattern(&args.select)?;
    session.set_multi_word(args.multi_word)?;

    let unigrams = session
        .unigram_candidates()
        .map(|tokens| tokens.into_vec())
        .unwrap_or_default();
    let ngrams = session.ngram_candidates()?.map(|tokens| tokens.into_vec());

    output_result(
        "Tokens collected",
        &TokensOutput {
            pattern: args.select.clone(),
            selected: summary.map(|s| s.selected).unwrap_or(0),
            unigrams,
            ngrams,
        },
        cli_args,
    )
}

/// Select records, exclude tokens and optionally export.
fn filter_dataset(
    args: &FilterArgs,
    cache: &CollectionCache,
    config: &AnexConfig,
    cli_args: &AnexArgs,
) -> Result<()> {
    let (mut session, _) = open_session(&args.dataset, cache, config, cli_args)?;

    if let Some(select) = &args.select {
        session.set_inclusion_pattern(select)?;
    }
    session.set_multi_word(args.multi_word)?;

    let has_tokens = !args.exclude.is_empty() || !args.exclude_phrase.is_empty();
    if has_tokens {
        session.exclude_words(args.exclude.clone())?;
        session.exclude_phrases(args.exclude_phrase.clone())?;
    }

    let exported = if args.export {
        let destination = args
            .output
            .clone()
            .unwrap_or_else(|| export_destination(&args.dataset));
        Some(session.export(&destination)?)
    } else {
        None
    };

    let rows = if args.show {
        session.current().map(RowsView::of)
    } else {
        None
    };

    output_result(
        "Filter applied",
        &FilterOutput {
            pattern: session.inclusion_pattern().map(str::to_string),
            excluded_tokens: session.tokens_to_remove(),
            summary: session.summary(),
            exported,
            rows,
        },
        cli_args,
    )
}

/// Default export path: in the working directory, named after the dataset.
fn export_destination(dataset: &Path) -> PathBuf {
    PathBuf::from(default_export_name(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_build_config_overrides() {
        let args = AnexArgs::try_parse_from([
            "anex",
            "-t",
            "body",
            "-e",
            "latin1",
            "filter",
            "tweets.csv",
            "--raw-tokens",
        ])
        .unwrap();

        let config = build_config(&args).unwrap();
        assert_eq!(config.text_column, "body");
        assert_eq!(config.token_escaping, TokenEscaping::Raw);
    }

    #[test]
    fn test_build_config_rejects_bad_range() {
        let args = AnexArgs::try_parse_from([
            "anex",
            "tokens",
            "tweets.csv",
            "-s",
            "fit",
            "-m",
            "--ngram-min",
            "4",
            "--ngram-max",
            "2",
        ])
        .unwrap();

        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_build_config_rejects_unknown_encoding() {
        let args =
            AnexArgs::try_parse_from(["anex", "-e", "ebcdic", "info", "tweets.csv"]).unwrap();
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_export_destination() {
        assert_eq!(
            export_destination(Path::new("data/tweets.csv")),
            PathBuf::from("tweets_filtered.csv")
        );
    }

    #[test]
    fn test_filter_without_selection_refuses_export() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("refused_export.csv");
        std::fs::write(&dataset, "full_text\nhad a seizure\n").unwrap();

        let args = AnexArgs::try_parse_from([
            "anex",
            "-q",
            "filter",
            dataset.to_str().unwrap(),
            "--export",
        ])
        .unwrap();

        let err = execute_command(args).unwrap_err();
        assert!(err.is_precondition());
        assert!(!Path::new("refused_export_filtered.csv").exists());
        assert!(!dir.path().join("refused_export_filtered.csv").exists());
    }
}
