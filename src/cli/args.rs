//! Command line argument parsing for the anex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// anex - explore an annotation dataset and export a filtered subset
#[derive(Parser, Debug, Clone)]
#[command(name = "anex")]
#[command(about = "Find mislabeled and misspelled annotations, then export a cleaned subset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AnexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "ANEX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Column holding the annotation text
    #[arg(short = 't', long, global = true)]
    pub text_column: Option<String>,

    /// Dataset encoding (utf8, utf8-lossy, latin1)
    #[arg(short, long, global = true)]
    pub encoding: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AnexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show dataset size, cleaning counts and a sample
    Info(InfoArgs),

    /// Look up misspelling candidates of a word in the dataset
    Lookup(LookupArgs),

    /// List candidate tokens of the records selected by a pattern
    Tokens(TokensArgs),

    /// Select records, exclude tokens and optionally export the result
    Filter(FilterArgs),
}

/// Arguments for dataset information
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Dataset file (CSV with header)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Number of sample rows to show
    #[arg(short, long)]
    pub sample: Option<usize>,

    /// Seed of the sample
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for misspelling lookup
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Dataset file (CSV with header)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Word to look up (only the first word is used)
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Maximum number of candidates
    #[arg(long)]
    pub max_candidates: Option<usize>,
}

/// Arguments for token listing
#[derive(Parser, Debug, Clone)]
pub struct TokensArgs {
    /// Dataset file (CSV with header)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Pattern (regex allowed) selecting the records
    #[arg(short, long)]
    pub select: String,

    /// Also list multi-word tokens
    #[arg(short, long)]
    pub multi_word: bool,

    /// Smallest multi-word token size
    #[arg(long, requires = "multi_word")]
    pub ngram_min: Option<usize>,

    /// Largest multi-word token size
    #[arg(long, requires = "multi_word")]
    pub ngram_max: Option<usize>,
}

/// Arguments for filtering and export
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Dataset file (CSV with header)
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Pattern (regex allowed) selecting the records
    #[arg(short, long)]
    pub select: Option<String>,

    /// Remove records containing this word (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "WORD")]
    pub exclude: Vec<String>,

    /// Remove records containing this word sequence (repeatable)
    #[arg(long = "exclude-phrase", value_name = "PHRASE", requires = "multi_word")]
    pub exclude_phrase: Vec<String>,

    /// Enable filtering on word sequences
    #[arg(short, long)]
    pub multi_word: bool,

    /// Insert excluded tokens into the pattern without escaping
    #[arg(long)]
    pub raw_tokens: bool,

    /// Print the resulting records
    #[arg(long)]
    pub show: bool,

    /// Export the result as CSV
    #[arg(long)]
    pub export: bool,

    /// Export file (default: <dataset name>_filtered.csv in the working directory)
    #[arg(short, long, requires = "export")]
    pub output: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
