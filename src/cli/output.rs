//! Output formatting for CLI commands.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::{AnexArgs, OutputFormat};
use crate::document::clean::CleanCounts;
use crate::document::collection::AnnotationCollection;
use crate::error::Result;
use crate::query::filter::FilterSummary;
use crate::session::ExportReport;
use crate::spelling::lookup::{LookupInput, LookupResponse};

/// Rows of a collection, for display.
#[derive(Debug, Serialize)]
pub struct RowsView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RowsView {
    /// Snapshot the rows of `collection`.
    pub fn of(collection: &AnnotationCollection) -> Self {
        RowsView {
            columns: collection.columns().to_vec(),
            rows: collection.iter().map(|r| r.values().to_vec()).collect(),
        }
    }
}

/// Result structure for dataset information.
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub dataset: PathBuf,
    pub text_column: String,
    pub clean: CleanCounts,
    pub sample: RowsView,
}

/// Result structure for misspelling lookup.
#[derive(Debug, Serialize)]
pub struct LookupOutput {
    pub limit: usize,
    #[serde(flatten)]
    pub response: LookupResponse,
}

/// Result structure for token listing.
#[derive(Debug, Serialize)]
pub struct TokensOutput {
    pub pattern: String,
    pub selected: usize,
    pub unigrams: Vec<String>,
    pub ngrams: Option<Vec<String>>,
}

/// Result structure for filtering.
#[derive(Debug, Serialize)]
pub struct FilterOutput {
    pub pattern: Option<String>,
    pub excluded_tokens: Vec<String>,
    pub summary: Option<FilterSummary>,
    pub exported: Option<ExportReport>,
    pub rows: Option<RowsView>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    /// Lines to print.
    fn human_lines(&self) -> Vec<String>;
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &AnexArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &AnexArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    for line in result.human_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &AnexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl HumanOutput for RowsView {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.columns.join(" | "));
        lines.push("─".repeat(lines[0].chars().count().max(3)));
        for row in &self.rows {
            lines.push(row.iter().map(cell).collect::<Vec<_>>().join(" | "));
        }
        lines
    }
}

impl HumanOutput for DatasetInfo {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Dataset path : {} ({} rows)",
                self.dataset.display(),
                self.clean.rows_before
            ),
            format!(
                "Cleaning removed {} missing annotations and {} duplicates.",
                self.clean.na_count, self.clean.duplicate_count
            ),
            format!("{} rows left.", self.clean.rows_after),
            String::new(),
            "Here is a sample :".to_string(),
        ];
        lines.extend(self.sample.human_lines());
        lines
    }
}

impl HumanOutput for LookupOutput {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let (word, ignored) = match &self.response.input {
            LookupInput::Empty => return vec!["Nothing to look up.".to_string()],
            LookupInput::Accepted {
                word,
                ignored_words,
            } => (word, *ignored_words),
            LookupInput::TooLong {
                word,
                ignored_words,
                ..
            } => (word, *ignored_words),
        };

        if ignored > 0 {
            lines.push(format!(
                "Warning ! Several words were typed, only the first one (`{word}`) is considered !"
            ));
        }

        match &self.response.candidates {
            None => lines.push(format!(
                "Warning ! Given word (`{word}`) is too long ! \
                 Word must be under `{}` characters...",
                self.limit
            )),
            Some(candidates) if candidates.is_empty() => lines.push(format!(
                "No misspelled candidate could be found for the word : `{word}`"
            )),
            Some(candidates) => {
                lines.push(
                    "The possible misspelled candidates found in the label dataset are :"
                        .to_string(),
                );
                lines.extend(candidates.iter().map(|c| format!("  {c}")));
            }
        }
        lines
    }
}

impl HumanOutput for TokensOutput {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} label(s) found for `{}`", self.selected, self.pattern),
            String::new(),
            format!("Single-word tokens ({}):", self.unigrams.len()),
        ];
        lines.extend(self.unigrams.iter().map(|t| format!("  {t:?}")));

        if let Some(ngrams) = &self.ngrams {
            lines.push(String::new());
            lines.push(format!("Multi-word tokens ({}):", ngrams.len()));
            lines.extend(ngrams.iter().map(|t| format!("  {t:?}")));
        }
        lines
    }
}

impl HumanOutput for FilterOutput {
    fn human_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match (&self.pattern, &self.summary) {
            (Some(pattern), Some(summary)) => {
                lines.push(format!(
                    "{} label(s) found for `{}`",
                    summary.selected, pattern
                ));
                if let Some(remaining) = summary.remaining {
                    lines.push(format!(
                        "{} label(s) remaining (on {}) after excluding {} token(s)",
                        remaining,
                        summary.selected,
                        self.excluded_tokens.len()
                    ));
                }
            }
            _ => lines.push("No selection pattern given.".to_string()),
        }

        if let Some(rows) = &self.rows {
            lines.push(String::new());
            lines.extend(rows.human_lines());
        }

        if let Some(exported) = &self.exported {
            lines.push(String::new());
            lines.push(format!(
                "Saved ! {} row(s) written to {}",
                exported.rows,
                exported.path.display()
            ));
        }
        lines
    }
}
