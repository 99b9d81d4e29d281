//! Exclusion patterns built from user-chosen tokens.
//!
//! Each token becomes one clause that only matches the token as a whole
//! word or phrase: preceded by whitespace or the start of the text, and
//! followed by whitespace or the end of the text. Clauses are joined with
//! `|`, so the pattern matches an annotation containing any chosen token.
//!
//! # Examples
//!
//! ```
//! use anex::query::exclusion::build_exclusion_pattern;
//! use anex::query::exclusion::TokenEscaping;
//!
//! let pattern = build_exclusion_pattern(&["bad", "two words"], TokenEscaping::Literal).unwrap();
//! assert!(pattern.is_match("this is bad"));
//! assert!(pattern.is_match("contains two words here"));
//! assert!(!pattern.is_match("embadded"));
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{AnexError, Result};
use crate::query::pattern::Pattern;

/// How token text is placed into an exclusion clause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenEscaping {
    /// Tokens are escaped and matched character for character.
    #[default]
    Literal,
    /// Tokens are inserted verbatim, so pattern syntax inside a token is
    /// interpreted (`a.b` also matches `axb`, `a(b` is rejected).
    Raw,
}

impl fmt::Display for TokenEscaping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenEscaping::Literal => write!(f, "literal"),
            TokenEscaping::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for TokenEscaping {
    type Err = AnexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "literal" => Ok(TokenEscaping::Literal),
            "raw" => Ok(TokenEscaping::Raw),
            other => Err(AnexError::config(format!(
                "unknown token escaping '{other}' (expected 'literal' or 'raw')"
            ))),
        }
    }
}

/// Clause matching `token` as a whole word or phrase.
pub fn exclusion_clause(token: &str, escaping: TokenEscaping) -> String {
    let body = match escaping {
        TokenEscaping::Literal => regex::escape(token),
        TokenEscaping::Raw => token.to_string(),
    };
    format!(r"(\s|^){body}(\s|$)")
}

/// Build a single pattern matching any text that contains one of `tokens`
/// as a whole word or phrase.
///
/// # Errors
///
/// Returns an error if `tokens` is empty; callers skip the exclusion pass in
/// that case. With [`TokenEscaping::Raw`], a token that breaks the pattern
/// syntax yields a pattern error.
pub fn build_exclusion_pattern<S: AsRef<str>>(
    tokens: &[S],
    escaping: TokenEscaping,
) -> Result<Pattern> {
    if tokens.is_empty() {
        return Err(AnexError::invalid_argument(
            "cannot build an exclusion pattern from an empty token list",
        ));
    }

    let source = tokens
        .iter()
        .map(|t| exclusion_clause(t.as_ref(), escaping))
        .collect::<Vec<_>>()
        .join("|");
    debug!("exclusion pattern over {} tokens: {}", tokens.len(), source);

    Pattern::new(&source)
}
