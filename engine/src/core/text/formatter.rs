//! Text Formatter
//!
//! Order matters: case transform and punctuation stripping run before
//! tokenization so stripped characters never influence word boundaries.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::captions::StyleConfig;

/// Characters removed when `remove_punctuation` is on
const PUNCTUATION_CLASS: &str = r"[.,/#!$%^&*;:{}=\-_`~()]";

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PUNCTUATION_CLASS).expect("punctuation class is a valid regex"))
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace run is a valid regex"))
}

// =============================================================================
// Options
// =============================================================================

/// The layout-relevant subset of the style
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub all_caps: bool,
    pub remove_punctuation: bool,
    /// Words per line before wrapping (values below 1 are treated as 1)
    pub max_words_per_line: usize,
    /// Line budget; overflow goes onto the last line (values below 1 are treated as 1)
    pub max_lines: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            all_caps: false,
            remove_punctuation: false,
            max_words_per_line: 4,
            max_lines: 3,
        }
    }
}

impl From<&StyleConfig> for FormatOptions {
    fn from(style: &StyleConfig) -> Self {
        Self {
            all_caps: style.all_caps,
            remove_punctuation: style.remove_punctuation,
            max_words_per_line: usize::try_from(style.max_words_per_line.max(1)).unwrap_or(1),
            max_lines: usize::try_from(style.max_lines.max(1)).unwrap_or(1),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// A word with its owning line and its position in reading order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedWord {
    pub text: String,
    pub line_index: usize,
    pub global_index: usize,
}

/// Display lines plus the flat word list they were built from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedDisplay {
    pub lines: Vec<String>,
    pub words: Vec<FormattedWord>,
}

impl FormattedDisplay {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Lays out `text` into display lines.
///
/// Lines hold up to `max_words_per_line` words until `max_lines` is reached;
/// any remaining words are appended to the last line, never dropped.
/// Empty or whitespace-only text yields an empty display.
pub fn format_text(text: &str, options: &FormatOptions) -> FormattedDisplay {
    let prepared = transform(text, options);
    let per_line = options.max_words_per_line.max(1);
    let last_line = options.max_lines.max(1) - 1;

    let mut display = FormattedDisplay::default();
    let mut current: Vec<&str> = Vec::with_capacity(per_line);

    for (global_index, word) in prepared.split_whitespace().enumerate() {
        let line_index = (global_index / per_line).min(last_line);
        if line_index != display.lines.len() {
            display.lines.push(current.join(" "));
            current.clear();
        }
        current.push(word);
        display.words.push(FormattedWord {
            text: word.to_string(),
            line_index,
            global_index,
        });
    }

    if !current.is_empty() {
        display.lines.push(current.join(" "));
    }

    display
}

fn transform(text: &str, options: &FormatOptions) -> String {
    let mut out = if options.all_caps {
        text.to_uppercase()
    } else {
        text.to_string()
    };

    if options.remove_punctuation {
        let stripped = punctuation_re().replace_all(&out, "");
        out = whitespace_run_re().replace_all(&stripped, " ").into_owned();
    }

    out
}

// =============================================================================
// Tests
// =============================================================================
