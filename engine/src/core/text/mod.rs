//! Text Layout Module
//!
//! Turns raw utterance text into display lines plus a flat, globally indexed
//! word list. The word list is the addressing scheme of karaoke highlighting,
//! so indices stay contiguous in reading order no matter how lines wrap.
//!
//! The same layout feeds the live preview, SRT export and the burn-in script.
//!
//! # Example
//!
//! ```rust,ignore
//! use subcue_lib::core::text::{format_text, FormatOptions};
//!
//! let options = FormatOptions { max_words_per_line: 2, max_lines: 2, ..Default::default() };
//! let display = format_text("one two three four five", &options);
//! assert_eq!(display.lines, vec!["one two", "three four five"]);
//! ```

mod formatter;

pub use formatter::{format_text, FormatOptions, FormattedDisplay, FormattedWord};
