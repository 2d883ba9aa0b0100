//! # Text Normalizer
//!
//! Pure string transforms used by the preprocessing pipeline.
//!
//! - [`expand_contractions`]: "I'm" → "I am", then strip leftover apostrophes
//! - [`normalize_case`]: lowercase everything
//! - [`remove_punctuation`]: drop ASCII punctuation
//! - [`handle_emojis`]: "❤️" → " <red_heart> "
//! - [`normalize_elongated_words`]: "soooo" → "soo"
//!
//! None of these functions fail; the pipeline relies on that.

pub mod contractions;
pub mod emoji;

pub use contractions::ContractionTable;
pub use emoji::handle_emojis;

use regex::{Captures, Regex};
use std::sync::LazyLock;

// Word-like tokens, including embedded and leading apostrophes ("y'all'd've", "'cause")
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w']+").unwrap());

/// Expands contractions found in `table`, preserving the case of the first
/// letter, then deletes every remaining apostrophe.
///
/// ```
/// use slangshift::normalize::{expand_contractions, ContractionTable};
///
/// let text = expand_contractions("I'm happy", ContractionTable::standard());
/// assert_eq!(text, "I am happy");
/// ```
pub fn expand_contractions(text: &str, table: &ContractionTable) -> String {
    let expanded = RE_TOKEN.replace_all(text, |caps: &Captures| {
        let token = &caps[0];
        if let Some(expansion) = table.get(token) {
            return match_first_letter_case(token, expansion);
        }

        // Quoted speech: 'I'm or 'don't'
        let unquoted = token.trim_matches('\'');
        match table.get(unquoted) {
            Some(expansion) if unquoted.len() < token.len() => {
                match_first_letter_case(unquoted, expansion)
            }
            _ => token.to_string(),
        }
    });

    expanded.replace('\'', "")
}

/// Gives `expansion` the case of the first letter of `token`.
fn match_first_letter_case(token: &str, expansion: &str) -> String {
    let Some(source) = token.chars().find(|c| c.is_alphabetic()) else {
        return expansion.to_string();
    };

    let mut chars = expansion.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut result = String::with_capacity(expansion.len());
    if source.is_uppercase() {
        result.extend(first.to_uppercase());
    } else {
        result.extend(first.to_lowercase());
    }
    result.push_str(chars.as_str());
    result
}

/// Lowercases all characters.
pub fn normalize_case(text: &str) -> String {
    text.to_lowercase()
}

/// Deletes every character in the ASCII punctuation set.
pub fn remove_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Collapses any run of 3+ identical characters down to exactly 2.
///
/// Line breaks are never collapsed.
pub fn normalize_elongated_words(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if previous == Some(c) && c != '\n' {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }

        if run <= 2 {
            result.push(c);
        }
    }

    result
}
