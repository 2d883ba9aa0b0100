//! Optional spelling correction stage.
//!
//! Correction tends to "fix" intentional slang ("luv" → "love"), so the
//! default pipeline leaves it off. When enabled, any [`SpellingCorrector`]
//! can be plugged in; [`FrequencyCorrector`] is a statistical corrector
//! trained on a word-frequency corpus.

use crate::error::Result;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Za-z]+\b").unwrap());

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Best-effort spelling correction.
pub trait SpellingCorrector: Send + Sync {
    /// Returns the corrected text. Implementations must not fail; when in
    /// doubt they return the input unchanged.
    fn correct(&self, text: &str) -> String;
}

/// Corrector that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCorrector;

impl SpellingCorrector for NoopCorrector {
    fn correct(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Word-frequency spelling corrector.
///
/// Each alphabetic word that is not in the vocabulary is replaced by the most
/// frequent known word at edit distance 1, or failing that at edit distance 2.
/// Ties go to the lexicographically smaller word.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCorrector {
    counts: HashMap<String, u64>,
}

impl FrequencyCorrector {
    /// Builds a corrector by counting the words of a plain-text corpus.
    pub fn from_corpus(corpus: &str) -> Self {
        let mut counts = HashMap::new();
        for m in RE_WORD.find_iter(corpus) {
            *counts.entry(m.as_str().to_lowercase()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Builds a corrector from a corpus file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let corpus = std::fs::read_to_string(path)?;
        Ok(Self::from_corpus(&corpus))
    }

    /// Builds a corrector from explicit word counts.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            counts: counts
                .into_iter()
                .map(|(word, count)| (word.into().to_lowercase(), count))
                .collect(),
        }
    }

    /// Number of distinct words in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Corrects a single lowercase word.
    pub fn correct_word(&self, word: &str) -> String {
        if word.is_empty() || self.counts.contains_key(word) {
            return word.to_string();
        }

        let first = edits1(word);
        if let Some(best) = self.best_known(first.iter()) {
            return best;
        }

        // Distance 2: scan the vocabulary
        let chars: Vec<char> = word.chars().collect();
        self.best_known(
            self.counts
                .keys()
                .filter(|known| within_two_edits(&chars, known)),
        )
        .unwrap_or_else(|| word.to_string())
    }

    fn best_known<'a>(&self, candidates: impl Iterator<Item = &'a String>) -> Option<String> {
        candidates
            .filter_map(|w| self.counts.get(w).map(|count| (w, *count)))
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
            .map(|(w, _)| w.clone())
    }
}

impl SpellingCorrector for FrequencyCorrector {
    fn correct(&self, text: &str) -> String {
        if self.counts.is_empty() {
            return text.to_string();
        }

        RE_WORD
            .replace_all(text, |caps: &Captures| {
                let word = &caps[0];
                let corrected = self.correct_word(&word.to_lowercase());
                if word.starts_with(|c: char| c.is_uppercase()) {
                    capitalize(&corrected)
                } else {
                    corrected
                }
            })
            .into_owned()
    }
}

/// All strings one edit away: deletes, transposes, replaces, inserts.
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut edits = HashSet::with_capacity(54 * n + 25);

    for i in 0..=n {
        let (left, right) = chars.split_at(i);

        if !right.is_empty() {
            edits.insert(left.iter().chain(&right[1..]).collect());
        }

        if right.len() > 1 {
            let mut swapped: Vec<char> = chars.clone();
            swapped.swap(i, i + 1);
            edits.insert(swapped.into_iter().collect());
        }

        for c in LETTERS.chars() {
            if !right.is_empty() {
                edits.insert(
                    left.iter()
                        .copied()
                        .chain(std::iter::once(c))
                        .chain(right[1..].iter().copied())
                        .collect(),
                );
            }
            edits.insert(
                left.iter()
                    .copied()
                    .chain(std::iter::once(c))
                    .chain(right.iter().copied())
                    .collect(),
            );
        }
    }

    edits
}

fn within_two_edits(word: &[char], candidate: &str) -> bool {
    if word.len().abs_diff(candidate.chars().count()) > 2 {
        return false;
    }
    let candidate: Vec<char> = candidate.chars().collect();
    osa_distance(word, &candidate) <= 2
}

/// Optimal string alignment distance (edits plus adjacent transpositions).
fn osa_distance(a: &[char], b: &[char]) -> usize {
    let m = b.len();
    let mut before: Vec<usize> = vec![0; m + 1];
    let mut previous: Vec<usize> = (0..=m).collect();
    let mut current: Vec<usize> = vec![0; m + 1];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut distance = (previous[j] + 1)
                .min(current[j - 1] + 1)
                .min(previous[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                distance = distance.min(before[j - 2] + 1);
            }
            current[j] = distance;
        }
        std::mem::swap(&mut before, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    previous[m]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> FrequencyCorrector {
        FrequencyCorrector::from_corpus(
            "the the the quick brown fox jumps over the lazy dog \
             spelling spelling correct corrected awesome love love",
        )
    }

    #[test]
    fn test_known_word_unchanged() {
        assert_eq!(corrector().correct_word("quick"), "quick");
    }

    #[test]
    fn test_edit_distance_one() {
        let c = corrector();
        assert_eq!(c.correct_word("speling"), "spelling");
        assert_eq!(c.correct_word("teh"), "the");
    }

    #[test]
    fn test_edit_distance_two() {
        let c = corrector();
        assert_eq!(c.correct_word("jmp"), "jumps");
        assert_eq!(c.correct_word("luv"), "love");
    }

    #[test]
    fn test_long_unknown_token_kept() {
        let c = corrector();
        let token = "httpswwwexamplecomblogthequickbrownfoxjumpsoverthelazydog";
        assert_eq!(c.correct_word(token), token);
        assert_eq!(c.correct(&format!("see {token} now")), format!("see {token} now"));
    }

    #[test]
    fn test_from_counts_prefers_frequent_word() {
        let c = FrequencyCorrector::from_counts([("Hello", 3), ("help", 10)]);
        assert_eq!(c.vocabulary_size(), 2);
        assert_eq!(c.correct_word("helo"), "help");
        assert_eq!(c.correct_word("hello"), "hello");
    }

    #[test]
    fn test_osa_distance() {
        let d = |a: &str, b: &str| {
            osa_distance(&a.chars().collect::<Vec<_>>(), &b.chars().collect::<Vec<_>>())
        };
        assert_eq!(d("teh", "the"), 1);
        assert_eq!(d("jmp", "jumps"), 2);
        assert_eq!(d("", "abc"), 3);
        assert_eq!(d("kitten", "sitting"), 3);
    }

    #[test]
    fn test_unknown_word_kept() {
        assert_eq!(corrector().correct_word("xyzzyq"), "xyzzyq");
    }

    #[test]
    fn test_correct_text_preserves_layout() {
        let c = corrector();
        assert_eq!(c.correct("Teh  quikc fox!"), "The  quick fox!");
    }

    #[test]
    fn test_correct_skips_tags() {
        let c = corrector();
        assert_eq!(c.correct("the <red_heart> "), "the <red_heart> ");
    }

    #[test]
    fn test_empty_vocabulary_is_passthrough() {
        let c = FrequencyCorrector::default();
        assert_eq!(c.correct("teh"), "teh");
    }

    #[test]
    fn test_noop_corrector() {
        assert_eq!(NoopCorrector.correct("teh"), "teh");
    }
}
