//! English contraction tables.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Apostrophe contractions and their expansions.
///
/// Keys are lowercase. Expansions that start with "I" keep the capital since
/// the pronoun is always capitalized.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("can't've", "cannot have"),
    ("'cause", "because"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("couldn't've", "could not have"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hadn't've", "had not have"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'd've", "he would have"),
    ("he'll", "he will"),
    ("he'll've", "he will have"),
    ("he's", "he is"),
    ("how'd", "how did"),
    ("how'd'y", "how do you"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("i'd", "I would"),
    ("i'd've", "I would have"),
    ("i'll", "I will"),
    ("i'll've", "I will have"),
    ("i'm", "I am"),
    ("i've", "I have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'd've", "it would have"),
    ("it'll", "it will"),
    ("it'll've", "it will have"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("ma'am", "madam"),
    ("mayn't", "may not"),
    ("might've", "might have"),
    ("mightn't", "might not"),
    ("mightn't've", "might not have"),
    ("must've", "must have"),
    ("mustn't", "must not"),
    ("mustn't've", "must not have"),
    ("needn't", "need not"),
    ("needn't've", "need not have"),
    ("o'clock", "of the clock"),
    ("oughtn't", "ought not"),
    ("oughtn't've", "ought not have"),
    ("shan't", "shall not"),
    ("sha'n't", "shall not"),
    ("shan't've", "shall not have"),
    ("she'd", "she would"),
    ("she'd've", "she would have"),
    ("she'll", "she will"),
    ("she'll've", "she will have"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("shouldn't've", "should not have"),
    ("so've", "so have"),
    ("so's", "so is"),
    ("that'd", "that would"),
    ("that'd've", "that would have"),
    ("that's", "that is"),
    ("there'd", "there would"),
    ("there'd've", "there would have"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'd've", "they would have"),
    ("they'll", "they will"),
    ("they'll've", "they will have"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("to've", "to have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'd've", "we would have"),
    ("we'll", "we will"),
    ("we'll've", "we will have"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'll", "what will"),
    ("what'll've", "what will have"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("what've", "what have"),
    ("when's", "when is"),
    ("when've", "when have"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("where've", "where have"),
    ("who'll", "who will"),
    ("who'll've", "who will have"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("why's", "why is"),
    ("why've", "why have"),
    ("will've", "will have"),
    ("won't", "will not"),
    ("won't've", "will not have"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("wouldn't've", "would not have"),
    ("y'all", "you all"),
    ("y'all'd", "you all would"),
    ("y'all'd've", "you all would have"),
    ("y'all're", "you all are"),
    ("y'all've", "you all have"),
    ("you'd", "you would"),
    ("you'd've", "you would have"),
    ("you'll", "you will"),
    ("you'll've", "you will have"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Informal spellings that are expanded alongside contractions.
const SLANG_SPELLINGS: &[(&str, &str)] = &[
    ("awesum", "awesome"),
    ("gonna", "going to"),
    ("im", "I am"),
    ("luv", "love"),
];

static STANDARD: LazyLock<ContractionTable> =
    LazyLock::new(|| ContractionTable::from_pairs(CONTRACTIONS.iter().copied()));

static WITH_SLANG: LazyLock<ContractionTable> = LazyLock::new(|| {
    ContractionTable::from_pairs(CONTRACTIONS.iter().chain(SLANG_SPELLINGS).copied())
});

/// Lookup table from lowercase contraction to expansion.
#[derive(Debug, Clone)]
pub struct ContractionTable {
    entries: HashMap<&'static str, &'static str>,
}

impl ContractionTable {
    fn from_pairs(pairs: impl Iterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            entries: pairs.collect(),
        }
    }

    /// Apostrophe contractions only.
    pub fn standard() -> &'static ContractionTable {
        &STANDARD
    }

    /// Apostrophe contractions plus common slang spellings ("gonna", "luv").
    pub fn with_slang_spellings() -> &'static ContractionTable {
        &WITH_SLANG
    }

    /// Looks up a token case-insensitively.
    pub fn get(&self, token: &str) -> Option<&'static str> {
        self.entries
            .get(token)
            .or_else(|| self.entries.get(token.to_lowercase().as_str()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_lowercase() {
        for (key, _) in CONTRACTIONS.iter().chain(SLANG_SPELLINGS) {
            assert_eq!(*key, key.to_lowercase(), "key {key} must be lowercase");
        }
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let table = ContractionTable::standard();
        assert_eq!(table.get("DON'T"), Some("do not"));
        assert_eq!(table.get("I'm"), Some("I am"));
        assert_eq!(table.get("gonna"), None);
    }

    #[test]
    fn test_slang_table_extends_standard() {
        let standard = ContractionTable::standard();
        let slang = ContractionTable::with_slang_spellings();
        assert_eq!(slang.len(), standard.len() + SLANG_SPELLINGS.len());
        assert_eq!(slang.get("gonna"), Some("going to"));
    }
}
