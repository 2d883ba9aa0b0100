//! Rule-based formal-to-slang translation.
//!
//! Used when no trained or hosted model is available. Translation is a pure
//! function of the input and the rule table:
//!
//! 1. Lowercased, trimmed input that exactly matches a known phrase returns
//!    the mapped phrase.
//! 2. Otherwise the first phrase rule (longest key first) found in the input
//!    is applied, and only that one.
//! 3. Whitespace runs collapse to single spaces.
//! 4. If nothing matched, a casual interjection is prepended.

pub mod rules;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use rules::{EXACT_PHRASES, FALLBACK_PREFIX, PHRASE_REPLACEMENTS};

static BUILTIN: LazyLock<Arc<RuleTable>> = LazyLock::new(|| {
    Arc::new(RuleTable::new(
        EXACT_PHRASES.iter().copied(),
        PHRASE_REPLACEMENTS.iter().copied(),
    ))
});

/// A single phrase rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRule {
    pub formal: String,
    pub informal: String,
}

/// Exact-phrase table plus ordered phrase rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    exact: HashMap<String, String>,
    // Sorted by key length, longest first
    phrases: Vec<PhraseRule>,
}

impl RuleTable {
    /// Builds a table. Keys are lowercased; phrase rules are ordered longest
    /// key first, keeping the given order among keys of equal length.
    pub fn new<E, P, S1, S2, S3, S4>(exact: E, phrases: P) -> Self
    where
        E: IntoIterator<Item = (S1, S2)>,
        P: IntoIterator<Item = (S3, S4)>,
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        let exact = exact
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_lowercase(), v.into()))
            .collect();

        let mut phrases: Vec<PhraseRule> = phrases
            .into_iter()
            .map(|(formal, informal)| PhraseRule {
                formal: formal.into().to_lowercase(),
                informal: informal.into(),
            })
            .filter(|rule| !rule.formal.is_empty())
            .collect();
        // Stable sort keeps declaration order for equal lengths
        phrases.sort_by(|a, b| b.formal.len().cmp(&a.formal.len()));

        Self { exact, phrases }
    }

    /// The built-in English rule table.
    pub fn builtin() -> Arc<RuleTable> {
        Arc::clone(&BUILTIN)
    }

    /// Phrase rules in evaluation order.
    pub fn phrase_rules(&self) -> &[PhraseRule] {
        &self.phrases
    }

    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    /// Translates `formal_text`, reporting which rule fired.
    pub fn translate_detailed(&self, formal_text: &str) -> Translation {
        let lowered = formal_text.trim().to_lowercase();

        if let Some(phrase) = self.exact.get(&lowered) {
            return Translation {
                text: phrase.clone(),
                rule: RuleMatch::Exact,
            };
        }

        match self.phrases.iter().find(|rule| lowered.contains(&rule.formal)) {
            Some(rule) => Translation {
                text: collapse_whitespace(&lowered.replace(&rule.formal, &rule.informal)),
                rule: RuleMatch::Phrase(rule.formal.clone()),
            },
            None => Translation {
                text: format!("{FALLBACK_PREFIX}{}", collapse_whitespace(&lowered)),
                rule: RuleMatch::Fallback,
            },
        }
    }

    /// Translates `formal_text` into casual slang.
    pub fn translate(&self, formal_text: &str) -> String {
        self.translate_detailed(formal_text).text
    }
}

/// Which rule produced a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatch {
    /// Whole input matched an exact phrase.
    Exact,
    /// A phrase rule with this key was applied.
    Phrase(String),
    /// No rule matched; the fallback interjection was used.
    Fallback,
}

/// Result of a rule-based translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub rule: RuleMatch,
}

/// Rule-based translator over a shared rule table.
#[derive(Debug, Clone)]
pub struct RuleBasedTranslator {
    rules: Arc<RuleTable>,
}

impl Default for RuleBasedTranslator {
    fn default() -> Self {
        Self::new(RuleTable::builtin())
    }
}

impl RuleBasedTranslator {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn translate(&self, formal_text: &str) -> String {
        self.rules.translate(formal_text)
    }
}

/// Translates with the built-in rule table.
///
/// ```
/// use slangshift::translate::translate;
///
/// assert_eq!(translate("Please wait a moment"), "hang on a sec");
/// ```
pub fn translate(formal_text: &str) -> String {
    BUILTIN.translate(formal_text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(translate("please wait a moment"), "hang on a sec");
        assert_eq!(translate("  Please Wait A Moment "), "hang on a sec");
        assert_eq!(
            translate("I would like to request your assistance"),
            "can you help me out?"
        );
    }

    #[test]
    fn test_longest_substring_rule() {
        let result = BUILTIN.translate_detailed("I would like to request your assistance please");
        assert_eq!(result.text, "i want to request your assistance please");
        assert_eq!(result.rule, RuleMatch::Phrase("i would like to".into()));
    }

    #[test]
    fn test_longer_key_wins() {
        let result = translate("Well, I am pleased to say hello");
        assert_eq!(result, "well, great news! say hello");
    }

    #[test]
    fn test_only_one_rule_applies() {
        // "could you" (9) beats "please" (6); "please" is left alone
        assert_eq!(translate("Could you please call"), "can you please call");
    }

    #[test]
    fn test_all_occurrences_of_chosen_rule() {
        assert_eq!(translate("thank you and thank you"), "thanks and thanks");
    }

    #[test]
    fn test_empty_replacement_collapses_spaces() {
        assert_eq!(translate("Sign here please now"), "sign here now");
    }

    #[test]
    fn test_fallback_prefix() {
        let result = BUILTIN.translate_detailed("The   weather is nice");
        assert_eq!(result.text, "Hey! the weather is nice");
        assert_eq!(result.rule, RuleMatch::Fallback);
    }

    #[test]
    fn test_rules_sorted_longest_first() {
        let table = RuleTable::builtin();
        let lengths: Vec<usize> = table.phrase_rules().iter().map(|r| r.formal.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_equal_length_keeps_declaration_order() {
        let table = RuleTable::new(
            Vec::<(&str, &str)>::new(),
            vec![("abc", "first"), ("xyz", "second"), ("a", "short")],
        );
        assert_eq!(table.translate("xyz abc"), "xyz first");
    }

    #[test]
    fn test_deterministic() {
        let input = "I would like to request your assistance please";
        assert_eq!(translate(input), translate(input));
    }

    #[test]
    fn test_translator_uses_custom_table() {
        let table = Arc::new(RuleTable::new(
            vec![("good day", "g'day")],
            vec![("hello", "yo")],
        ));
        let translator = RuleBasedTranslator::new(table);
        assert_eq!(translator.translate("Good day"), "g'day");
        assert_eq!(translator.translate("hello there"), "yo there");
        assert_eq!(translator.rules().exact_len(), 1);
    }
}
