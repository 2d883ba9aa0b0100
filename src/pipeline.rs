//! # Preprocessing Pipeline
//!
//! Applies the normalizer stages in a fixed order:
//!
//! 1. **Contractions** - expand contractions, strip leftover apostrophes
//! 2. **Case** - lowercase
//! 3. **Punctuation** - drop ASCII punctuation
//! 4. **Emoji** - replace emoji with ` <name> ` tags
//! 5. **Elongation** - collapse runs of 3+ identical characters to 2
//! 6. **Spelling** - optional statistical correction
//!
//! Options switch stages on and off. They never change the order.

use crate::dataset::TextRecord;
use crate::normalize::{self, ContractionTable};
use crate::spelling::SpellingCorrector;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Default minimum length of a cleaned field.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// A normalization stage, listed in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Contractions,
    Case,
    Punctuation,
    Emoji,
    Elongation,
    Spelling,
}

impl Stage {
    /// Every stage in application order.
    pub const ALL: [Stage; 6] = [
        Stage::Contractions,
        Stage::Case,
        Stage::Punctuation,
        Stage::Emoji,
        Stage::Elongation,
        Stage::Spelling,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Contractions => "contractions",
            Stage::Case => "case",
            Stage::Punctuation => "punctuation",
            Stage::Emoji => "emoji",
            Stage::Elongation => "elongation",
            Stage::Spelling => "spelling",
        };
        f.write_str(name)
    }
}

/// Preprocessing configuration options
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Stage 1: expand contractions
    pub expand_contractions: bool,
    /// Also expand slang spellings ("gonna", "luv") in stage 1
    pub expand_slang_spellings: bool,
    /// Stage 2: lowercase
    pub normalize_case: bool,
    /// Stage 3: remove ASCII punctuation
    pub remove_punctuation: bool,
    /// Stage 4: textualize emoji
    pub handle_emojis: bool,
    /// Stage 5: collapse elongated words
    pub normalize_elongation: bool,
    /// Stage 6: spelling correction (needs a corrector)
    pub correct_spelling: bool,
    /// Rows whose cleaned fields are shorter than this are dropped
    pub min_length: usize,
    /// Clean rows in parallel
    pub parallel: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self::light()
    }
}

impl PreprocessOptions {
    /// Light pipeline: contractions, case, elongation.
    ///
    /// Punctuation and emoji are kept since they carry tone in slang.
    pub fn light() -> Self {
        Self {
            expand_contractions: true,
            expand_slang_spellings: false,
            normalize_case: true,
            remove_punctuation: false,
            handle_emojis: false,
            normalize_elongation: true,
            correct_spelling: false,
            min_length: DEFAULT_MIN_LENGTH,
            parallel: true,
        }
    }

    /// Every stage, including punctuation removal and emoji tags.
    ///
    /// Spelling correction only runs if a corrector is attached.
    pub fn standard() -> Self {
        Self {
            expand_contractions: true,
            expand_slang_spellings: true,
            normalize_case: true,
            remove_punctuation: true,
            handle_emojis: true,
            normalize_elongation: true,
            correct_spelling: true,
            min_length: DEFAULT_MIN_LENGTH,
            parallel: true,
        }
    }

    /// Case folding and elongation only.
    pub fn minimal() -> Self {
        Self {
            expand_contractions: false,
            expand_slang_spellings: false,
            normalize_case: true,
            remove_punctuation: false,
            handle_emojis: false,
            normalize_elongation: true,
            correct_spelling: false,
            min_length: DEFAULT_MIN_LENGTH,
            parallel: true,
        }
    }

    /// Enables exactly the listed stages. Order in `stages` is irrelevant.
    pub fn from_stages(stages: &[Stage]) -> Self {
        let has = |stage| stages.contains(&stage);
        Self {
            expand_contractions: has(Stage::Contractions),
            expand_slang_spellings: false,
            normalize_case: has(Stage::Case),
            remove_punctuation: has(Stage::Punctuation),
            handle_emojis: has(Stage::Emoji),
            normalize_elongation: has(Stage::Elongation),
            correct_spelling: has(Stage::Spelling),
            min_length: DEFAULT_MIN_LENGTH,
            parallel: true,
        }
    }

    /// Enables spelling correction.
    pub fn with_spelling_correction(mut self) -> Self {
        self.correct_spelling = true;
        self
    }

    /// Disables spelling correction.
    pub fn without_spelling_correction(mut self) -> Self {
        self.correct_spelling = false;
        self
    }

    /// Expands slang spellings along with contractions.
    pub fn with_slang_spellings(mut self) -> Self {
        self.expand_slang_spellings = true;
        self
    }

    /// Sets the minimum cleaned field length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Disables parallel row processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Returns the enabled stages in application order.
    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }

    /// Returns true if `stage` is switched on.
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Contractions => self.expand_contractions,
            Stage::Case => self.normalize_case,
            Stage::Punctuation => self.remove_punctuation,
            Stage::Emoji => self.handle_emojis,
            Stage::Elongation => self.normalize_elongation,
            Stage::Spelling => self.correct_spelling,
        }
    }

    fn contraction_table(&self) -> &'static ContractionTable {
        if self.expand_slang_spellings {
            ContractionTable::with_slang_spellings()
        } else {
            ContractionTable::standard()
        }
    }
}

/// Preprocessing pipeline with an optional spelling corrector attached.
#[derive(Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
    corrector: Option<Arc<dyn SpellingCorrector>>,
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessor")
            .field("options", &self.options)
            .field("has_corrector", &self.corrector.is_some())
            .finish()
    }
}

impl Preprocessor {
    pub fn new(options: PreprocessOptions) -> Self {
        Self {
            options,
            corrector: None,
        }
    }

    /// Attaches a spelling corrector used by the spelling stage.
    pub fn with_corrector(mut self, corrector: Arc<dyn SpellingCorrector>) -> Self {
        self.corrector = Some(corrector);
        self
    }

    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Stages that will actually run (spelling needs a corrector).
    pub fn active_stages(&self) -> Vec<Stage> {
        self.options
            .enabled_stages()
            .into_iter()
            .filter(|stage| *stage != Stage::Spelling || self.corrector.is_some())
            .collect()
    }

    /// Runs the enabled stages over `text`.
    pub fn process(&self, text: &str) -> String {
        let options = &self.options;
        let mut result = text.to_string();

        // Stage 1: Contractions
        if options.expand_contractions {
            result = normalize::expand_contractions(&result, options.contraction_table());
        }

        // Stage 2: Case
        if options.normalize_case {
            result = normalize::normalize_case(&result);
        }

        // Stage 3: Punctuation
        if options.remove_punctuation {
            result = normalize::remove_punctuation(&result);
        }

        // Stage 4: Emoji
        if options.handle_emojis {
            result = normalize::handle_emojis(&result);
        }

        // Stage 5: Elongation
        if options.normalize_elongation {
            result = normalize::normalize_elongated_words(&result);
        }

        // Stage 6: Spelling
        if options.correct_spelling {
            if let Some(corrector) = &self.corrector {
                result = corrector.correct(&result);
            }
        }

        result
    }

    /// Processes an optional field; a missing field yields an empty string.
    pub fn process_field(&self, text: Option<&str>) -> String {
        text.map(|t| self.process(t)).unwrap_or_default()
    }

    /// Cleans both sides of a pair, or returns `None` if either cleaned
    /// side is shorter than `min_length` characters after trimming.
    pub fn clean_record(&self, record: &TextRecord) -> Option<TextRecord> {
        let formal = self.process(&record.formal_text);
        let informal = self.process(&record.informal_text);

        let min = self.options.min_length.max(1);
        if formal.trim().chars().count() < min || informal.trim().chars().count() < min {
            debug!(
                "Dropping row: formal={:?} informal={:?}",
                record.formal_text, record.informal_text
            );
            return None;
        }

        Some(TextRecord {
            formal_text: formal,
            informal_text: informal,
        })
    }

    /// Cleans many rows, keeping input order and dropping invalid ones.
    pub fn clean_records(&self, records: &[TextRecord]) -> Vec<TextRecord> {
        if self.options.parallel {
            records
                .par_iter()
                .filter_map(|r| self.clean_record(r))
                .collect()
        } else {
            records.iter().filter_map(|r| self.clean_record(r)).collect()
        }
    }
}

/// Runs the pipeline on `text` without a spelling corrector.
///
/// # Example
///
/// ```
/// use slangshift::pipeline::{preprocess_text, PreprocessOptions};
///
/// let clean = preprocess_text("I'm soooo HAPPY!!!", &PreprocessOptions::standard());
/// assert_eq!(clean, "i am soo happy");
/// ```
pub fn preprocess_text(text: &str, options: &PreprocessOptions) -> String {
    Preprocessor::new(options.clone()).process(text)
}

/// Runs the pipeline with default (light) options.
pub fn preprocess_default(text: &str) -> String {
    preprocess_text(text, &PreprocessOptions::default())
}
