//! # slangshift
//!
//! Tools for building a formal-to-slang translation model and serving
//! translations.
//!
//! ## Components
//!
//! - **Normalization**: contraction expansion, case folding, punctuation
//!   removal, emoji textualization and elongation collapsing
//! - **Spelling correction**: optional frequency-based corrector
//! - **Preprocessing**: configurable stage pipeline over CSV datasets
//! - **Formatting**: instruction-style JSONL training records
//! - **Translation**: deterministic rule-based translator
//! - **Service** (`server` feature): lazily loaded backends behind an HTTP API
//!
//! ## Quick Start
//!
//! ```
//! use slangshift::{format_pair, preprocess_text, translate, PreprocessOptions};
//!
//! let cleaned = preprocess_text("I'm sooooo happy!!!", &PreprocessOptions::default());
//! assert_eq!(cleaned, "i am soo happy!!");
//!
//! let record = format_pair("Hello, how are you?", "yo wassup").unwrap();
//! assert!(record.text.starts_with("<s>[INST]"));
//!
//! assert_eq!(translate("please wait a moment"), "hang on a sec");
//! ```
//!
//! ## Features
//!
//! - `server` (default): translation service, hosted model backend and web server

pub mod dataset;
pub mod error;
pub mod format;
pub mod normalize;
pub mod pipeline;
pub mod spelling;
pub mod translate;

#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "server")]
pub mod service;

// Re-exports
pub use dataset::{format_csv, prepare_dataset, preprocess_csv, DatasetReport, TextRecord};
pub use error::{Error, Result};
pub use format::{format_pair, TrainingRecord};
pub use normalize::{
    expand_contractions, handle_emojis, normalize_case, normalize_elongated_words,
    remove_punctuation, ContractionTable,
};
pub use pipeline::{preprocess_text, PreprocessOptions, Preprocessor, Stage};
pub use spelling::{FrequencyCorrector, NoopCorrector, SpellingCorrector};
pub use translate::{translate, RuleBasedTranslator, RuleTable};

#[cfg(feature = "server")]
pub use config::{BackendKind, ServerConfig};

#[cfg(feature = "server")]
pub use service::{TranslationOutcome, TranslationService, Translator, TranslatorLoader};
