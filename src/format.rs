//! Instruction formatting for fine-tuning and inference prompts.
//!
//! Training pairs are rendered in the Mistral-instruct template:
//!
//! ```text
//! <s>[INST] Translate the following formal English sentence to informal slang: {formal} [/INST] {informal} </s>
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Sentence-start marker.
pub const BOS: &str = "<s>";

/// Sentence-end marker.
pub const EOS: &str = "</s>";

/// End-of-text marker emitted by GPT-2 style models.
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// Instruction header preceding the formal sentence.
pub const INSTRUCTION: &str = "Translate the following formal English sentence to informal slang:";

/// Minimum trimmed length (in characters) of each side of a pair.
pub const MIN_PAIR_LENGTH: usize = 3;

/// A single instruction-formatted training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub text: String,
}

impl TrainingRecord {
    /// Serializes the record as one JSONL line (without the trailing newline).
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record from one JSONL line.
    pub fn from_json_line(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

/// Wraps a formal/informal pair into a training record.
///
/// Returns `None` when either side, trimmed, is shorter than
/// [`MIN_PAIR_LENGTH`] characters.
///
/// ```
/// use slangshift::format::format_pair;
///
/// assert!(format_pair("Hi.", "Yo").is_none());
/// let record = format_pair("Thank you", "thx bro").unwrap();
/// assert!(record.text.ends_with("thx bro </s>"));
/// ```
pub fn format_pair(formal: &str, informal: &str) -> Option<TrainingRecord> {
    let formal = formal.trim();
    let informal = informal.trim();

    if formal.chars().count() < MIN_PAIR_LENGTH || informal.chars().count() < MIN_PAIR_LENGTH {
        return None;
    }

    Some(TrainingRecord {
        text: format!("{BOS}[INST] {INSTRUCTION} {formal} [/INST] {informal} {EOS}"),
    })
}

/// Builds the instruction prompt used for inference (no answer, no `</s>`).
pub fn instruction_prompt(formal: &str) -> String {
    format!("{BOS}[INST] {INSTRUCTION} {} [/INST]", formal.trim())
}

/// Builds a plain completion prompt for small base models.
pub fn plain_prompt(formal: &str) -> String {
    format!(
        "Translate this formal text to informal slang: {}\nInformal:",
        formal.trim()
    )
}

/// Extracts the model's answer from generated text.
///
/// Strips an echoed prompt, surrounding whitespace, and trailing end markers.
pub fn clean_completion(generated: &str, prompt: &str) -> String {
    let mut text = generated.strip_prefix(prompt).unwrap_or(generated).trim();

    loop {
        let before = text.len();
        for marker in [EOS, END_OF_TEXT] {
            if let Some(stripped) = text.strip_suffix(marker) {
                text = stripped.trim_end();
            }
        }
        if text.len() == before {
            break;
        }
    }

    text.to_string()
}

/// Writes records as JSON Lines.
pub fn write_jsonl<W: Write>(mut writer: W, records: &[TrainingRecord]) -> Result<()> {
    for record in records {
        writeln!(writer, "{}", record.to_json_line()?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads JSON Lines records, skipping blank lines.
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<TrainingRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(TrainingRecord::from_json_line(&line)?);
    }
    Ok(records)
}
