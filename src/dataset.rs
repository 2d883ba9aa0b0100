//! Dataset reading and writing.
//!
//! Input is a CSV file with `formal_text` and `informal_text` columns. The
//! cleaned CSV uses `formal_text_cleaned` / `informal_text_cleaned`, and
//! either naming is accepted on input so the stages can be chained.

use crate::error::{Error, Result};
use crate::format::{format_pair, write_jsonl, TrainingRecord};
use crate::pipeline::Preprocessor;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Column holding the formal sentence.
pub const FORMAL_COLUMN: &str = "formal_text";

/// Column holding the informal sentence.
pub const INFORMAL_COLUMN: &str = "informal_text";

const CLEANED_SUFFIX: &str = "_cleaned";

/// A formal/informal sentence pair.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextRecord {
    pub formal_text: String,
    pub informal_text: String,
}

impl TextRecord {
    pub fn new(formal_text: impl Into<String>, informal_text: impl Into<String>) -> Self {
        Self {
            formal_text: formal_text.into(),
            informal_text: informal_text.into(),
        }
    }
}

#[derive(Serialize)]
struct CleanedRow<'a> {
    formal_text_cleaned: &'a str,
    informal_text_cleaned: &'a str,
}

/// Row counts from a dataset run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetReport {
    /// Rows read from the input.
    pub rows_read: usize,
    /// Rows written to the output.
    pub rows_written: usize,
    /// Rows dropped as empty or too short.
    pub rows_dropped: usize,
}

/// Reads sentence pairs from a CSV file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<TextRecord>> {
    let file = File::open(path.as_ref())?;
    read_records_from_reader(file)
}

/// Reads sentence pairs from any CSV reader.
///
/// Missing cells become empty strings; a missing column is an error.
pub fn read_records_from_reader<R: Read>(reader: R) -> Result<Vec<TextRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let find_column = |name: &str| -> Option<usize> {
        let cleaned = format!("{name}{CLEANED_SUFFIX}");
        headers
            .iter()
            .position(|h| h.trim() == name)
            .or_else(|| headers.iter().position(|h| h.trim() == cleaned))
    };

    let (Some(formal_idx), Some(informal_idx)) =
        (find_column(FORMAL_COLUMN), find_column(INFORMAL_COLUMN))
    else {
        return Err(Error::MissingColumn {
            expected: format!("{FORMAL_COLUMN}', '{INFORMAL_COLUMN}"),
            available: headers
                .iter()
                .map(|h| format!("'{h}'"))
                .collect::<Vec<_>>()
                .join(", "),
        });
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let field = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        records.push(TextRecord {
            formal_text: field(formal_idx),
            informal_text: field(informal_idx),
        });
    }

    debug!("Read {} rows", records.len());
    Ok(records)
}

/// Writes cleaned pairs as CSV with `_cleaned` column names.
pub fn write_cleaned_records<W: Write>(writer: W, records: &[TextRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(CleanedRow {
            formal_text_cleaned: &record.formal_text,
            informal_text_cleaned: &record.informal_text,
        })?;
    }
    if records.is_empty() {
        writer.write_record([
            format!("{FORMAL_COLUMN}{CLEANED_SUFFIX}"),
            format!("{INFORMAL_COLUMN}{CLEANED_SUFFIX}"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Formats pairs into training records, skipping short ones.
pub fn format_records(records: &[TextRecord]) -> Vec<TrainingRecord> {
    records
        .iter()
        .filter_map(|r| format_pair(&r.formal_text, &r.informal_text))
        .collect()
}

/// Cleans a raw CSV and writes the cleaned CSV.
pub fn preprocess_csv(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    preprocessor: &Preprocessor,
) -> Result<DatasetReport> {
    let raw = read_records(input.as_ref())?;
    let cleaned = preprocessor.clean_records(&raw);

    let file = BufWriter::new(File::create(output.as_ref())?);
    write_cleaned_records(file, &cleaned)?;

    let report = DatasetReport {
        rows_read: raw.len(),
        rows_written: cleaned.len(),
        rows_dropped: raw.len() - cleaned.len(),
    };
    info!(
        "Preprocessed {} rows into {} ({} dropped)",
        report.rows_read,
        output.as_ref().display(),
        report.rows_dropped
    );
    Ok(report)
}

/// Formats a CSV of pairs (raw or cleaned) into a JSONL training file.
pub fn format_csv(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<DatasetReport> {
    let records = read_records(input.as_ref())?;
    write_training_file(&records, output.as_ref())
}

/// Cleans a raw CSV and formats it straight into a JSONL training file.
pub fn prepare_dataset(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    preprocessor: &Preprocessor,
) -> Result<DatasetReport> {
    let raw = read_records(input.as_ref())?;
    let cleaned = preprocessor.clean_records(&raw);

    let mut report = write_training_file(&cleaned, output.as_ref())?;
    report.rows_read = raw.len();
    report.rows_dropped = raw.len() - report.rows_written;
    Ok(report)
}

fn write_training_file(records: &[TextRecord], output: &Path) -> Result<DatasetReport> {
    let formatted = format_records(records);

    let file = BufWriter::new(File::create(output)?);
    write_jsonl(file, &formatted)?;

    info!(
        "Formatted {} examples into {}",
        formatted.len(),
        output.display()
    );
    Ok(DatasetReport {
        rows_read: records.len(),
        rows_written: formatted.len(),
        rows_dropped: records.len() - formatted.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::read_jsonl;
    use crate::pipeline::PreprocessOptions;
    use std::io::BufReader;

    const RAW_CSV: &str = "formal_text,informal_text\n\
        \"I'm not sure, to be honest.\",\"idk tbh\"\n\
        Hi.,Yo\n\
        Please wait a moment.,\"hang on a sec!!!!\"\n";

    #[test]
    fn test_read_records() {
        let records = read_records_from_reader(RAW_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].formal_text, "I'm not sure, to be honest.");
        assert_eq!(records[2].informal_text, "hang on a sec!!!!");
    }

    #[test]
    fn test_missing_cells_become_empty() {
        let csv = "formal_text,informal_text\nonly formal\n";
        let records = read_records_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(records, vec![TextRecord::new("only formal", "")]);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let csv = "formal,slang\na,b\n";
        let err = read_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { .. }));
        assert!(err.to_string().contains("'formal', 'slang'"));
    }

    #[test]
    fn test_cleaned_columns_accepted() {
        let records = vec![TextRecord::new("thank you", "thx fam")];
        let mut buffer = Vec::new();
        write_cleaned_records(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("formal_text_cleaned,informal_text_cleaned"));

        let parsed = read_records_from_reader(buffer.as_slice()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_preprocess_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("cleaned.csv");
        std::fs::write(&input, RAW_CSV).unwrap();

        let preprocessor = Preprocessor::new(PreprocessOptions::light());
        let report = preprocess_csv(&input, &output, &preprocessor).unwrap();

        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_written, 2);
        assert_eq!(report.rows_dropped, 1);

        let cleaned = read_records(&output).unwrap();
        assert_eq!(cleaned[0].formal_text, "i am not sure, to be honest.");
        assert_eq!(cleaned[1].informal_text, "hang on a sec!!");
    }

    #[test]
    fn test_prepare_dataset_writes_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("formatted_dataset.jsonl");
        std::fs::write(&input, RAW_CSV).unwrap();

        let preprocessor = Preprocessor::new(PreprocessOptions::light());
        let report = prepare_dataset(&input, &output, &preprocessor).unwrap();
        assert_eq!(report.rows_written, 2);

        let file = BufReader::new(File::open(&output).unwrap());
        let records = read_jsonl(file).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].text.contains("please wait a moment. [/INST] hang on a sec!! </s>"));
    }

    #[test]
    fn test_format_csv_skips_short_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("out.jsonl");
        std::fs::write(&input, RAW_CSV).unwrap();

        let report = format_csv(&input, &output).unwrap();
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_written, 2);
    }
}
