//! Corpus loader
//!
//! Turns a raw byte buffer into a validated corpus:
//! 1. strict UTF-8 decode, falling back to a legacy encoding (GBK by default)
//! 2. record parsing
//! 3. header removal and per-row validation
//! 4. record shaping with sequential ids among the kept rows

use std::borrow::Cow;

use encoding_rs::{Encoding, GBK, UTF_8};
use serde::Serialize;
use thiserror::Error;

use super::models::{Corpus, VocabularyRecord};
use super::parser::{parse_records, Row};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Minimum number of fields for a row to become a record
const MIN_FIELDS: usize = 3;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("The file is empty")]
    Empty,

    #[error("No valid vocabulary rows found ({rejected} rows rejected)")]
    NoValidRows { rejected: usize },

    #[error("Import task failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// Why a data row was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRejection {
    TooFewFields { found: usize },
    EmptyTerm,
}

/// Loader options
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Encoding used when the input is not valid UTF-8
    pub fallback_encoding: &'static Encoding,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fallback_encoding: GBK,
        }
    }
}

impl ImportOptions {
    /// Resolve a WHATWG encoding label ("gbk", "big5", "shift_jis", ...)
    pub fn with_fallback_label(label: &str) -> Self {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => Self {
                fallback_encoding: encoding,
            },
            None => {
                log::warn!("Unknown fallback encoding '{}', using GBK", label);
                Self::default()
            }
        }
    }
}

/// Result of a successful load
#[derive(Debug, Clone)]
pub struct LoadedCorpus {
    pub corpus: Corpus,
    /// Data rows dropped by validation
    pub skipped: usize,
    /// Name of the encoding the text was decoded with
    pub encoding: &'static str,
}

/// Outcome of an import as reported to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ImportStatus {
    Loaded {
        records: usize,
        skipped: usize,
        encoding: String,
    },
    Failed {
        message: String,
    },
}

impl ImportStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Self::Loaded {
                records,
                skipped,
                encoding,
            } => {
                if *skipped > 0 {
                    format!(
                        "Imported {} words ({}), skipped {} invalid rows",
                        records, encoding, skipped
                    )
                } else {
                    format!("Imported {} words ({})", records, encoding)
                }
            }
            Self::Failed { message } => format!("CSV import failed: {}", message),
        }
    }
}

impl From<&Result<LoadedCorpus>> for ImportStatus {
    fn from(result: &Result<LoadedCorpus>) -> Self {
        match result {
            Ok(loaded) => Self::Loaded {
                records: loaded.corpus.len(),
                skipped: loaded.skipped,
                encoding: loaded.encoding.to_string(),
            },
            Err(e) => Self::Failed {
                message: e.to_string(),
            },
        }
    }
}

/// Validated row fields, not yet numbered
struct RecordFields {
    term: String,
    phonetic: String,
    definition: String,
    example_sentence: String,
    frequency: u64,
}

impl RecordFields {
    fn into_record(self, id: usize) -> VocabularyRecord {
        let mut record = VocabularyRecord::new(id, self.term);
        record.phonetic = self.phonetic;
        record.definition = self.definition;
        record.example_sentence = self.example_sentence;
        record.frequency = self.frequency;
        record
    }
}

/// Decode bytes as strict UTF-8, or with the fallback encoding if that fails
fn decode<'a>(bytes: &'a [u8], options: &ImportOptions) -> (Cow<'a, str>, &'static Encoding) {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        return (text, UTF_8);
    }

    let fallback = options.fallback_encoding;
    log::debug!("Input is not valid UTF-8, decoding as {}", fallback.name());
    let (text, had_errors) = fallback.decode_without_bom_handling(bytes);
    if had_errors {
        log::warn!(
            "Input contained sequences invalid in {}; they were replaced",
            fallback.name()
        );
    }
    (text, fallback)
}

/// Replace the literal two-character escape `\n` with a line break
fn unescape_newlines(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Parse a frequency the lenient way: leading digits, anything else is 0
/// "1500" -> 1500, "1500.5" -> 1500, "abc" -> 0, "-3" -> 0
fn parse_frequency(value: &str) -> u64 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Validate one data row
fn validate_row(mut row: Row) -> std::result::Result<RecordFields, RowRejection> {
    if row.len() < MIN_FIELDS {
        return Err(RowRejection::TooFewFields { found: row.len() });
    }
    if row[0].is_empty() {
        return Err(RowRejection::EmptyTerm);
    }

    let frequency = row.get(4).map(|f| parse_frequency(f)).unwrap_or(0);
    let example_sentence = row.get(3).map(|s| unescape_newlines(s)).unwrap_or_default();
    let definition = unescape_newlines(&row[2]);
    let phonetic = std::mem::take(&mut row[1]);
    let term = std::mem::take(&mut row[0]);

    Ok(RecordFields {
        term,
        phonetic,
        definition,
        example_sentence,
        frequency,
    })
}

/// Load a corpus from raw bytes
pub fn load_corpus(bytes: &[u8], options: &ImportOptions) -> Result<LoadedCorpus> {
    if bytes.is_empty() {
        return Err(ImportError::Empty);
    }

    let (text, encoding) = decode(bytes, options);
    let rows = parse_records(&text);

    let mut records = Vec::new();
    let mut skipped = 0;

    // Row 0 is the header
    for (line, row) in rows.into_iter().enumerate().skip(1) {
        match validate_row(row) {
            Ok(fields) => {
                let id = records.len();
                records.push(fields.into_record(id));
            }
            Err(rejection) => {
                log::debug!("Skipping row {}: {:?}", line, rejection);
                skipped += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(ImportError::NoValidRows { rejected: skipped });
    }

    log::info!(
        "Parsed {} vocabulary records ({}), skipped {} rows",
        records.len(),
        encoding.name(),
        skipped
    );

    Ok(LoadedCorpus {
        corpus: Corpus::new(records),
        skipped,
        encoding: encoding.name(),
    })
}

/// Load a corpus on the blocking worker pool so large files don't stall the caller
pub async fn load_corpus_in_background(
    bytes: Vec<u8>,
    options: ImportOptions,
) -> Result<LoadedCorpus> {
    tokio::task::spawn_blocking(move || load_corpus(&bytes, &options))
        .await
        .map_err(|e| ImportError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "word,phonetic,definition,sentence,frequency\n";

    fn load(text: &str) -> Result<LoadedCorpus> {
        load_corpus(text.as_bytes(), &ImportOptions::default())
    }

    #[test]
    fn test_load_basic_file() {
        let text = format!(
            "{}apple,/ˈæp.əl/,n. a fruit,An apple a day.,5400\nbanana,,n. another fruit,,\n",
            HEADER
        );
        let loaded = load(&text).unwrap();

        assert_eq!(loaded.encoding, "UTF-8");
        assert_eq!(loaded.skipped, 0);
        let records = loaded.corpus.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[0].term, "apple");
        assert_eq!(records[0].frequency, 5400);
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].phonetic, "");
        assert_eq!(records[1].example_sentence, "");
        assert_eq!(records[1].frequency, 0);
    }

    #[test]
    fn test_header_always_dropped() {
        let loaded = load("apple,x,first row is header\nbanana,y,fruit\n").unwrap();
        assert_eq!(loaded.corpus.len(), 1);
        assert_eq!(loaded.corpus.records()[0].term, "banana");
    }

    #[test]
    fn test_short_row_dropped_without_id_gap() {
        let text = format!(
            "{}one,,def1\ntwo,,def2\nthree,,def3\nfour,only two\nfive,,def5\nsix,,def6\n",
            HEADER
        );
        let loaded = load(&text).unwrap();

        assert_eq!(loaded.skipped, 1);
        let terms: Vec<(usize, &str)> = loaded
            .corpus
            .iter()
            .map(|r| (r.id, r.term.as_str()))
            .collect();
        assert_eq!(
            terms,
            vec![(0, "one"), (1, "two"), (2, "three"), (3, "five"), (4, "six")]
        );
    }

    #[test]
    fn test_empty_term_dropped() {
        let text = format!("{}  ,x,def\nreal,,def\n", HEADER);
        let loaded = load(&text).unwrap();
        assert_eq!(loaded.corpus.len(), 1);
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_validate_row_rejections() {
        let row = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            validate_row(row).err(),
            Some(RowRejection::TooFewFields { found: 2 })
        );

        let row = vec![String::new(), "b".to_string(), "c".to_string()];
        assert_eq!(validate_row(row).err(), Some(RowRejection::EmptyTerm));
    }

    #[test]
    fn test_escaped_newlines_unescaped() {
        let text = format!("{}word,,first\\nsecond,ex1\\nex2,1\n", HEADER);
        let loaded = load(&text).unwrap();
        let record = &loaded.corpus.records()[0];
        assert_eq!(record.definition, "first\nsecond");
        assert_eq!(record.example_sentence, "ex1\nex2");
    }

    #[test]
    fn test_quoted_definition_with_separator() {
        let text = format!("{}word,,\"a, b\",\"line1\nline2\",3\n", HEADER);
        let loaded = load(&text).unwrap();
        let record = &loaded.corpus.records()[0];
        assert_eq!(record.definition, "a, b");
        assert_eq!(record.example_sentence, "line1\nline2");
        assert_eq!(record.frequency, 3);
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency("1500"), 1500);
        assert_eq!(parse_frequency(" 42 "), 42);
        assert_eq!(parse_frequency("1500.7"), 1500);
        assert_eq!(parse_frequency(""), 0);
        assert_eq!(parse_frequency("n/a"), 0);
        assert_eq!(parse_frequency("-3"), 0);
        assert_eq!(parse_frequency("99999999999999999999999"), 0);
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(format!("{}apple,,fruit\n", HEADER).as_bytes());
        let loaded = load_corpus(&bytes, &ImportOptions::default()).unwrap();
        assert_eq!(loaded.encoding, "UTF-8");
        assert_eq!(loaded.corpus.records()[0].term, "apple");
    }

    #[test]
    fn test_gbk_fallback() {
        let text = format!("{}蘋果,,水果\n", HEADER);
        let (bytes, _, _) = GBK.encode(&text);
        assert!(std::str::from_utf8(&bytes).is_err());

        let loaded = load_corpus(&bytes, &ImportOptions::default()).unwrap();
        assert_eq!(loaded.encoding, "GBK");
        assert_eq!(loaded.corpus.records()[0].term, "蘋果");
        assert_eq!(loaded.corpus.records()[0].definition, "水果");
    }

    #[test]
    fn test_fallback_label() {
        let options = ImportOptions::with_fallback_label("big5");
        assert_eq!(options.fallback_encoding.name(), "Big5");

        let options = ImportOptions::with_fallback_label("not-an-encoding");
        assert_eq!(options.fallback_encoding.name(), "GBK");
    }

    #[test]
    fn test_empty_and_header_only_fail() {
        assert!(matches!(load(""), Err(ImportError::Empty)));
        assert!(matches!(
            load(HEADER),
            Err(ImportError::NoValidRows { rejected: 0 })
        ));
        assert!(matches!(
            load(&format!("{}a,b\n,c,d\n", HEADER)),
            Err(ImportError::NoValidRows { rejected: 2 })
        ));
    }

    #[test]
    fn test_status_messages() {
        let status = ImportStatus::from(&load(""));
        assert!(!status.is_loaded());
        assert_eq!(status.message(), "CSV import failed: The file is empty");

        let status = ImportStatus::from(&load(&format!("{}a,,b\nc\n", HEADER)));
        assert!(status.is_loaded());
        assert_eq!(
            status.message(),
            "Imported 1 words (UTF-8), skipped 1 invalid rows"
        );
    }

    #[tokio::test]
    async fn test_background_load() {
        let bytes = format!("{}apple,,fruit\n", HEADER).into_bytes();
        let loaded = load_corpus_in_background(bytes, ImportOptions::default())
            .await
            .unwrap();
        assert_eq!(loaded.corpus.len(), 1);
    }
}
