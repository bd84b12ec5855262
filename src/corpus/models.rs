//! Data models for the vocabulary corpus

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for content-derived record keys
const RECORD_KEY_NAMESPACE: Uuid = Uuid::from_bytes([
    0x5c, 0x1e, 0x8a, 0x42, 0x93, 0x0d, 0x4b, 0x7f, 0xa6, 0x21, 0x3e, 0xd0, 0x7b, 0x55, 0x19, 0xc4,
]);

/// Stable key for a vocabulary record, derived from its term.
///
/// Review progress and retirement are keyed by this value rather than the
/// positional id, so re-importing a reordered file keeps progress attached
/// to the same word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(Uuid);

impl RecordKey {
    pub fn for_term(term: &str) -> Self {
        Self(Uuid::new_v5(&RECORD_KEY_NAMESPACE, term.trim().as_bytes()))
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single vocabulary entry, immutable once imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyRecord {
    /// 0-based position among the valid rows of the import
    pub id: usize,
    pub key: RecordKey,
    pub term: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub frequency: u64,
}

impl VocabularyRecord {
    pub fn new(id: usize, term: String) -> Self {
        Self {
            id,
            key: RecordKey::for_term(&term),
            term,
            phonetic: String::new(),
            definition: String::new(),
            example_sentence: String::new(),
            frequency: 0,
        }
    }
}

/// Ordered collection of vocabulary records, replaced wholesale on import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    records: Vec<VocabularyRecord>,
}

impl Corpus {
    pub fn new(records: Vec<VocabularyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[VocabularyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&VocabularyRecord> {
        self.records.get(id)
    }

    /// First record carrying this key
    pub fn find_by_key(&self, key: RecordKey) -> Option<&VocabularyRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    pub fn contains_key(&self, key: RecordKey) -> bool {
        self.find_by_key(key).is_some()
    }

    /// Case-insensitive exact term lookup
    pub fn find_by_term(&self, term: &str) -> Option<&VocabularyRecord> {
        let wanted = term.trim().to_lowercase();
        self.records.iter().find(|r| r.term.to_lowercase() == wanted)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabularyRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a VocabularyRecord;
    type IntoIter = std::slice::Iter<'a, VocabularyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Format a word frequency for compact display
/// 0 -> "0", 950 -> "950", 1500 -> "1.5k"
pub fn format_frequency(frequency: u64) -> String {
    if frequency >= 1000 {
        format!("{:.1}k", frequency as f64 / 1000.0)
    } else {
        frequency.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_derived_from_trimmed_term() {
        assert_eq!(RecordKey::for_term("apple"), RecordKey::for_term("  apple "));
        assert_ne!(RecordKey::for_term("apple"), RecordKey::for_term("Apple"));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut record = VocabularyRecord::new(3, "abandon".to_string());
        record.example_sentence = "They abandoned ship.".to_string();
        record.frequency = 1200;

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["exampleSentence"], "They abandoned ship.");
        assert_eq!(json["frequency"], 1200);

        let back: VocabularyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_find_by_term_ignores_case() {
        let corpus = Corpus::new(vec![
            VocabularyRecord::new(0, "Apple".to_string()),
            VocabularyRecord::new(1, "banana".to_string()),
        ]);

        assert_eq!(corpus.find_by_term("apple").map(|r| r.id), Some(0));
        assert_eq!(corpus.find_by_term("BANANA ").map(|r| r.id), Some(1));
        assert!(corpus.find_by_term("cherry").is_none());
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(0), "0");
        assert_eq!(format_frequency(999), "999");
        assert_eq!(format_frequency(1000), "1.0k");
        assert_eq!(format_frequency(1560), "1.6k");
        assert_eq!(format_frequency(23400), "23.4k");
    }
}
