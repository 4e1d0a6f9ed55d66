//! Core data structures: condition records, the corpus and crawl statistics

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::parser::keys::{KeyRegistry, CONDITION_KEY, URL_KEY};

/// One extracted condition page.
///
/// Always carries `condition` and `url`; every other entry is a heading key
/// mapped to the text found under that heading, kept in document order.
/// Keys are unique within the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRecord {
    condition: String,
    url: String,
    fields: Vec<(String, String)>,
    keys: KeyRegistry,
}

impl ConditionRecord {
    /// Create a record holding only the reserved fields
    pub fn new(condition: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            url: url.into(),
            fields: Vec::new(),
            keys: KeyRegistry::new(),
        }
    }

    /// Append a field, suffixing the key if it is already taken.
    ///
    /// Returns the key the value was stored under. Existing entries,
    /// including `condition` and `url`, are never overwritten.
    pub fn insert_field(&mut self, key: &str, value: impl Into<String>) -> String {
        let key = self.keys.reserve(key);
        self.fields.push((key.clone(), value.into()));
        key
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extracted fields in document order, without the reserved pair
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Look up any field by key, reserved ones included
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            CONDITION_KEY => Some(&self.condition),
            URL_KEY => Some(&self.url),
            _ => self
                .fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// All keys in output order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        [CONDITION_KEY, URL_KEY]
            .into_iter()
            .chain(self.fields.iter().map(|(k, _)| k.as_str()))
    }

    /// Number of entries, reserved ones included
    pub fn len(&self) -> usize {
        self.fields.len() + 2
    }

    /// A record is never empty; it always holds `condition` and `url`
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for ConditionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        map.serialize_entry(CONDITION_KEY, &self.condition)?;
        map.serialize_entry(URL_KEY, &self.url)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Crawl statistics
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    /// URLs found on the index page
    pub discovered: usize,
    /// Detail pages requested
    pub attempted: usize,
    /// Records extracted
    pub succeeded: usize,
    /// Detail pages that failed to fetch
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStats {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Calculate error rate as percentage
    pub fn error_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            (self.failed as f64 / self.attempted as f64) * 100.0
        }
    }

    pub fn duration_secs(&self) -> i64 {
        self.finished_at
            .map(|end| (end - self.started_at).num_seconds())
            .unwrap_or(0)
    }
}

/// Ordered, append-only collection of records from one run
#[derive(Debug, Clone, Serialize)]
pub struct Corpus {
    records: Vec<ConditionRecord>,
    stats: CrawlStats,
}

impl Corpus {
    pub fn new(discovered: usize) -> Self {
        Self {
            records: Vec::new(),
            stats: CrawlStats::new(discovered),
        }
    }

    /// Append a successfully extracted record
    pub fn push(&mut self, record: ConditionRecord) {
        self.stats.attempted += 1;
        self.stats.succeeded += 1;
        self.records.push(record);
    }

    /// Count a detail page that yielded no record
    pub fn record_failure(&mut self) {
        self.stats.attempted += 1;
        self.stats.failed += 1;
    }

    /// Stamp the finish time
    pub fn finish(&mut self) {
        self.stats.finished_at = Some(Utc::now());
    }

    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ConditionRecord> {
        self.records
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of keys across all records for tabular output.
    ///
    /// `condition` and `url` come first, the rest in alphabetical order.
    pub fn columns(&self) -> Vec<String> {
        let others: BTreeSet<&str> = self
            .records
            .iter()
            .flat_map(|r| r.fields().iter().map(|(k, _)| k.as_str()))
            .collect();

        [CONDITION_KEY, URL_KEY]
            .into_iter()
            .chain(others)
            .map(String::from)
            .collect()
    }
}
