//! Loader-specific types: errors, configuration and statistics.

use std::path::PathBuf;
use thiserror::Error;

use medcontent_types::{ContentRecord, InvalidLevelKey};

use crate::validate::SchemaViolation;

/// Errors that can occur while loading or validating content.
#[derive(Error, Debug)]
pub enum ContentError {
    /// I/O error reading a content file.
    #[error("IO error reading content file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error.
    #[error("JSON error in {location}: {source}")]
    Json {
        /// File (and line, for JSON Lines) that failed to decode.
        location: String,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Tab-separated table parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// No recognised content file at the given path.
    #[error("No content files (.json, .jsonl, conditions*.tsv, pain*.tsv, ethics*.tsv) found in {path}")]
    NoContentFiles {
        /// The path that was searched.
        path: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// Level key that is not a complexity rank.
    #[error(transparent)]
    InvalidLevelKey(#[from] InvalidLevelKey),

    /// Two records share an id.
    #[error("Duplicate content id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A record breaks the structural contract.
    #[error("Schema violation in record '{record_id}', field '{field}': {message}")]
    SchemaViolation {
        /// Offending record id.
        record_id: String,
        /// Offending field path.
        field: String,
        /// What is wrong.
        message: String,
    },

    /// A strict load found error-level violations.
    #[error("Content batch rejected: {count} schema violation(s), first: {first}")]
    InvalidBatch {
        /// Number of error-level violations.
        count: usize,
        /// The first violation, rendered.
        first: String,
    },
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Configuration for loading a content collection.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Reject the whole batch on any error-level violation.
    ///
    /// When false, only the offending records are dropped (each one is
    /// logged at `warn`).
    pub strict: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl LoadConfig {
    /// Creates a config that drops invalid records instead of failing.
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

/// Statistics from loading a collection.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Files read.
    pub files: usize,
    /// Records accepted into the collection.
    pub records: usize,
    /// Records dropped by a lenient load.
    pub rejected: usize,
    /// Time taken to load in milliseconds.
    pub load_time_ms: u64,
}

impl LoadStats {
    /// Returns the percentage of parsed records that were rejected.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.records + self.rejected;
        if total == 0 {
            0.0
        } else {
            (self.rejected as f64 / total as f64) * 100.0
        }
    }
}

/// On-disk format of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// JSON array of records.
    Json,
    /// One JSON record per line.
    JsonLines,
    /// Tab-separated autoimmune condition table.
    ConditionTable,
    /// Tab-separated pain-management table.
    PainTable,
    /// Tab-separated ethics table.
    EthicsTable,
}

impl FileFormat {
    /// Classifies a file by name.
    ///
    /// Returns `None` for files that are not content files.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.ends_with(".jsonl") {
            Some(Self::JsonLines)
        } else if name.ends_with(".json") {
            Some(Self::Json)
        } else if !name.ends_with(".tsv") {
            None
        } else if name.starts_with("conditions") {
            Some(Self::ConditionTable)
        } else if name.starts_with("pain") {
            Some(Self::PainTable)
        } else if name.starts_with("ethics") {
            Some(Self::EthicsTable)
        } else {
            None
        }
    }
}

/// Content files discovered at a data path, in load order.
#[derive(Debug, Clone, Default)]
pub struct ContentFiles {
    /// Files with their format, sorted by file name.
    pub files: Vec<(PathBuf, FileFormat)>,
}

impl ContentFiles {
    /// Creates a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of discovered files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Records read from one or more content files.
///
/// Elements that are well-formed JSON but do not decode into a record are
/// kept as `failures` so the load can reject them one by one.
#[derive(Debug, Clone, Default)]
pub struct ContentBatch {
    /// Decoded records, in file order.
    pub records: Vec<ContentRecord>,
    /// One error-level violation per element that failed to decode.
    pub failures: Vec<SchemaViolation>,
}

impl ContentBatch {
    /// Appends another batch, keeping order.
    pub fn extend(&mut self, other: ContentBatch) {
        self.records.extend(other.records);
        self.failures.extend(other.failures);
    }
}

impl From<Vec<ContentRecord>> for ContentBatch {
    fn from(records: Vec<ContentRecord>) -> Self {
        Self {
            records,
            failures: Vec::new(),
        }
    }
}
