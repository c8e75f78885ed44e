//! In-memory content collection and query layer.
//!
//! A [`ContentStore`] is built once (from records or from disk) and is
//! read-only afterwards. Records keep their load order; an id index gives
//! O(1) lookup and a pre-lowercased copy of every searchable field keeps
//! `search` from re-normalizing the collection on each query.
//!
//! ```ignore
//! let (store, stats) = ContentStore::load("data/seed.json", &LoadConfig::default())?;
//!
//! let sle = store.get_by_id("systemic-lupus-erythematosus");
//! let rash = store.search("butterfly");
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use medcontent_types::{
    Category, ConditionEntry, ContentBody, ContentId, ContentKind, ContentRecord, CrossReference,
    LevelContent, Searchable,
};

use crate::loader::{discover_content_files, read_content_files};
use crate::query::{self, normalize};
use crate::types::{ContentBatch, ContentError, ContentFiles, ContentResult, LoadConfig, LoadStats};
use crate::validate::{validate_collection, ValidationReport};

/// A cross-reference paired with its target, if the target is loaded.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedReference<'a> {
    /// The reference as authored.
    pub reference: &'a CrossReference,
    /// The target record, or `None` for a dangling reference.
    pub target: Option<&'a ContentRecord>,
}

/// In-memory, immutable collection of content records.
///
/// # Example
///
/// ```
/// use medcontent_loader::ContentStore;
/// use medcontent_types::{ConditionEntry, ContentBody, ContentRecord};
///
/// let store = ContentStore::from_records(vec![ContentRecord::new(
///     "celiac-disease",
///     "Celiac Disease",
///     ContentBody::Condition(ConditionEntry {
///         category: "gastrointestinal".to_string(),
///         ..Default::default()
///     }),
/// )])
/// .unwrap();
///
/// assert!(store.get_by_id("celiac-disease").is_some());
/// assert!(store.get_by_id("nope").is_none());
/// assert_eq!(store.search("CELIAC").len(), 1);
/// ```
#[derive(Default)]
pub struct ContentStore {
    /// Records in load order.
    records: Vec<ContentRecord>,
    /// Id to position in `records`.
    by_id: HashMap<ContentId, usize>,
    /// Lowercased searchable fields, parallel to `records`.
    search_index: Vec<Vec<String>>,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("records", &self.records.len())
            .field("by_id", &self.by_id.len())
            .field(
                "search_index",
                &self.search_index.iter().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

impl ContentStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records, keeping their order.
    ///
    /// Only uniqueness is enforced here; run [`validate_collection`] (or use
    /// [`ContentStore::load`]) for the full structural contract.
    ///
    /// # Errors
    /// Returns [`ContentError::DuplicateId`] if two records share an id.
    pub fn from_records(records: Vec<ContentRecord>) -> ContentResult<Self> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if by_id.insert(record.id.clone(), position).is_some() {
                return Err(ContentError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }

        let search_index = records
            .iter()
            .map(|record| {
                record
                    .searchable_text()
                    .into_iter()
                    .map(normalize)
                    .collect()
            })
            .collect();

        Ok(Self {
            records,
            by_id,
            search_index,
        })
    }

    /// Discovers, reads and validates content at `path`, then builds a store.
    ///
    /// In strict mode any error-level violation rejects the whole batch. In
    /// lenient mode the offending records (and later duplicates of an id)
    /// are dropped and logged.
    pub fn load<P: AsRef<Path>>(path: P, config: &LoadConfig) -> ContentResult<(Self, LoadStats)> {
        let files = discover_content_files(path)?;
        Self::load_files(&files, config)
    }

    /// Reads and validates an already discovered file set.
    pub fn load_files(
        files: &ContentFiles,
        config: &LoadConfig,
    ) -> ContentResult<(Self, LoadStats)> {
        let start = Instant::now();
        let batch = read_content_files(files)?;
        let (store, rejected) = Self::from_batch(batch, config)?;

        let stats = LoadStats {
            files: files.len(),
            records: store.count(),
            rejected,
            load_time_ms: start.elapsed().as_millis() as u64,
        };
        tracing::info!(
            files = stats.files,
            records = stats.records,
            rejected = stats.rejected,
            load_time_ms = stats.load_time_ms,
            "content collection loaded"
        );
        Ok((store, stats))
    }

    /// Validates records and builds a store according to `config`.
    ///
    /// Returns the store and the number of dropped records.
    pub fn from_validated(
        records: Vec<ContentRecord>,
        config: &LoadConfig,
    ) -> ContentResult<(Self, usize)> {
        Self::from_batch(ContentBatch::from(records), config)
    }

    /// Validates a decoded batch and builds a store according to `config`.
    ///
    /// Decode failures count as error-level violations: they fail a strict
    /// load and are dropped (and counted as rejected) in a lenient one.
    pub fn from_batch(batch: ContentBatch, config: &LoadConfig) -> ContentResult<(Self, usize)> {
        let ContentBatch { records, failures } = batch;
        let failed = failures.len();

        let mut report = ValidationReport::default();
        for failure in failures {
            report.push(failure);
        }
        report.merge(validate_collection(&records));

        let (records, rejected) = if config.strict {
            report.into_result()?;
            (records, 0)
        } else {
            let (records, dropped) = drop_rejected(records, &report);
            (records, dropped + failed)
        };

        let store = Self::from_records(records)?;
        for (id, reference) in store.dangling_references() {
            tracing::warn!(
                record = id,
                target = %reference.target_id,
                "cross-reference target not in collection"
            );
        }
        Ok((store, rejected))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CORE QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Looks up a record by exact id. `None` is the not-found signal.
    pub fn get_by_id(&self, id: &str) -> Option<&ContentRecord> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    /// Returns true if a record with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns every record whose category is in `categories`, in collection
    /// order. An empty set yields an empty result.
    pub fn filter_by_category(&self, categories: &HashSet<Category>) -> Vec<&ContentRecord> {
        query::filter_by_category(&self.records, categories)
    }

    /// Case-insensitive substring search across every searchable field.
    ///
    /// A record matches if the query occurs in any one field. Results keep
    /// collection order; the empty query returns every record.
    pub fn search(&self, query: &str) -> Vec<&ContentRecord> {
        let query = normalize(query);
        self.records
            .iter()
            .zip(&self.search_index)
            .filter(|(_, fields)| fields.iter().any(|field| field.contains(&query)))
            .map(|(record, _)| record)
            .collect()
    }

    /// Parallel [`search`](Self::search) with identical results.
    #[cfg(feature = "parallel")]
    pub fn search_parallel(&self, query: &str) -> Vec<&ContentRecord> {
        let query = normalize(query);
        self.records
            .par_iter()
            .zip(self.search_index.par_iter())
            .filter(|(_, fields)| fields.iter().any(|field| field.contains(&query)))
            .map(|(record, _)| record)
            .collect()
    }

    /// Number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in collection order.
    pub fn records(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter()
    }

    /// Re-validates the loaded collection.
    pub fn validate(&self) -> ValidationReport {
        validate_collection(&self.records)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FAMILY HELPERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Records of one family, in collection order.
    pub fn records_of_kind(&self, kind: ContentKind) -> Vec<&ContentRecord> {
        self.records.iter().filter(|r| r.kind() == kind).collect()
    }

    /// Conditions whose autoantibody list mentions `antibody` (case-insensitive).
    pub fn find_by_autoantibody(&self, antibody: &str) -> Vec<&ContentRecord> {
        let needle = normalize(antibody);
        self.conditions_matching(|entry| &entry.autoantibodies, &needle)
    }

    /// Conditions whose clinical features mention `feature` (case-insensitive).
    pub fn find_by_clinical_feature(&self, feature: &str) -> Vec<&ContentRecord> {
        let needle = normalize(feature);
        self.conditions_matching(|entry| &entry.clinical_features, &needle)
    }

    fn conditions_matching<F>(&self, list: F, needle: &str) -> Vec<&ContentRecord>
    where
        F: Fn(&ConditionEntry) -> &Vec<String>,
    {
        self.records
            .iter()
            .filter(|record| match &record.body {
                ContentBody::Condition(entry) => {
                    list(entry).iter().any(|item| normalize(item).contains(needle))
                }
                _ => false,
            })
            .collect()
    }

    /// Records tagged with `tag` as a system, topic or keyword.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&ContentRecord> {
        self.records.iter().filter(|r| r.tags.has_tag(tag)).collect()
    }

    /// Returns one complexity level of a record.
    pub fn level(&self, id: &str, rank: u8) -> Option<&LevelContent> {
        self.get_by_id(id)?.level(rank)
    }

    /// Number of records per category, ordered by category.
    ///
    /// Records with an unrecognised category are not counted.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for category in self.records.iter().filter_map(|r| r.category()) {
            *counts.entry(category).or_insert(0) += 1;
        }
        counts
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CROSS-REFERENCES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Resolves the cross-references of a record, in authored order.
    ///
    /// Returns `None` if the record itself is not loaded.
    pub fn cross_references(&self, id: &str) -> Option<Vec<ResolvedReference<'_>>> {
        let record = self.get_by_id(id)?;
        Some(
            record
                .cross_references
                .iter()
                .map(|reference| ResolvedReference {
                    reference,
                    target: self.get_by_id(&reference.target_id),
                })
                .collect(),
        )
    }

    /// Records that reference `id`, in collection order.
    pub fn referenced_by(&self, id: &str) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|r| r.cross_references.iter().any(|x| x.target_id == id))
            .collect()
    }

    /// Every `(source id, reference)` whose target is not loaded.
    pub fn dangling_references(&self) -> Vec<(&str, &CrossReference)> {
        self.records
            .iter()
            .flat_map(|record| {
                record
                    .cross_references
                    .iter()
                    .filter(|reference| !self.contains(&reference.target_id))
                    .map(move |reference| (record.id.as_str(), reference))
            })
            .collect()
    }
}

/// Drops every record with an error-level violation, logging each one.
///
/// Violations carry the position of the record they belong to, so a later
/// duplicate of an id is dropped without touching the first occurrence.
fn drop_rejected(
    records: Vec<ContentRecord>,
    report: &ValidationReport,
) -> (Vec<ContentRecord>, usize) {
    let rejected = report.rejected_positions();
    if rejected.is_empty() {
        return (records, 0);
    }

    for violation in report.errors() {
        tracing::warn!(
            record = %violation.record_id,
            field = %violation.field,
            "dropping record: {}",
            violation.message
        );
    }

    let kept: Vec<ContentRecord> = records
        .into_iter()
        .enumerate()
        .filter(|(position, _)| !rejected.contains(position))
        .map(|(_, record)| record)
        .collect();
    (kept, rejected.len())
}
