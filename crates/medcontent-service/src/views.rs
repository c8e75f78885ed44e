//! Serializable response views and their text rendering.

use std::collections::BTreeMap;
use std::fmt;

use medcontent_loader::{ContentStore, LoadStats, ResolvedReference, ValidationReport};
use medcontent_types::{ContentRecord, LevelContent};
use serde::Serialize;

/// Output format for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document per response.
    Json,
}

/// One-line view of a record, used in result lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    /// Record id.
    pub id: String,
    /// Content family.
    pub kind: String,
    /// Category as authored.
    pub category: String,
    /// Display name.
    pub name: String,
}

/// A cross-reference with its resolution state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceView {
    /// Referenced id.
    pub target_id: String,
    /// Declared target family.
    pub target_type: String,
    /// Relationship label (`related`, `see-also`, ...).
    pub relationship: String,
    /// Display label.
    pub label: String,
    /// Name of the target when it is loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
}

/// Outgoing references and backlinks of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesView {
    /// Record the references belong to.
    pub id: String,
    /// References declared by the record.
    pub outgoing: Vec<ReferenceView>,
    /// Records that reference this one.
    pub referenced_by: Vec<RecordSummary>,
}

/// Collection size with a per-category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountView {
    /// Number of records.
    pub total: usize,
    /// Records per qualified category (`kind:value`).
    pub by_category: BTreeMap<String, usize>,
}

/// Result of re-validating the loaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationView {
    /// True when no errors were found.
    pub valid: bool,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

/// Summary of a (re)load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadView {
    /// Files read.
    pub files: usize,
    /// Records kept.
    pub records: usize,
    /// Records dropped in lenient mode.
    pub rejected: usize,
    /// Percentage of decoded records that were dropped.
    pub rejection_rate: f64,
    /// Wall time in milliseconds.
    pub load_time_ms: u64,
}

/// A response to one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A full record.
    Record(Box<ContentRecord>),
    /// An ordered list of matches.
    Records(Vec<RecordSummary>),
    /// Content of one complexity level.
    Level {
        /// Owning record.
        id: String,
        /// The level content.
        content: Box<LevelContent>,
    },
    /// Cross-reference graph around a record.
    References(ReferencesView),
    /// Collection size.
    Count(CountView),
    /// Validation outcome.
    Validation(ValidationView),
    /// The collection was reloaded.
    Reloaded(LoadView),
    /// No record (or level) with this key.
    NotFound(String),
    /// Free-form text (shell help).
    Message(String),
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERSIONS
// ═══════════════════════════════════════════════════════════════════════════

pub(crate) fn to_summary(record: &ContentRecord) -> RecordSummary {
    RecordSummary {
        id: record.id.clone(),
        kind: record.kind().to_string(),
        category: record.raw_category().to_string(),
        name: record.name.clone(),
    }
}

pub(crate) fn to_summaries(records: &[&ContentRecord]) -> Vec<RecordSummary> {
    records.iter().map(|r| to_summary(r)).collect()
}

pub(crate) fn to_reference(resolved: &ResolvedReference<'_>) -> ReferenceView {
    ReferenceView {
        target_id: resolved.reference.target_id.clone(),
        target_type: resolved.reference.target_type.clone(),
        relationship: resolved.reference.relationship.clone(),
        label: resolved.reference.label.clone(),
        target_name: resolved.target.map(|t| t.name.clone()),
    }
}

pub(crate) fn to_count(store: &ContentStore) -> CountView {
    CountView {
        total: store.count(),
        by_category: store
            .category_counts()
            .into_iter()
            .map(|(category, n)| (category.to_string(), n))
            .collect(),
    }
}

pub(crate) fn to_validation(report: &ValidationReport) -> ValidationView {
    ValidationView {
        valid: report.is_valid(),
        errors: report.errors().map(ToString::to_string).collect(),
        warnings: report.warnings().map(ToString::to_string).collect(),
    }
}

pub(crate) fn to_load(stats: &LoadStats) -> LoadView {
    LoadView {
        files: stats.files,
        records: stats.records,
        rejected: stats.rejected,
        rejection_rate: stats.rejection_rate(),
        load_time_ms: stats.load_time_ms,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERING
// ═══════════════════════════════════════════════════════════════════════════

impl Response {
    /// Process exit code for a one-shot command: 2 when nothing was found.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound(_) => 2,
            _ => 0,
        }
    }

    /// Renders the response in the requested format.
    pub fn render(&self, format: Format) -> serde_json::Result<String> {
        match format {
            Format::Json => self.render_json(),
            Format::Text => Ok(self.to_string()),
        }
    }

    fn render_json(&self) -> serde_json::Result<String> {
        match self {
            Self::Record(record) => serde_json::to_string_pretty(record),
            Self::Records(records) => serde_json::to_string_pretty(records),
            Self::Level { id, content } => serde_json::to_string_pretty(&serde_json::json!({
                "id": id,
                "content": content,
            })),
            Self::References(view) => serde_json::to_string_pretty(view),
            Self::Count(view) => serde_json::to_string_pretty(view),
            Self::Validation(view) => serde_json::to_string_pretty(view),
            Self::Reloaded(view) => serde_json::to_string_pretty(view),
            Self::NotFound(key) => serde_json::to_string(&serde_json::json!({
                "error": "not found",
                "key": key,
            })),
            Self::Message(text) => serde_json::to_string(&serde_json::json!({ "message": text })),
        }
    }
}

impl fmt::Display for Response {
    /// Human-readable rendering, one item per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(record) => write_record(f, record),
            Self::Records(records) => {
                for r in records {
                    writeln!(f, "{}\t{}\t{}\t{}", r.id, r.kind, r.category, r.name)?;
                }
                writeln!(f, "({} results)", records.len())
            }
            Self::Level { id, content } => write_level(f, id, content),
            Self::References(view) => write_references(f, view),
            Self::Count(view) => {
                writeln!(f, "{} records", view.total)?;
                for (category, n) in &view.by_category {
                    writeln!(f, "  {:<40} {}", category, n)?;
                }
                Ok(())
            }
            Self::Validation(view) => {
                for error in &view.errors {
                    writeln!(f, "{}", error)?;
                }
                for warning in &view.warnings {
                    writeln!(f, "{}", warning)?;
                }
                writeln!(
                    f,
                    "{}: {} errors, {} warnings",
                    if view.valid { "valid" } else { "invalid" },
                    view.errors.len(),
                    view.warnings.len()
                )
            }
            Self::Reloaded(view) => writeln!(
                f,
                "reloaded {} records from {} files ({} rejected, {:.1}%) in {} ms",
                view.records,
                view.files,
                view.rejected,
                view.rejection_rate,
                view.load_time_ms
            ),
            Self::NotFound(key) => writeln!(f, "not found: {}", key),
            Self::Message(text) => writeln!(f, "{}", text),
        }
    }
}

fn write_record(f: &mut fmt::Formatter<'_>, record: &ContentRecord) -> fmt::Result {
    writeln!(f, "{} ({})", record.name, record.id)?;
    writeln!(f, "  kind:     {}", record.kind())?;
    writeln!(f, "  category: {}", record.raw_category())?;
    if let Some(name_es) = &record.name_es {
        writeln!(f, "  name (es): {}", name_es)?;
    }
    if !record.alternate_names.is_empty() {
        writeln!(f, "  also:     {}", record.alternate_names.join(", "))?;
    }
    if let Some(status) = &record.lifecycle.status {
        writeln!(f, "  status:   {}", status)?;
    }
    if let Some(levels) = record.levels() {
        let ranks: Vec<String> = levels.ranks().map(|r| r.to_string()).collect();
        writeln!(f, "  levels:   {}", ranks.join(", "))?;
    }
    for reference in &record.cross_references {
        writeln!(
            f,
            "  -> {} [{}] {}",
            reference.target_id, reference.relationship, reference.label
        )?;
    }
    Ok(())
}

fn write_level(f: &mut fmt::Formatter<'_>, id: &str, content: &LevelContent) -> fmt::Result {
    let label = content.complexity().map(|c| c.label()).unwrap_or("unknown");
    writeln!(f, "{} level {} ({})", id, content.level, label)?;
    writeln!(f, "  {}", content.summary)?;
    writeln!(f)?;
    writeln!(f, "{}", content.explanation)?;
    for term in &content.key_terms {
        writeln!(f, "  * {}: {}", term.term, term.definition)?;
    }
    if let Some(notes) = &content.clinical_notes {
        writeln!(f, "  clinical notes: {}", notes)?;
    }
    Ok(())
}

fn write_references(f: &mut fmt::Formatter<'_>, view: &ReferencesView) -> fmt::Result {
    writeln!(f, "{}", view.id)?;
    for r in &view.outgoing {
        match &r.target_name {
            Some(name) => writeln!(f, "  -> {} [{}] {}", r.target_id, r.relationship, name)?,
            None => writeln!(f, "  -> {} [{}] (not loaded)", r.target_id, r.relationship)?,
        }
    }
    for r in &view.referenced_by {
        writeln!(f, "  <- {} {}", r.id, r.name)?;
    }
    Ok(())
}
