//! Structural validation of content records.
//!
//! Validation is a load-time concern: the query layer assumes every record
//! it sees has passed [`validate_collection`] without errors.
//!
//! Field names in violations are JSON paths relative to the record
//! (`levels.3`, `crossReferences[0].relationship`).

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use medcontent_types::{
    well_known, ClinicalRelevance, ComplexityLevel, ContentBody, ContentRecord, ContentStatus,
    ContentTags, LevelContent, Levels, RelationshipType, Searchable,
};
use regex::Regex;

use crate::types::ContentError;

const DUPLICATE_ID: &str = "duplicate id";

const PLACEHOLDER_PATTERN: &str = r"(?i)\b(todo|fixme|placeholder)\b";
const ICD_CODE_PATTERN: &str = r"^[A-Z]\d{1,2}\.?\d{0,3}$";
const ICD_SYSTEM_PREFIX: &str = "ICD-11:";

/// How serious a violation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Breaks the structural contract; the record cannot be loaded.
    Error,
    /// Suspicious but allowed.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A single structural problem with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Id of the offending record (may be empty if the id itself is missing).
    pub record_id: String,
    /// JSON path of the offending field.
    pub field: String,
    /// What is wrong.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
    /// Position of the record in the validated collection, when known.
    pub index: Option<usize>,
}

impl SchemaViolation {
    /// Creates an error-level violation.
    pub fn error(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
            index: None,
        }
    }

    /// Creates a warning-level violation.
    pub fn warning(
        record_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(record_id, field, message)
        }
    }

    /// Returns true for error-level violations.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Attaches the record's position in its collection.
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}.{}: {}",
            self.severity, self.record_id, self.field, self.message
        )
    }
}

impl From<SchemaViolation> for ContentError {
    fn from(violation: SchemaViolation) -> Self {
        ContentError::SchemaViolation {
            record_id: violation.record_id,
            field: violation.field,
            message: violation.message,
        }
    }
}

/// Outcome of validating one record or a whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<SchemaViolation>,
}

impl ValidationReport {
    /// Creates an empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when there are no error-level violations.
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(SchemaViolation::is_error)
    }

    /// All violations in discovery order.
    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }

    /// Error-level violations.
    pub fn errors(&self) -> impl Iterator<Item = &SchemaViolation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    /// Warning-level violations.
    pub fn warnings(&self) -> impl Iterator<Item = &SchemaViolation> {
        self.violations.iter().filter(|v| !v.is_error())
    }

    /// Number of error-level violations.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning-level violations.
    pub fn warning_count(&self) -> usize {
        self.violations.len() - self.error_count()
    }

    /// Collection positions of records with at least one error.
    pub fn rejected_positions(&self) -> HashSet<usize> {
        self.errors().filter_map(|v| v.index).collect()
    }

    /// Converts the report into an error if it holds any error-level violation.
    pub fn into_result(self) -> Result<Self, ContentError> {
        let count = self.error_count();
        let first = self.errors().next().cloned();
        match first {
            None => Ok(self),
            Some(first) if count == 1 => Err(first.into()),
            Some(first) => Err(ContentError::InvalidBatch {
                count,
                first: first.to_string(),
            }),
        }
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: SchemaViolation) {
        self.violations.push(violation);
    }

    /// Appends every violation of another report.
    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }
}

/// Validates a single record in isolation.
///
/// Checks required fields, category membership, level completeness,
/// placeholder text, cross-reference shape, tags and lifecycle metadata. Uniqueness and dangling
/// references need the whole collection; see [`validate_collection`].
pub fn validate_record(record: &ContentRecord) -> ValidationReport {
    let mut report = ValidationReport::new();
    let id = record.id.as_str();

    if id.trim().is_empty() {
        report.push(SchemaViolation::error(id, "id", "must not be empty"));
    }
    if record.name.trim().is_empty() {
        report.push(SchemaViolation::error(id, "name", "must not be empty"));
    }
    check_placeholder(id, "name", &record.name, &mut report);
    match record.name_es.as_deref().map(str::trim) {
        None | Some("") => report.push(SchemaViolation::warning(
            id,
            "nameEs",
            "missing Spanish translation",
        )),
        Some(name_es) => check_placeholder(id, "nameEs", name_es, &mut report),
    }

    if record.category().is_none() {
        let field = match record.body {
            ContentBody::Educational(_) => "type",
            _ => "category",
        };
        report.push(SchemaViolation::error(
            id,
            field,
            format!(
                "'{}' is not a valid {} {}",
                record.raw_category(),
                record.kind(),
                field
            ),
        ));
    }

    match &record.body {
        ContentBody::Educational(entry) if entry.levels.is_empty() => {
            report.push(SchemaViolation::error(
                id,
                "levels",
                "educational content requires levels 1-5",
            ));
        }
        _ => {
            if let Some(levels) = record.levels() {
                validate_levels(id, levels, &mut report);
            }
        }
    }

    for (i, reference) in record.cross_references.iter().enumerate() {
        let prefix = format!("crossReferences[{}]", i);
        for (name, value) in [
            ("targetId", &reference.target_id),
            ("targetType", &reference.target_type),
            ("relationship", &reference.relationship),
        ] {
            if value.trim().is_empty() {
                report.push(SchemaViolation::error(
                    id,
                    format!("{}.{}", prefix, name),
                    "must not be empty",
                ));
            }
        }
        if !reference.relationship.is_empty() && reference.relationship_type().is_none() {
            report.push(SchemaViolation::error(
                id,
                format!("{}.relationship", prefix),
                format!(
                    "unknown relationship '{}' (expected one of {})",
                    reference.relationship,
                    joined(RelationshipType::ALL.iter().map(|r| r.as_str()))
                ),
            ));
        }
    }

    if let ContentBody::Condition(entry) = &record.body {
        if !entry.icd_code.is_empty() {
            check_icd_code(id, "icdCode", &entry.icd_code, &mut report);
        }
    }

    validate_tags(id, &record.tags, &mut report);
    validate_lifecycle(record, &mut report);
    report
}

fn validate_tags(id: &str, tags: &ContentTags, report: &mut ValidationReport) {
    for (i, system) in tags.systems.iter().enumerate() {
        if let Some(code) = system.strip_prefix(ICD_SYSTEM_PREFIX) {
            check_icd_code(id, &format!("tags.systems[{}]", i), code.trim(), report);
        }
    }

    if let Some(relevance) = &tags.clinical_relevance {
        if ClinicalRelevance::parse(relevance).is_none() {
            report.push(SchemaViolation::error(
                id,
                "tags.clinicalRelevance",
                format!(
                    "unknown clinical relevance '{}' (expected one of {})",
                    relevance,
                    joined(ClinicalRelevance::ALL.iter().map(|r| r.as_str()))
                ),
            ));
        }
    }

    if let Some(exams) = &tags.exam_relevance {
        for board in exams.other.keys() {
            if !well_known::EXAM_BOARDS.contains(&board.as_str()) {
                report.push(SchemaViolation::warning(
                    id,
                    format!("tags.examRelevance.{}", board),
                    format!(
                        "unknown exam type (expected one of {})",
                        well_known::EXAM_BOARDS.join(", ")
                    ),
                ));
            }
        }
        for (i, shelf) in exams.shelf.iter().enumerate() {
            if shelf.trim().is_empty() {
                report.push(SchemaViolation::error(
                    id,
                    format!("tags.examRelevance.shelf[{}]", i),
                    "shelf exam entry must not be empty",
                ));
            }
        }
    }
}

/// Validates every record plus the collection-wide invariants.
///
/// Adds a `DuplicateId` error for every repeated id after its first
/// occurrence, and a warning for every cross-reference whose target is not
/// in the collection.
pub fn validate_collection(records: &[ContentRecord]) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        for violation in validate_record(record).violations {
            report.push(violation.at(position));
        }

        if let Some(first) = first_seen.get(record.id.as_str()) {
            report.push(SchemaViolation::error(
                &record.id,
                "id",
                format!(
                    "{} (first defined at position {}, repeated at {})",
                    DUPLICATE_ID, first, position
                ),
            )
            .at(position));
        } else {
            first_seen.insert(&record.id, position);
        }
    }

    for (position, record) in records.iter().enumerate() {
        for (i, reference) in record.cross_references.iter().enumerate() {
            if !reference.target_id.is_empty()
                && !first_seen.contains_key(reference.target_id.as_str())
            {
                report.push(SchemaViolation::warning(
                    &record.id,
                    format!("crossReferences[{}].targetId", i),
                    format!("target '{}' is not in the collection", reference.target_id),
                )
                .at(position));
            }
        }
    }

    report
}

fn validate_levels(id: &str, levels: &Levels, report: &mut ValidationReport) {
    for rank in levels.missing_ranks() {
        report.push(SchemaViolation::error(
            id,
            format!("levels.{}", rank),
            format!("missing level {}", rank),
        ));
    }
    for rank in levels.unexpected_ranks() {
        report.push(SchemaViolation::error(
            id,
            format!("levels.{}", rank),
            format!(
                "unexpected level {} (expected {}-{})",
                rank,
                ComplexityLevel::MIN_RANK,
                ComplexityLevel::MAX_RANK
            ),
        ));
    }
    for (rank, content) in levels.iter() {
        validate_level(id, rank, content, report);
    }
}

fn validate_level(id: &str, rank: u8, content: &LevelContent, report: &mut ValidationReport) {
    let prefix = format!("levels.{}", rank);
    if content.level != rank {
        report.push(SchemaViolation::error(
            id,
            format!("{}.level", prefix),
            format!("level {} stored under key {}", content.level, rank),
        ));
    }
    if content.summary.trim().is_empty() {
        report.push(SchemaViolation::error(
            id,
            format!("{}.summary", prefix),
            "must not be empty",
        ));
    }
    if content.explanation.trim().is_empty() {
        report.push(SchemaViolation::error(
            id,
            format!("{}.explanation", prefix),
            "must not be empty",
        ));
    }
    check_placeholder(id, &format!("{}.summary", prefix), &content.summary, report);
    check_placeholder(id, &format!("{}.explanation", prefix), &content.explanation, report);
    if let Some(notes) = &content.clinical_notes {
        check_placeholder(id, &format!("{}.clinicalNotes", prefix), notes, report);
    }
    if content.key_terms.is_empty() {
        report.push(SchemaViolation::warning(
            id,
            format!("{}.keyTerms", prefix),
            "no key terms",
        ));
    }
    for (i, key_term) in content.key_terms.iter().enumerate() {
        if key_term.term.trim().is_empty() || key_term.definition.trim().is_empty() {
            report.push(SchemaViolation::error(
                id,
                format!("{}.keyTerms[{}]", prefix, i),
                "term and definition must not be empty",
            ));
        }
        let field = format!("{}.keyTerms[{}]", prefix, i);
        check_placeholder(id, &field, &key_term.term, report);
        check_placeholder(id, &field, &key_term.definition, report);
    }
}

fn check_placeholder(id: &str, field: &str, text: &str, report: &mut ValidationReport) {
    if contains_placeholder(text) {
        report.push(SchemaViolation::error(
            id,
            field,
            "contains placeholder text",
        ));
    }
}

fn check_icd_code(id: &str, field: &str, code: &str, report: &mut ValidationReport) {
    if !is_valid_icd_code(code) {
        report.push(SchemaViolation::warning(
            id,
            field,
            format!("'{}' does not look like an ICD code", code),
        ));
    }
}

/// Returns true if `text` contains a TODO, FIXME or placeholder marker.
pub fn contains_placeholder(text: &str) -> bool {
    static PLACEHOLDER: OnceLock<Option<Regex>> = OnceLock::new();
    PLACEHOLDER
        .get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

/// Accepts codes shaped like `M32` or `K90.0`: a capital letter, one or
/// two digits, an optional dot and up to three more digits.
pub fn is_valid_icd_code(code: &str) -> bool {
    static ICD_CODE: OnceLock<Option<Regex>> = OnceLock::new();
    ICD_CODE
        .get_or_init(|| Regex::new(ICD_CODE_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(code))
}

fn validate_lifecycle(record: &ContentRecord, report: &mut ValidationReport) {
    let id = record.id.as_str();
    let lifecycle = &record.lifecycle;

    match &lifecycle.status {
        None => report.push(SchemaViolation::warning(id, "status", "missing")),
        Some(status) if ContentStatus::parse(status).is_none() => {
            report.push(SchemaViolation::error(
                id,
                "status",
                format!(
                    "unknown status '{}' (expected one of {})",
                    status,
                    joined(ContentStatus::ALL.iter().map(|s| s.as_str()))
                ),
            ));
        }
        Some(_) => {}
    }

    match lifecycle.version {
        None => report.push(SchemaViolation::warning(id, "version", "missing")),
        Some(0) => report.push(SchemaViolation::error(id, "version", "must be at least 1")),
        Some(_) => {}
    }

    for (field, value) in [
        ("createdAt", &lifecycle.created_at),
        ("updatedAt", &lifecycle.updated_at),
    ] {
        match value {
            None => report.push(SchemaViolation::warning(id, field, "missing")),
            Some(value) if !is_valid_date(value) => {
                report.push(SchemaViolation::error(
                    id,
                    field,
                    format!("'{}' is not a YYYY-MM-DD or RFC 3339 date", value),
                ));
            }
            Some(_) => {}
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

fn joined<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcontent_types::{
        ConditionEntry, CrossReference, EducationalEntry, ExamRelevance, KeyTerm, Lifecycle,
    };

    fn make_level(rank: u8) -> LevelContent {
        LevelContent {
            level: rank,
            summary: format!("Summary {}", rank),
            explanation: format!("Explanation {}", rank),
            key_terms: vec![KeyTerm {
                term: "nephron".into(),
                definition: "Filtering unit of the kidney".into(),
            }],
            ..Default::default()
        }
    }

    fn make_lifecycle() -> Lifecycle {
        Lifecycle {
            version: Some(1),
            status: Some("published".into()),
            created_at: Some("2025-01-15".into()),
            updated_at: Some("2025-01-15T10:00:00Z".into()),
            contributors: vec![],
        }
    }

    fn make_educational(id: &str, ranks: &[u8]) -> ContentRecord {
        let mut record = ContentRecord::new(
            id,
            "Dialysis",
            ContentBody::Educational(EducationalEntry {
                content_type: "condition".into(),
                levels: ranks.iter().copied().map(make_level).collect(),
            }),
        );
        record.name_es = Some("Diálisis".into());
        record.lifecycle = make_lifecycle();
        record
    }

    fn make_condition(id: &str, category: &str) -> ContentRecord {
        let mut record = ContentRecord::new(
            id,
            "Condition",
            ContentBody::Condition(ConditionEntry {
                category: category.into(),
                ..Default::default()
            }),
        );
        record.name_es = Some("Condición".into());
        record.lifecycle = make_lifecycle();
        record
    }

    fn make_reference(target: &str, relationship: &str) -> CrossReference {
        CrossReference {
            target_id: target.into(),
            target_type: "condition".into(),
            relationship: relationship.into(),
            label: String::new(),
        }
    }

    #[test]
    fn test_valid_record_has_no_violations() {
        let report = validate_record(&make_educational("concept-dialysis", &[1, 2, 3, 4, 5]));
        assert!(report.is_valid());
        assert!(report.violations().is_empty());
    }

    #[test]
    fn test_missing_level_is_reported_with_rank() {
        let report = validate_record(&make_educational("concept-dialysis", &[1, 2, 4, 5]));
        assert!(!report.is_valid());
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].record_id, "concept-dialysis");
        assert_eq!(errors[0].field, "levels.3");
        assert!(errors[0].message.contains('3'));
    }

    #[test]
    fn test_unexpected_and_mismatched_levels() {
        let mut record = make_educational("x", &[1, 2, 3, 4, 5, 6]);
        if let ContentBody::Educational(entry) = &mut record.body {
            entry.levels.insert(2, make_level(4));
        }
        let report = validate_record(&record);
        let fields: Vec<_> = report.errors().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"levels.6"));
        assert!(fields.contains(&"levels.2.level"));
    }

    #[test]
    fn test_educational_without_levels() {
        let report = validate_record(&make_educational("x", &[]));
        assert_eq!(report.errors().next().unwrap().field, "levels");
    }

    #[test]
    fn test_empty_key_terms_is_warning() {
        let mut record = make_educational("x", &[1, 2, 3, 4, 5]);
        if let ContentBody::Educational(entry) = &mut record.body {
            let mut level = make_level(1);
            level.key_terms.clear();
            entry.levels.insert(1, level);
        }
        let report = validate_record(&record);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.warnings().next().unwrap().field, "levels.1.keyTerms");
    }

    #[test]
    fn test_unknown_category() {
        let report = validate_record(&make_condition("ra", "joints"));
        let error = report.errors().next().unwrap();
        assert_eq!(error.field, "category");
        assert!(error.message.contains("joints"));
    }

    #[test]
    fn test_cross_reference_shape() {
        let mut record = make_condition("sle", "systemic");
        record.cross_references.push(make_reference("", "related"));
        record.cross_references.push(make_reference("aps", "cousin"));
        let report = validate_record(&record);
        let fields: Vec<_> = report.errors().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["crossReferences[0].targetId", "crossReferences[1].relationship"]
        );
    }

    #[test]
    fn test_lifecycle_rules() {
        let mut record = make_condition("sle", "systemic");
        record.lifecycle.version = Some(0);
        record.lifecycle.status = Some("archived".into());
        record.lifecycle.created_at = Some("15/01/2025".into());
        record.tags.clinical_relevance = Some("urgent".into());
        let report = validate_record(&record);
        let fields: Vec<_> = report.errors().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"version"));
        assert!(fields.contains(&"status"));
        assert!(fields.contains(&"createdAt"));
        assert!(fields.contains(&"tags.clinicalRelevance"));
    }

    #[test]
    fn test_missing_lifecycle_is_warning() {
        let mut record = make_condition("sle", "systemic");
        record.lifecycle = Lifecycle::default();
        let report = validate_record(&record);
        assert!(report.is_valid());
        let fields: Vec<_> = report.warnings().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["status", "version", "createdAt", "updatedAt"]);
    }

    #[test]
    fn test_missing_spanish_name_is_warning() {
        let mut record = make_condition("sle", "systemic");
        record.name_es = Some("  ".into());
        let report = validate_record(&record);
        assert!(report.is_valid());
        assert_eq!(report.warnings().next().unwrap().field, "nameEs");
    }

    #[test]
    fn test_placeholder_text_is_error() {
        let mut record = make_educational("x", &[1, 2, 3, 4, 5]);
        record.name = "Dialysis TODO".into();
        record.name_es = Some("FIXME".into());
        if let ContentBody::Educational(entry) = &mut record.body {
            let mut level = make_level(2);
            level.clinical_notes = Some("Placeholder, fill in later".into());
            level.key_terms[0].definition = "todo".into();
            entry.levels.insert(2, level);
        }

        let report = validate_record(&record);
        let fields: Vec<_> = report.errors().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["name", "nameEs", "levels.2.clinicalNotes", "levels.2.keyTerms[0]"]
        );
    }

    #[test]
    fn test_contains_placeholder_needs_whole_word() {
        assert!(contains_placeholder("This is TODO content"));
        assert!(contains_placeholder("fixme: dosing"));
        assert!(!contains_placeholder("Mastodon"));
        assert!(!contains_placeholder("Placeholders are fine"));
    }

    #[test]
    fn test_icd_code_format_is_warning() {
        assert!(is_valid_icd_code("M32"));
        assert!(is_valid_icd_code("K90.0"));
        assert!(is_valid_icd_code("D68.61"));
        assert!(!is_valid_icd_code("m32"));
        assert!(!is_valid_icd_code("M32.12345"));

        let mut record = make_condition("sle", "systemic");
        if let ContentBody::Condition(entry) = &mut record.body {
            entry.icd_code = "lupus".into();
        }
        record.tags.systems = vec!["ICD-11: 4A40.0".into(), "ICD-11:M32".into()];
        let report = validate_record(&record);
        assert!(report.is_valid());
        let fields: Vec<_> = report.warnings().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["icdCode", "tags.systems[0]"]);
    }

    #[test]
    fn test_exam_relevance_rules() {
        let mut record = make_condition("sle", "systemic");
        let mut exams = ExamRelevance {
            shelf: vec!["internal-medicine".into(), " ".into()],
            ..Default::default()
        };
        exams.other.insert("comlex".into(), vec!["level1".into()]);
        record.tags.exam_relevance = Some(exams);

        let report = validate_record(&record);
        let errors: Vec<_> = report.errors().map(|v| v.field.as_str()).collect();
        assert_eq!(errors, vec!["tags.examRelevance.shelf[1]"]);
        let warnings: Vec<_> = report.warnings().map(|v| v.field.as_str()).collect();
        assert_eq!(warnings, vec!["tags.examRelevance.comlex"]);
    }

    #[test]
    fn test_collection_violations_carry_positions() {
        let records = vec![
            make_condition("sle", "systemic"),
            make_condition("sle", "bogus"),
            make_condition("ra", "rheumatologic"),
        ];
        let report = validate_collection(&records);
        assert!(report.errors().all(|v| v.index == Some(1)));
        assert_eq!(report.rejected_positions(), HashSet::from([1]));
        assert_eq!(validate_record(&records[1]).errors().next().unwrap().index, None);
    }

    #[test]
    fn test_collection_duplicates_and_dangling() {
        let mut sle = make_condition("sle", "systemic");
        sle.cross_references.push(make_reference("ra", "related"));
        sle.cross_references.push(make_reference("missing", "see-also"));
        let records = vec![sle, make_condition("ra", "rheumatologic"), make_condition("ra", "rheumatologic")];

        let report = validate_collection(&records);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors().next().unwrap().record_id, "ra");
        let dangling: Vec<_> = report.warnings().collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].field, "crossReferences[1].targetId");
    }

    #[test]
    fn test_into_result() {
        let ok = validate_record(&make_condition("sle", "systemic"));
        assert!(ok.into_result().is_ok());

        let single = validate_record(&make_condition("sle", "bogus"));
        assert!(matches!(
            single.into_result(),
            Err(ContentError::SchemaViolation { .. })
        ));

        let mut record = make_condition("", "bogus");
        record.name.clear();
        match validate_record(&record).into_result() {
            Err(ContentError::InvalidBatch { count, first }) => {
                assert_eq!(count, 3);
                assert!(first.contains("id"));
            }
            other => panic!("expected InvalidBatch, got {:?}", other),
        }
    }

    #[test]
    fn test_date_formats() {
        assert!(is_valid_date("2025-01-15"));
        assert!(is_valid_date("2025-01-15T10:00:00+02:00"));
        assert!(!is_valid_date("2025-13-01"));
        assert!(!is_valid_date("yesterday"));
    }
}
