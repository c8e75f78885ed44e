//! Content records.
//!
//! A [`ContentRecord`] is an envelope shared by every family (id, names,
//! cross-references, tags, citations, media, lifecycle) around a
//! family-specific [`ContentBody`] selected by the `kind` tag.

use crate::{
    AutoimmuneCategory, Category, Citation, ContentId, ContentKind, ContentTags, ContentType,
    CrossReference, EthicsCategory, LevelContent, Levels, Lifecycle, MediaAsset, PainCategory,
    ScaleCategory, TherapeuticArea,
};

/// Minimal interface the query layer depends on.
pub trait Searchable {
    /// Primary key.
    fn id(&self) -> &str;

    /// Typed category, or `None` if the authored value is not in the
    /// family's enumeration.
    fn category(&self) -> Option<Category>;

    /// Every free-text field a reader would expect search to scan.
    fn searchable_text(&self) -> Vec<&str>;
}

/// A single addressable unit of content.
///
/// Top-level JSON keys outside this shape (for example an `icd11Code` next
/// to `icdCode`) are ignored on decode and are not written back.
///
/// # Examples
///
/// ```
/// use medcontent_types::{
///     AutoimmuneCategory, Category, ConditionEntry, ContentBody, ContentRecord, Searchable,
/// };
///
/// let record = ContentRecord::new(
///     "celiac-disease",
///     "Celiac Disease",
///     ContentBody::Condition(ConditionEntry {
///         category: "gastrointestinal".to_string(),
///         description: "Gluten-triggered enteropathy.".to_string(),
///         ..Default::default()
///     }),
/// );
///
/// assert_eq!(
///     record.category(),
///     Some(Category::Autoimmune(AutoimmuneCategory::Gastrointestinal))
/// );
/// assert!(record.searchable_text().contains(&"Gluten-triggered enteropathy."));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContentRecord {
    /// Globally unique, stable identifier.
    pub id: ContentId,
    /// Display name.
    pub name: String,
    /// Spanish display name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name_es: Option<String>,
    /// Synonyms and abbreviations.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub alternate_names: Vec<String>,
    /// Family-specific payload.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub body: ContentBody,
    /// Ordered weak links to other records.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cross_references: Vec<CrossReference>,
    /// Classification metadata.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: ContentTags,
    /// Sources.
    #[cfg_attr(feature = "serde", serde(default))]
    pub citations: Vec<Citation>,
    /// Attached media.
    #[cfg_attr(feature = "serde", serde(default))]
    pub media: Vec<MediaAsset>,
    /// Version and status bookkeeping.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub lifecycle: Lifecycle,
}

impl ContentRecord {
    /// Creates a record with empty metadata.
    pub fn new(id: impl Into<ContentId>, name: impl Into<String>, body: ContentBody) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_es: None,
            alternate_names: Vec::new(),
            body,
            cross_references: Vec::new(),
            tags: ContentTags::default(),
            citations: Vec::new(),
            media: Vec::new(),
            lifecycle: Lifecycle::default(),
        }
    }

    /// Returns the family of this record.
    pub fn kind(&self) -> ContentKind {
        self.body.kind()
    }

    /// Returns the category exactly as authored.
    pub fn raw_category(&self) -> &str {
        self.body.raw_category()
    }

    /// Returns the leveled content, if this family carries any.
    pub fn levels(&self) -> Option<&Levels> {
        match &self.body {
            ContentBody::Educational(entry) => Some(&entry.levels),
            ContentBody::Medication(entry) => entry.levels.as_ref(),
            _ => None,
        }
    }

    /// Returns the content for one rank, if present.
    pub fn level(&self, rank: u8) -> Option<&LevelContent> {
        self.levels()?.get_rank(rank)
    }
}

impl Searchable for ContentRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<Category> {
        Category::parse(self.kind(), self.raw_category())
    }

    fn searchable_text(&self) -> Vec<&str> {
        let mut out = vec![self.id.as_str(), self.name.as_str()];
        if let Some(name_es) = &self.name_es {
            out.push(name_es);
        }
        out.extend(self.alternate_names.iter().map(String::as_str));
        out.push(self.raw_category());
        self.body.collect_text(&mut out);
        out.extend(self.tags.keywords.iter().map(String::as_str));
        out
    }
}

/// Family-specific payload, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum ContentBody {
    /// Autoimmune condition.
    Condition(ConditionEntry),
    /// Pain-management entry.
    PainManagement(PainEntry),
    /// Ethics topic.
    Ethics(EthicsEntry),
    /// Leveled educational content.
    Educational(EducationalEntry),
    /// Medication.
    Medication(MedicationEntry),
    /// Pain-assessment scale.
    AssessmentScale(AssessmentScaleEntry),
}

impl ContentBody {
    /// Returns the family discriminator.
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Condition(_) => ContentKind::Condition,
            Self::PainManagement(_) => ContentKind::PainManagement,
            Self::Ethics(_) => ContentKind::Ethics,
            Self::Educational(_) => ContentKind::Educational,
            Self::Medication(_) => ContentKind::Medication,
            Self::AssessmentScale(_) => ContentKind::AssessmentScale,
        }
    }

    /// Returns the category (or content type) exactly as authored.
    pub fn raw_category(&self) -> &str {
        match self {
            Self::Condition(e) => e.category.as_str(),
            Self::PainManagement(e) => e.category.as_str(),
            Self::Ethics(e) => e.category.as_str(),
            Self::Educational(e) => e.content_type.as_str(),
            Self::Medication(e) => e.category.as_str(),
            Self::AssessmentScale(e) => e.category.as_str(),
        }
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Condition(e) => {
                out.extend([
                    e.icd_code.as_str(),
                    e.description.as_str(),
                    e.pathogenesis.as_str(),
                    e.treatment.as_str(),
                    e.prognosis.as_str(),
                ]);
                push_all(out, [&e.autoantibodies, &e.clinical_features, &e.diagnosis]);
            }
            Self::PainManagement(e) => {
                out.extend([
                    e.description.as_str(),
                    e.pathophysiology.as_str(),
                    e.assessment.as_str(),
                    e.management.as_str(),
                ]);
                push_all(
                    out,
                    [&e.medications, &e.side_effects, &e.key_pearls, &e.references],
                );
            }
            Self::Ethics(e) => {
                out.push(&e.description);
                push_all(
                    out,
                    [
                        &e.ethical_principles,
                        &e.legal_considerations,
                        &e.clinical_scenarios,
                        &e.decision_framework,
                        &e.key_pearls,
                        &e.references,
                    ],
                );
            }
            Self::Educational(e) => {
                for (_, level) in e.levels.iter() {
                    level.collect_text(out);
                }
            }
            Self::Medication(e) => {
                out.extend([
                    e.generic_name.as_str(),
                    e.drug_class.as_str(),
                    e.mechanism_of_action.as_str(),
                ]);
                push_all(out, [&e.brand_names, &e.formulations]);
                if let Some(levels) = &e.levels {
                    for (_, level) in levels.iter() {
                        level.collect_text(out);
                    }
                }
            }
            Self::AssessmentScale(e) => {
                out.extend([
                    e.description.as_str(),
                    e.population.as_str(),
                    e.score_range.as_str(),
                    e.administration.as_str(),
                ]);
                push_all(out, [&e.interpretation, &e.limitations]);
            }
        }
    }
}

fn push_all<'a, const N: usize>(out: &mut Vec<&'a str>, lists: [&'a Vec<String>; N]) {
    for list in lists {
        out.extend(list.iter().map(String::as_str));
    }
}

/// Autoimmune condition entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ConditionEntry {
    /// Category, as authored.
    pub category: String,
    /// ICD-10 code.
    #[cfg_attr(feature = "serde", serde(default))]
    pub icd_code: String,
    /// Clinical summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Mechanism of disease.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pathogenesis: String,
    /// Associated autoantibodies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub autoantibodies: Vec<String>,
    /// Presenting features.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clinical_features: Vec<String>,
    /// Diagnostic workup.
    #[cfg_attr(feature = "serde", serde(default))]
    pub diagnosis: Vec<String>,
    /// Treatment summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub treatment: String,
    /// Prognosis summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prognosis: String,
}

impl ConditionEntry {
    /// Returns the category enum value.
    pub fn category(&self) -> Option<AutoimmuneCategory> {
        AutoimmuneCategory::parse(&self.category)
    }
}

/// Pain-management entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PainEntry {
    /// Category, as authored.
    pub category: String,
    /// Summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Pain mechanism.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pathophysiology: String,
    /// How to assess.
    #[cfg_attr(feature = "serde", serde(default))]
    pub assessment: String,
    /// How to manage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub management: String,
    /// Medications with doses.
    #[cfg_attr(feature = "serde", serde(default))]
    pub medications: Vec<String>,
    /// Adverse effects.
    #[cfg_attr(feature = "serde", serde(default))]
    pub side_effects: Vec<String>,
    /// Teaching pearls.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key_pearls: Vec<String>,
    /// Literature references.
    #[cfg_attr(feature = "serde", serde(default))]
    pub references: Vec<String>,
}

impl PainEntry {
    /// Returns the category enum value.
    pub fn category(&self) -> Option<PainCategory> {
        PainCategory::parse(&self.category)
    }
}

/// Medical ethics topic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EthicsEntry {
    /// Category, as authored.
    pub category: String,
    /// Summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Principles in play.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ethical_principles: Vec<String>,
    /// Legal considerations.
    #[cfg_attr(feature = "serde", serde(default))]
    pub legal_considerations: Vec<String>,
    /// Illustrative scenarios.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clinical_scenarios: Vec<String>,
    /// Steps for reaching a decision.
    #[cfg_attr(feature = "serde", serde(default))]
    pub decision_framework: Vec<String>,
    /// Teaching pearls.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key_pearls: Vec<String>,
    /// Literature references.
    #[cfg_attr(feature = "serde", serde(default))]
    pub references: Vec<String>,
}

impl EthicsEntry {
    /// Returns the category enum value.
    pub fn category(&self) -> Option<EthicsCategory> {
        EthicsCategory::parse(&self.category)
    }
}

/// Leveled educational content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EducationalEntry {
    /// Content type, as authored.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub content_type: String,
    /// Explanations for every complexity rank.
    #[cfg_attr(feature = "serde", serde(default))]
    pub levels: Levels,
}

impl EducationalEntry {
    /// Returns the content type enum value.
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::parse(&self.content_type)
    }
}

/// Medication monograph.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MedicationEntry {
    /// Therapeutic area, as authored.
    pub category: String,
    /// Generic (INN) name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub generic_name: String,
    /// Brand names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand_names: Vec<String>,
    /// Pharmacologic class (e.g. `"statin"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub drug_class: String,
    /// Dosage forms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub formulations: Vec<String>,
    /// Mechanism of action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mechanism_of_action: String,
    /// Optional leveled explanations.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub levels: Option<Levels>,
}

impl MedicationEntry {
    /// Returns the therapeutic area enum value.
    pub fn category(&self) -> Option<TherapeuticArea> {
        TherapeuticArea::parse(&self.category)
    }
}

/// Pain-assessment scale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AssessmentScaleEntry {
    /// Scale category, as authored.
    pub category: String,
    /// What the scale measures.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Intended population.
    #[cfg_attr(feature = "serde", serde(default))]
    pub population: String,
    /// Score range (e.g. `"0-10"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub score_range: String,
    /// How it is administered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub administration: String,
    /// Score bands and their meaning.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interpretation: Vec<String>,
    /// Known limitations.
    #[cfg_attr(feature = "serde", serde(default))]
    pub limitations: Vec<String>,
}

impl AssessmentScaleEntry {
    /// Returns the scale category enum value.
    pub fn category(&self) -> Option<ScaleCategory> {
        ScaleCategory::parse(&self.category)
    }
}
