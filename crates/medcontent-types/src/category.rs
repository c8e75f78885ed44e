//! Cross-family category.
//!
//! Each content family has its own closed category enumeration. `Category`
//! is the union used by category filtering, so one filter set can span
//! several families.

use crate::{
    AutoimmuneCategory, ContentKind, ContentType, EthicsCategory, PainCategory, ScaleCategory,
    TherapeuticArea,
};

/// A category value qualified by the family it belongs to.
///
/// Two families may share a spelling (`endocrine` is both an autoimmune
/// category and a therapeutic area); the qualified form keeps them apart.
///
/// # Examples
///
/// ```
/// use medcontent_types::{AutoimmuneCategory, Category, ContentKind};
///
/// let category = Category::parse_qualified("condition:systemic").unwrap();
/// assert_eq!(category, Category::Autoimmune(AutoimmuneCategory::Systemic));
/// assert_eq!(category.kind(), ContentKind::Condition);
/// assert_eq!(category.to_string(), "condition:systemic");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Autoimmune condition category.
    Autoimmune(AutoimmuneCategory),
    /// Pain-management category.
    Pain(PainCategory),
    /// Ethics category.
    Ethics(EthicsCategory),
    /// Educational content type.
    Educational(ContentType),
    /// Medication therapeutic area.
    Medication(TherapeuticArea),
    /// Assessment scale category.
    AssessmentScale(ScaleCategory),
}

impl Category {
    /// Returns the family this category belongs to.
    pub fn kind(self) -> ContentKind {
        match self {
            Self::Autoimmune(_) => ContentKind::Condition,
            Self::Pain(_) => ContentKind::PainManagement,
            Self::Ethics(_) => ContentKind::Ethics,
            Self::Educational(_) => ContentKind::Educational,
            Self::Medication(_) => ContentKind::Medication,
            Self::AssessmentScale(_) => ContentKind::AssessmentScale,
        }
    }

    /// Returns the unqualified authored value (e.g. `"systemic"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Autoimmune(c) => c.as_str(),
            Self::Pain(c) => c.as_str(),
            Self::Ethics(c) => c.as_str(),
            Self::Educational(c) => c.as_str(),
            Self::Medication(c) => c.as_str(),
            Self::AssessmentScale(c) => c.as_str(),
        }
    }

    /// Parses a category value within a given family.
    ///
    /// Returns `None` if the value is not in that family's enumeration.
    pub fn parse(kind: ContentKind, value: &str) -> Option<Self> {
        match kind {
            ContentKind::Condition => AutoimmuneCategory::parse(value).map(Self::Autoimmune),
            ContentKind::PainManagement => PainCategory::parse(value).map(Self::Pain),
            ContentKind::Ethics => EthicsCategory::parse(value).map(Self::Ethics),
            ContentKind::Educational => ContentType::parse(value).map(Self::Educational),
            ContentKind::Medication => TherapeuticArea::parse(value).map(Self::Medication),
            ContentKind::AssessmentScale => ScaleCategory::parse(value).map(Self::AssessmentScale),
        }
    }

    /// Parses the qualified `kind:value` form produced by `Display`.
    pub fn parse_qualified(value: &str) -> Option<Self> {
        let (kind, category) = value.split_once(':')?;
        Self::parse(ContentKind::parse(kind)?, category)
    }

    /// Returns every family's interpretation of an unqualified value.
    ///
    /// The result is empty when no family declares the value.
    pub fn parse_any(value: &str) -> Vec<Self> {
        ContentKind::ALL
            .iter()
            .filter_map(|kind| Self::parse(*kind, value))
            .collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse_qualified(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category '{}'", value)))
    }
}
