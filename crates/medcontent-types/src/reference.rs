//! Cross-references between content records.

use crate::{ContentId, ContentKind, RelationshipType};

/// A named, non-owning link from one record to another.
///
/// The target is referenced by id only. Its lifetime is independent of the
/// referring record, so a reference whose target is absent from the
/// collection does not make the referring record invalid.
///
/// # Examples
///
/// ```
/// use medcontent_types::{CrossReference, RelationshipType};
///
/// let reference = CrossReference {
///     target_id: "antiphospholipid-syndrome".to_string(),
///     target_type: "condition".to_string(),
///     relationship: "related".to_string(),
///     label: "Secondary APS in SLE".to_string(),
/// };
///
/// assert_eq!(reference.relationship_type(), Some(RelationshipType::Related));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CrossReference {
    /// Id of the referenced record.
    pub target_id: ContentId,
    /// Family or content type of the target, as authored.
    pub target_type: String,
    /// Relationship name, as authored.
    pub relationship: String,
    /// Human-readable label for the link.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
}

impl CrossReference {
    /// Returns the relationship enum value.
    ///
    /// Returns `None` if the relationship is not recognized.
    pub fn relationship_type(&self) -> Option<RelationshipType> {
        RelationshipType::parse(&self.relationship)
    }

    /// Returns the target family, if `target_type` names one.
    pub fn target_kind(&self) -> Option<ContentKind> {
        ContentKind::parse(&self.target_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_relationship() {
        let reference = CrossReference {
            target_id: "x".into(),
            target_type: "condition".into(),
            relationship: "cousin".into(),
            label: String::new(),
        };
        assert_eq!(reference.relationship_type(), None);
        assert_eq!(reference.target_kind(), Some(ContentKind::Condition));
    }
}
