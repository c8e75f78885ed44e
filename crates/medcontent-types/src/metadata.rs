//! Classification tags, citations, media and lifecycle bookkeeping.
//!
//! None of these are consumed by queries except tag keywords, which are part
//! of the searchable text. They must survive a load/serialize cycle as
//! authored.

use std::collections::BTreeMap;

use crate::{ClinicalRelevance, ContentStatus};

/// Exam boards a record is relevant to.
///
/// Boards outside `usmle`, `nbme` and `shelf` are kept in `other` so they
/// survive a load/serialize cycle and can be reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExamRelevance {
    /// USMLE steps (e.g. `"step1"`).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub usmle: Vec<String>,
    /// NBME subject exams.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub nbme: Vec<String>,
    /// Shelf exams (e.g. `"internal-medicine"`).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub shelf: Vec<String>,
    /// Unrecognised boards, as authored.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub other: BTreeMap<String, Vec<String>>,
}

/// Classification metadata used for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContentTags {
    /// Body systems (e.g. `"renal"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub systems: Vec<String>,
    /// Topics (e.g. `"nephrology"`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub topics: Vec<String>,
    /// Free keywords.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keywords: Vec<String>,
    /// Clinical relevance, as authored.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub clinical_relevance: Option<String>,
    /// Exam relevance.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub exam_relevance: Option<ExamRelevance>,
}

impl ContentTags {
    /// Returns the clinical relevance enum value.
    ///
    /// Returns `None` if absent or not recognized.
    pub fn clinical_relevance(&self) -> Option<ClinicalRelevance> {
        self.clinical_relevance
            .as_deref()
            .and_then(ClinicalRelevance::parse)
    }

    /// Returns true if any system, topic or keyword equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.systems
            .iter()
            .chain(&self.topics)
            .chain(&self.keywords)
            .any(|t| t.to_lowercase() == tag)
    }
}

/// A bibliographic source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Citation {
    /// Id local to the citing record (e.g. `"ref-1"`).
    pub id: String,
    /// Source type (`"article"`, `"textbook"`, ...).
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub citation_type: String,
    /// Title.
    pub title: String,
    /// Authors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub authors: Vec<String>,
    /// Journal, publisher or site.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub source: Option<String>,
    /// Publication year.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub year: Option<u16>,
    /// Link.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url: Option<String>,
    /// License of the cited material.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub license: Option<String>,
}

/// An image, video or diagram attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaAsset {
    /// Asset id.
    pub id: String,
    /// Media type (`"image"`, `"video"`, `"diagram"`).
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub media_type: String,
    /// Location.
    pub url: String,
    /// Caption.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub caption: Option<String>,
    /// License.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub license: Option<String>,
}

/// Version and status bookkeeping, kept exactly as authored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Lifecycle {
    /// Content version, starting at 1.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub version: Option<u32>,
    /// Editorial status, as authored.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub status: Option<String>,
    /// Creation date (`YYYY-MM-DD` or RFC 3339).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub created_at: Option<String>,
    /// Last update date (`YYYY-MM-DD` or RFC 3339).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub updated_at: Option<String>,
    /// Authors or teams.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub contributors: Vec<String>,
}

impl Lifecycle {
    /// Returns the status enum value.
    ///
    /// Returns `None` if absent or not recognized.
    pub fn status(&self) -> Option<ContentStatus> {
        self.status.as_deref().and_then(ContentStatus::parse)
    }

    /// Returns true if the record is published.
    pub fn is_published(&self) -> bool {
        self.status() == Some(ContentStatus::Published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag_ignores_case() {
        let tags = ContentTags {
            systems: vec!["Renal".into()],
            keywords: vec!["dialysis".into()],
            ..Default::default()
        };
        assert!(tags.has_tag("renal"));
        assert!(tags.has_tag("DIALYSIS"));
        assert!(!tags.has_tag("dial"));
    }

    #[test]
    fn test_lifecycle_status() {
        let lifecycle = Lifecycle {
            status: Some("published".into()),
            ..Default::default()
        };
        assert!(lifecycle.is_published());
        assert_eq!(Lifecycle::default().status(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_unknown_exam_board_survives_round_trip() {
        let exams: ExamRelevance =
            serde_json::from_str(r#"{"usmle":["step1"],"comlex":["level1"]}"#).unwrap();
        assert_eq!(exams.usmle, vec!["step1"]);
        assert_eq!(exams.other["comlex"], vec!["level1"]);

        let json = serde_json::to_value(&exams).unwrap();
        assert_eq!(json["comlex"][0], "level1");
        assert!(json.get("nbme").is_none());
    }
}
