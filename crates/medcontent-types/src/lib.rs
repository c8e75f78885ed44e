//! # medcontent-types
//!
//! Type definitions for structured medical-education content.
//!
//! This crate provides the content model shared by the loader and the query
//! service: a [`ContentRecord`] envelope around a family-specific
//! [`ContentBody`] (autoimmune conditions, pain management, ethics, leveled
//! educational content, medications, assessment scales), leveled
//! explanations, cross-references and classification tags.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Records use camelCase JSON names and a `kind` discriminator.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use medcontent_types::{
//!     Category, ConditionEntry, ContentBody, ContentRecord, CrossReference, Searchable,
//! };
//!
//! let mut record = ContentRecord::new(
//!     "systemic-lupus-erythematosus",
//!     "Systemic Lupus Erythematosus (SLE)",
//!     ContentBody::Condition(ConditionEntry {
//!         category: "systemic".to_string(),
//!         description: "Classic butterfly (malar) rash.".to_string(),
//!         autoantibodies: vec!["Anti-dsDNA".to_string()],
//!         ..Default::default()
//!     }),
//! );
//! record.cross_references.push(CrossReference {
//!     target_id: "antiphospholipid-syndrome".to_string(),
//!     target_type: "condition".to_string(),
//!     relationship: "related".to_string(),
//!     label: "Secondary APS".to_string(),
//! });
//!
//! assert_eq!(record.category(), Category::parse_qualified("condition:systemic"));
//! assert!(record.levels().is_none());
//! ```
//!
//! ## Without Serde
//!
//! ```toml
//! [dependencies]
//! medcontent-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod category;
mod enums;
mod id;
mod level;
mod metadata;
mod record;
mod reference;
pub mod well_known;

// Re-export all public types at crate root
pub use category::Category;
pub use enums::{
    AutoimmuneCategory, ClinicalRelevance, ContentKind, ContentStatus, ContentType,
    EthicsCategory, PainCategory, RelationshipType, ScaleCategory, TherapeuticArea,
};
pub use id::ContentId;
pub use level::{ComplexityLevel, InvalidLevelKey, KeyTerm, LevelContent, Levels};
pub use metadata::{Citation, ContentTags, ExamRelevance, Lifecycle, MediaAsset};
pub use record::{
    AssessmentScaleEntry, ConditionEntry, ContentBody, ContentRecord, EducationalEntry,
    EthicsEntry, MedicationEntry, PainEntry, Searchable,
};
pub use reference::CrossReference;
