//! Content identifier type.

/// Identifier of a content record.
///
/// Ids are stable slugs (`systemic-lupus-erythematosus`, `concept-dialysis`)
/// used as the primary key and as the target of cross-references. Matching
/// is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use medcontent_types::ContentId;
///
/// let id: ContentId = "celiac-disease".to_string();
/// assert_ne!(id, "Celiac-Disease");
/// ```
pub type ContentId = String;
