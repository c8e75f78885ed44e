//! Well-known constants shared by the loader and the service.
//!
//! # Examples
//!
//! ```
//! use medcontent_types::well_known;
//!
//! assert_eq!(well_known::LIST_SEPARATOR, '|');
//! assert!(well_known::EXAM_BOARDS.contains(&"usmle"));
//! ```

// =============================================================================
// Leveled content
// =============================================================================

/// Number of complexity ranks a complete `levels` map carries.
pub const LEVEL_COUNT: usize = 5;

// =============================================================================
// Tabular formats
// =============================================================================

/// Separator between items of a list-valued cell in a tab-separated table.
pub const LIST_SEPARATOR: char = '|';

/// Field delimiter of tab-separated tables.
pub const FIELD_DELIMITER: u8 = b'\t';

// =============================================================================
// Tags
// =============================================================================

/// Exam boards recognised in `examRelevance`.
pub const EXAM_BOARDS: [&str; 3] = ["usmle", "nbme", "shelf"];
