//! # medcontent-loader
//!
//! Loader, validator and in-memory query store for medical-education
//! content.
//!
//! ## Features
//!
//! - `parallel` (default): Decodes content files concurrently and enables
//!   [`ContentStore::search_parallel`] via rayon.
//!
//! ## Usage
//!
//! ```no_run
//! use std::collections::HashSet;
//!
//! use medcontent_loader::{ContentStore, LoadConfig};
//! use medcontent_types::Category;
//!
//! let (store, stats) = ContentStore::load("data/seed.json", &LoadConfig::default())?;
//! println!("{} records from {} files", stats.records, stats.files);
//!
//! let lupus = store.get_by_id("systemic-lupus-erythematosus");
//! let rash = store.search("butterfly");
//! let systemic: HashSet<_> = Category::parse_any("systemic").into_iter().collect();
//! let conditions = store.filter_by_category(&systemic);
//! # Ok::<(), medcontent_loader::ContentError>(())
//! ```

#![warn(missing_docs)]

pub mod json;
pub mod loader;
pub mod query;
mod shared;
mod store;
pub mod tabular;
mod types;
pub mod validate;

pub use loader::{discover_content_files, read_content_file, read_content_files};
pub use shared::SharedContentStore;
pub use store::{ContentStore, ResolvedReference};
pub use types::{
    ContentBatch, ContentError, ContentFiles, ContentResult, FileFormat, LoadConfig, LoadStats,
};
pub use validate::{validate_collection, validate_record, SchemaViolation, Severity, ValidationReport};

// Re-export medcontent-types for convenience
pub use medcontent_types;
