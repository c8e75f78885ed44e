//! # medcontent-service
//!
//! Query surface for medical-education content collections.
//!
//! This crate exposes a content collection loaded by the
//! `medcontent-loader` crate through a [`QueryService`]: one-shot queries
//! for the `medcontent` binary, and a line-oriented query shell that can
//! reload the collection without interrupting queries already running.
//!
//! ## Example
//!
//! ```no_run
//! use medcontent_loader::LoadConfig;
//! use medcontent_service::{Command, Format, QueryService};
//!
//! let (service, _stats) = QueryService::load("data/seed.json", LoadConfig::default())?;
//! let response = service.execute(&Command::Search("butterfly".into()))?;
//! print!("{}", response.render(Format::Text)?);
//! # Ok::<(), medcontent_service::ServiceError>(())
//! ```

#![warn(missing_docs)]

mod server;
mod views;

pub use server::{parse_categories, Command, QueryService, ServiceError, ServiceResult};
pub use views::{
    CountView, Format, LoadView, RecordSummary, ReferenceView, ReferencesView, Response,
    ValidationView,
};
