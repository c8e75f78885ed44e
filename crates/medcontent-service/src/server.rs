//! Query service over a reloadable content collection.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use medcontent_loader::tabular::parse;
use medcontent_loader::{
    ContentError, ContentStore, LoadConfig, LoadStats, SharedContentStore,
};
use medcontent_types::Category;
use thiserror::Error;

use crate::views::{self, Format, ReferencesView, Response};

/// Errors raised while serving queries.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Loading or validating content failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Reading commands or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A shell line could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// One query against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up a record by id.
    Get(String),
    /// Records in any of the given categories.
    Filter(Vec<String>),
    /// Case-insensitive text search.
    Search(String),
    /// Collection size.
    Count,
    /// Re-validate the loaded collection.
    Validate,
    /// Cross-references and backlinks of a record.
    Refs(String),
    /// One complexity level of a leveled record.
    Level(String, String),
    /// Re-read the data path and swap the collection.
    Reload,
    /// List shell commands.
    Help,
}

const SHELL_HELP: &str = "commands:
  get <id>
  filter <category>...      (kind:value or a bare value)
  search <text>
  count
  validate
  refs <id>
  level <id> <1-5>
  reload
  help
  quit";

impl Command {
    /// Parses one shell line.
    ///
    /// Returns `Ok(None)` for blank lines and `quit`/`exit`.
    pub fn parse_line(line: &str) -> ServiceResult<Option<Self>> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (word, args.as_slice()) {
            ("", _) | ("quit", _) | ("exit", _) => return Ok(None),
            ("get", [id]) => Self::Get(id.to_string()),
            ("filter", categories) if !categories.is_empty() => {
                Self::Filter(categories.iter().map(|c| c.to_string()).collect())
            }
            // The query keeps its inner spacing.
            ("search", _) => Self::Search(rest.to_string()),
            ("count", []) => Self::Count,
            ("validate", []) => Self::Validate,
            ("refs", [id]) => Self::Refs(id.to_string()),
            ("level", [id, rank]) => Self::Level(id.to_string(), rank.to_string()),
            ("reload", []) => Self::Reload,
            ("help", _) => Self::Help,
            _ => return Err(ServiceError::InvalidCommand(line.to_string())),
        };
        Ok(Some(command))
    }
}

/// Resolves filter terms into a category set.
///
/// `kind:value` selects one family's category; a bare value selects it in
/// every family that declares it. Unknown terms select nothing.
pub fn parse_categories<S: AsRef<str>>(terms: &[S]) -> HashSet<Category> {
    let mut categories = HashSet::new();
    for term in terms {
        let term = term.as_ref().trim();
        match Category::parse_qualified(term) {
            Some(category) => {
                categories.insert(category);
            }
            None => {
                let any = Category::parse_any(term);
                if any.is_empty() {
                    tracing::debug!(term, "filter term matches no category");
                }
                categories.extend(any);
            }
        }
    }
    categories
}

/// Serves queries against a content collection loaded from disk.
///
/// Every query runs against one snapshot of the collection, so a
/// concurrent [`reload`](Self::reload) never changes results mid-query.
#[derive(Debug, Clone)]
pub struct QueryService {
    shared: Arc<SharedContentStore>,
    data_path: PathBuf,
    config: LoadConfig,
}

impl QueryService {
    /// Loads the collection at `data_path` and wraps it in a service.
    pub fn load<P: AsRef<Path>>(data_path: P, config: LoadConfig) -> ServiceResult<(Self, LoadStats)> {
        let data_path = data_path.as_ref().to_path_buf();
        let (store, stats) = ContentStore::load(&data_path, &config)?;
        let service = Self {
            shared: Arc::new(SharedContentStore::new(store)),
            data_path,
            config,
        };
        Ok((service, stats))
    }

    /// Wraps an already built collection. `reload` reads `data_path`.
    pub fn with_store<P: AsRef<Path>>(store: ContentStore, data_path: P, config: LoadConfig) -> Self {
        Self {
            shared: Arc::new(SharedContentStore::new(store)),
            data_path: data_path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Returns the current collection.
    pub fn store(&self) -> Arc<ContentStore> {
        self.shared.snapshot()
    }

    /// Re-reads the data path and swaps the collection.
    ///
    /// On failure the current collection stays in place.
    pub fn reload(&self) -> ServiceResult<LoadStats> {
        let (store, stats) = ContentStore::load(&self.data_path, &self.config)?;
        self.shared.replace(store);
        Ok(stats)
    }

    /// Runs one command.
    pub fn execute(&self, command: &Command) -> ServiceResult<Response> {
        let store = self.store();
        let response = match command {
            Command::Get(id) => match store.get_by_id(id) {
                Some(record) => Response::Record(Box::new(record.clone())),
                None => Response::NotFound(id.clone()),
            },
            Command::Filter(terms) => {
                let categories = parse_categories(terms.as_slice());
                Response::Records(views::to_summaries(&store.filter_by_category(&categories)))
            }
            Command::Search(query) => Response::Records(views::to_summaries(&store.search(query))),
            Command::Count => Response::Count(views::to_count(&store)),
            Command::Validate => Response::Validation(views::to_validation(&store.validate())),
            Command::Refs(id) => match store.cross_references(id) {
                Some(resolved) => Response::References(ReferencesView {
                    id: id.clone(),
                    outgoing: resolved.iter().map(views::to_reference).collect(),
                    referenced_by: views::to_summaries(&store.referenced_by(id)),
                }),
                None => Response::NotFound(id.clone()),
            },
            Command::Level(id, rank) => {
                // An out-of-range rank names no level, same as a missing one.
                let level = parse::rank(rank)
                    .ok()
                    .and_then(|level| store.level(id, level.rank()));
                match level {
                    Some(content) => Response::Level {
                        id: id.clone(),
                        content: Box::new(content.clone()),
                    },
                    None => Response::NotFound(format!("{} level {}", id, rank)),
                }
            }
            Command::Reload => Response::Reloaded(views::to_load(&self.reload()?)),
            Command::Help => Response::Message(SHELL_HELP.to_string()),
        };
        Ok(response)
    }

    /// Reads one command per line from `input` and writes responses to
    /// `output` until end of input or `quit`.
    ///
    /// Command errors are reported inline and do not end the session.
    pub fn run_shell<R: BufRead, W: Write>(
        &self,
        input: R,
        mut output: W,
        format: Format,
    ) -> ServiceResult<()> {
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) if line.trim().is_empty() => continue,
                Ok(None) => break,
                Err(e) => {
                    writeln!(output, "error: {}", e)?;
                    continue;
                }
            };

            match self.execute(&command) {
                Ok(response) => write!(output, "{}", ensure_newline(response.render(format)?))?,
                Err(e) => {
                    tracing::warn!(command = ?command, "command failed: {}", e);
                    writeln!(output, "error: {}", e)?;
                }
            }
            output.flush()?;
        }
        Ok(())
    }
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
