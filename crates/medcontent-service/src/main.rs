//! medcontent: query a medical-education content collection.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use medcontent_loader::loader::default_seed_path;
use medcontent_loader::LoadConfig;
use medcontent_service::{Command, Format, QueryService, ServiceResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medcontent")]
#[command(about = "Query a medical-education content collection")]
struct Cli {
    /// Content file or directory of content files
    #[arg(short, long, env = "MEDCONTENT_DATA_PATH", default_value_os_t = default_seed_path("."))]
    data: PathBuf,

    /// Output format
    #[arg(short, long, env = "MEDCONTENT_FORMAT", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Drop invalid records instead of failing the load
    #[arg(long, env = "MEDCONTENT_LENIENT")]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one record by id
    Get { id: String },
    /// List records in any of the given categories (kind:value or bare value)
    Filter {
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Case-insensitive text search; an empty query lists everything
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Number of records, by category
    Count,
    /// Re-validate the loaded collection
    Validate,
    /// Cross-references and backlinks of a record
    Refs { id: String },
    /// One complexity level (1-5) of a leveled record
    Level { id: String, rank: String },
    /// Read one query per line from stdin
    Shell,
}

impl Commands {
    fn into_command(self) -> Option<Command> {
        Some(match self {
            Self::Get { id } => Command::Get(id),
            Self::Filter { categories } => Command::Filter(categories),
            Self::Search { query } => Command::Search(query),
            Self::Count => Command::Count,
            Self::Validate => Command::Validate,
            Self::Refs { id } => Command::Refs(id),
            Self::Level { id, rank } => Command::Level(id, rank),
            Self::Shell => return None,
        })
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries query output.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> ServiceResult<u8> {
    let config = if cli.lenient {
        LoadConfig::lenient()
    } else {
        LoadConfig::default()
    };

    tracing::info!("Loading content from: {}", cli.data.display());
    let (service, stats) = QueryService::load(&cli.data, config)?;
    tracing::info!(
        "Loaded {} records from {} files ({} rejected, {:.1}%) in {} ms",
        stats.records,
        stats.files,
        stats.rejected,
        stats.rejection_rate(),
        stats.load_time_ms
    );

    match cli.command.into_command() {
        Some(command) => {
            let response = service.execute(&command)?;
            print!("{}", response.render(cli.format)?);
            if cli.format == Format::Json {
                println!();
            }
            Ok(response.exit_code() as u8)
        }
        None => {
            tracing::info!("Query shell ready; type `help` for commands");
            service.run_shell(io::stdin().lock(), io::stdout().lock(), cli.format)?;
            Ok(0)
        }
    }
}
