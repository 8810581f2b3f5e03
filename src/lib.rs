pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod quality;
pub mod sources;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
pub use config::Config;
pub use error::SourceError;
pub use sources::{Source, SourceMetadata, builtin_sources, find_source};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    init_tracing(&config);

    let Some(command) = args.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        return cli::cmd_init();
    }

    let sources = builtin_sources(&config).context("Failed to build HTTP client")?;
    let json = args.json;

    match command {
        Commands::Sources => cli::cmd_sources(&sources, json),

        Commands::Search {
            source,
            query,
            page,
        } => cli::cmd_search(&sources, &source, &query.join(" "), page, json).await,

        Commands::Featured { source } => cli::cmd_featured(&sources, source.as_deref(), json).await,

        Commands::Latest { source, page } => cli::cmd_latest(&sources, &source, page, json).await,

        Commands::Popular { source, page } => {
            cli::cmd_popular(&sources, &source, page, json).await
        }

        Commands::Details { source, id, url } => {
            cli::cmd_details(&sources, &source, &id, &url, json).await
        }

        Commands::Streams {
            source,
            episode_id,
            url,
        } => cli::cmd_streams(&sources, &source, &episode_id, &url, json).await,

        Commands::Init => cli::cmd_init(),
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
