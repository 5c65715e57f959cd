//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, EnvFilter};
use xbl_stats::{
    cli::{Commands, XblStats},
    commands::{handle_build, handle_fetch, BuildParams},
    config::StatsConfig,
};

/// Log to stderr, or to `log_file` when given. `RUST_LOG` overrides the level.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xbl_stats=info,warn")),
        )
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = XblStats::parse();
    init_tracing(app.log_file.as_deref())?;

    match app.command {
        Commands::Fetch {
            source,
            save_dir,
            api_key,
        } => {
            let config = StatsConfig::load(source.config.as_deref())
                .context("failed to load league config")?;
            handle_fetch(&config, &save_dir, api_key)
                .await
                .context("fetch failed")?
        }

        Commands::Build {
            source,
            season,
            raw_dir,
            save_dir,
            query,
        } => {
            let config = StatsConfig::load(source.config.as_deref())
                .context("failed to load league config")?;
            handle_build(BuildParams {
                config,
                season,
                raw_dir,
                save_dir,
                query,
            })
            .context("build failed")?
        }
    }

    Ok(())
}
