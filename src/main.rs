//! diaScan: diabetes risk assessment in the terminal.
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diascan::adapters::sanitize::RedactingMakeWriter;
use diascan::adapters::{CachingArtifactStore, JsonArtifactStore};
use diascan::application::AssessmentService;
use diascan::config::{AppConfig, LogConfig, LogMode};
use diascan::ports::ArtifactStore;
use diascan::tui::App;

fn init_logging(log: &LogConfig) -> Result<WorkerGuard> {
    // Writing logs to the terminal would corrupt the TUI (alternate screen):
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let use_file = match log.mode {
        LogMode::File => true,
        LogMode::Stdout => false,
        LogMode::Auto => std::io::stdout().is_terminal(),
    };

    let (writer, guard) = if use_file {
        if let Some(parent) = log.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            // Best-effort: the open below reports the real problem.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log.file)
            .with_context(|| format!("Failed to open log file {:?}", log.file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(!use_file)
                .with_writer(RedactingMakeWriter::new(writer)),
        )
        .init();

    Ok(guard)
}

fn run<S: ArtifactStore>(store: S, model: &Path, scaler: &Path) -> Result<()> {
    let service = AssessmentService::new(store, model, scaler);
    let mut app = App::new(service);
    app.run()
}

fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let _guard = init_logging(&config.log)?;

    tracing::info!("Starting diaScan...");

    // Refuse to start without both artifacts on disk.
    let paths = config.validate().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;
    tracing::info!(
        "Model artifact {:?}, scaler artifact {:?}, cache {}",
        paths.model,
        paths.scaler,
        if config.cache_artifacts { "on" } else { "off" }
    );

    if config.cache_artifacts {
        run(
            CachingArtifactStore::new(JsonArtifactStore::new()),
            &paths.model,
            &paths.scaler,
        )?;
    } else {
        run(JsonArtifactStore::new(), &paths.model, &paths.scaler)?;
    }

    tracing::info!("diaScan shutdown complete.");
    Ok(())
}
