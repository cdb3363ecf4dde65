use crate::cli::args::Cli;
use crate::error::Result;
use crate::processors::ParallelProcessor;
use crate::settings::Settings;
use crate::utils::constants::{DEFAULT_LOG_LEVEL, VERBOSE_LOG_LEVEL};
use crate::utils::progress::ProgressReporter;
use crate::writers::SummaryWriter;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings =
        Settings::load(cli.config.as_deref())?.with_overrides(cli.max_workers, cli.progress)?;
    debug!(?settings, "resolved settings");

    let input = cli.input;
    info!(input = %input.display(), workers = settings.max_workers, "processing measurements");

    // The pipeline is CPU-bound and runs on its own rayon pool.
    tokio::task::spawn_blocking(move || summarize(&input, &settings)).await??;

    Ok(())
}

/// Aggregate `input` and print the summary line to stdout.
pub fn summarize(input: &Path, settings: &Settings) -> Result<()> {
    let started = Instant::now();
    let progress = ProgressReporter::new(0, "Mapping input...", !settings.show_progress);

    let processor = ParallelProcessor::from_settings(settings);
    debug!(
        workers = processor.max_workers(),
        table_capacity = settings.table_capacity,
        "starting pipeline"
    );
    let table = processor.process_path(input, Some(&progress))?;
    drop(progress);

    let stdout = io::stdout().lock();
    SummaryWriter::new().write(table, BufWriter::new(stdout))?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "summary written"
    );
    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // stdout carries the summary line only.
    let installed = match log_file {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };

    if installed.is_err() {
        debug!("global tracing subscriber already installed");
    }

    Ok(())
}
