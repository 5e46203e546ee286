use std::path::{Path, PathBuf};

use almanac_app::normalize::normalize;
use almanac_core::config::load_config;
use almanac_service::calendar::CalendarSerializer;
use clap::Parser;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "Validate and normalise iCalendar files", long_about = None)]
struct Cli {
    /// iCalendar files to read
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory for the normalised files; overrides `calendar.output_dir`
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let mut config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    if let Some(dir) = cli.output_dir {
        config.calendar.output_dir = Some(dir);
    }
    if let Some(dir) = &config.calendar.output_dir {
        tokio::fs::create_dir_all(dir).await?;
    }

    let serializer = CalendarSerializer::new().with_product_id(config.calendar.product_id.as_str());

    let mut failed = 0_usize;
    for input in &cli.files {
        let destination = config.calendar.output_path(input);
        if let Err(error) = process(&serializer, input, destination.as_deref()).await {
            tracing::error!(file = %input.display(), error = %error, "Failed to normalise file");
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files could not be normalised", cli.files.len());
    }
    Ok(())
}

async fn process(
    serializer: &CalendarSerializer,
    input: &Path,
    destination: Option<&Path>,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(input).await?;
    let normalized = normalize(serializer, &text)?;

    tracing::info!(
        file = %input.display(),
        calendars = normalized.calendars,
        skipped = normalized.skipped,
        "Normalised file"
    );

    match destination {
        Some(path) => tokio::fs::write(path, normalized.output).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(normalized.output.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
