// src/main.rs
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use menu_loader::{DataSource, MenuConfig, MenuLoader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Read a local CSV file instead of the configured sheet
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Print the full report including diagnostics
    #[arg(long, short = 'r')]
    report: bool,

    /// Pretty-print the JSON output
    #[arg(long, short = 'p')]
    pretty: bool,

    /// Give up after this many seconds
    #[arg(long, short = 't')]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = MenuConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.file {
        config = config.with_source(DataSource::Local { path });
    }

    let loader = MenuLoader::new(config);
    info!(source = %loader.config().source, "Loading menu");
    let load = loader.load_report();

    let report = match cli.timeout {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), load).await {
            Ok(report) => Some(report),
            Err(_) => {
                error!(timeout_secs = secs, "Timed out loading menu");
                None
            }
        },
        None => Some(load.await),
    };

    let json = match (&report, cli.report) {
        (Some(report), true) => to_json(report, cli.pretty)?,
        (Some(report), false) => to_json(&report.sections, cli.pretty)?,
        (None, _) => "[]".to_string(),
    };
    println!("{}", json);

    // Sections are always printed; the exit code tells scripts the load failed
    let failed = report.map_or(true, |report| {
        report.diagnostics.iter().any(|d| d.level() == Level::ERROR)
    });
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
