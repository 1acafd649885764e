use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use minisector::{
    AnalysisConfig, AnalysisError, ArchiveProvider, SessionKey, SessionKind, SessionProvider,
    analyze,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare the two fastest laps of a session minisector by minisector",
    long_about = None
)]
struct Cli {
    /// Session archive root
    #[arg(long, default_value = "data", value_hint = ValueHint::DirPath)]
    data_dir: PathBuf,

    /// Season year
    #[arg(long, default_value_t = 2023)]
    year: i32,

    /// Event name as listed in the season schedule; lists events when omitted
    #[arg(long)]
    event: Option<String>,

    /// Session code: Q, SQ, S or R (defaults to the config value)
    #[arg(long)]
    session: Option<SessionKind>,

    /// Number of minisectors (defaults to the config value)
    #[arg(long)]
    minisectors: Option<usize>,

    /// YAML configuration file
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output SVG path
    #[arg(short, long, default_value = "minisectors.svg", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// List the events of the season and exit
    #[arg(long, action = ArgAction::SetTrue)]
    list_events: bool,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path).await?,
        None => AnalysisConfig::default(),
    };
    if let Some(session) = cli.session {
        config.session = session;
    }
    if let Some(minisectors) = cli.minisectors {
        config.num_minisectors = minisectors;
    }
    config.validate()?;

    let provider = ArchiveProvider::new(&cli.data_dir);
    let event = match cli.event {
        Some(event) if !cli.list_events => event,
        _ => return list_events(&provider, cli.year).await,
    };

    let session = SessionKey::new(cli.year, event, config.session);
    let analysis = analyze(&provider, &session, &config).await?;

    tokio::fs::write(&cli.output, analysis.image.as_svg())
        .await
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    let comparison = &analysis.comparison;
    println!(
        "{}: {} {} ({} sectors) vs {} {} ({} sectors), {} tied",
        session,
        comparison.reference.label,
        comparison.reference.lap_time,
        comparison.reference.minisectors_won,
        comparison.comparison.label,
        comparison.comparison.lap_time,
        comparison.comparison.minisectors_won,
        comparison.ties,
    );
    info!(output = %cli.output.display(), "Wrote track map");
    Ok(())
}

async fn list_events(provider: &dyn SessionProvider, year: i32) -> Result<()> {
    let events = provider.events(year).await?;
    println!("Events in {}:", year);
    for event in events {
        println!("  {}", event);
    }
    Ok(())
}

fn report(error: &anyhow::Error) {
    eprintln!("Error: {:#}", error);
    if let Some(analysis_error) = error.downcast_ref::<AnalysisError>() {
        eprintln!("Suggestions:");
        for suggestion in analysis_error.recovery_suggestions() {
            eprintln!("  - {}", suggestion);
        }
    }
}
