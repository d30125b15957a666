mod io;
mod state;
mod types;

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Converts a state-grouped alcohol consumption report into comma-separated rows on stdout.
#[derive(Parser)]
#[command(name = "alcohol_to_csv", version, about)]
struct Cli {
    /// Plain-text report to convert
    #[arg(default_value = "alcohol_by_state.txt")]
    input: PathBuf,
}

fn main() {
    // stdout carries the records, so diagnostics go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut writer = io::CsvRecordWriter::new(stdout.lock());
    let mut records = state::Records::new(io::LineFileReader::open(&cli.input)?);

    for result in records.by_ref() {
        writer.write(&result?)?;
    }

    writer.flush()?;

    let summary = records.summary();
    info!(
        input = %cli.input.display(),
        lines = summary.lines,
        headers = summary.headers,
        records = summary.records,
        "conversion complete"
    );

    Ok(())
}
