use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use poboard::{
    clock::{Clock, FixedClock, SystemClock},
    process::{load_csv_file, process_orders},
    summary::Report,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "process-csv")]
#[command(about = "Group a locally exported order sheet (CSV) into customers and PO groups")]
struct Args {
    /// CSV export, first row is the header
    csv_file: PathBuf,

    /// Stamp rows without an order date with this instant (RFC 3339) instead of now
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    let rows = load_csv_file(&args.csv_file)
        .with_context(|| format!("loading {}", args.csv_file.display()))?;

    let clock: Box<dyn Clock> = match args.now {
        Some(at) => Box::new(FixedClock(at)),
        None => Box::new(SystemClock),
    };
    let report = Report::new(process_orders(&rows, clock.as_ref()));
    info!(
        rows = rows.len(),
        customers = report.stats.unique_customers,
        pos = report.stats.total_pos,
        items = report.stats.total_items,
        "processed {}",
        args.csv_file.display()
    );

    let mut out = io::stdout().lock();
    if args.compact {
        serde_json::to_writer(&mut out, &report)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &report)?;
    }
    writeln!(out)?;
    Ok(())
}
