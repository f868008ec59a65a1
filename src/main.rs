use anyhow::{Context, Result};
use poboard::{
    clock::SystemClock, config::SheetSource, fetch::fetch_sheet_rows, process::process_orders,
    summary::Report,
};
use reqwest::Client;
use std::io::{self, Write};
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr) // stdout carries the report
        .init();
    info!("startup");

    // ─── 2) configure source ─────────────────────────────────────────
    let source = SheetSource::from_env()?;
    info!(sheet = %source.sheet_id, gid = %source.gid, "sheet source");

    // ─── 3) fetch the order table ────────────────────────────────────
    let start = Instant::now();
    let client = Client::new();
    let rows = fetch_sheet_rows(&client, &source)
        .await
        .context("Failed to load orders from the sheet; is it shared publicly?")?;
    info!(rows = rows.len(), elapsed = ?start.elapsed(), "fetched");

    // ─── 4) reshape into customers / PO groups ───────────────────────
    let report = Report::new(process_orders(&rows, &SystemClock));
    info!(
        customers = report.stats.unique_customers,
        pos = report.stats.total_pos,
        items = report.stats.total_items,
        "processed"
    );

    // ─── 5) emit JSON for the renderer ───────────────────────────────
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &report).context("writing report")?;
    writeln!(out)?;

    Ok(())
}
