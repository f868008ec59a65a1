// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::SheetSource;
use crate::process::{parse_csv_rows, RawRow};

/// Download the CSV export of `source` and parse it into rows.
#[tracing::instrument(level = "info", skip(client), fields(sheet = %source.sheet_id, gid = %source.gid))]
pub async fn fetch_sheet_rows(client: &Client, source: &SheetSource) -> Result<Vec<RawRow>> {
    let url = source.csv_url()?;
    fetch_csv_rows(client, &url).await
}

/// GET `url` and parse the body as a header-row CSV table.
///
/// Network errors, a non-success status, or an unparsable body all surface as
/// one error; no rows are returned in that case. No retries.
pub async fn fetch_csv_rows(client: &Client, url: &Url) -> Result<Vec<RawRow>> {
    debug!(%url, "fetching CSV export");

    let text = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))?;

    let rows = parse_csv_rows(&text).with_context(|| format!("Parsing CSV from {}", url))?;
    info!(rows = rows.len(), bytes = text.len(), "fetched table");
    Ok(rows)
}
