// src/config.rs

use anyhow::{anyhow, bail, Context, Result};
use std::env;
use url::Url;

const EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";
const DEFAULT_GID: &str = "0";

/// Which spreadsheet tab to pull the order table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSource {
    pub sheet_id: String,
    pub gid: String,
}

impl SheetSource {
    pub fn new(sheet_id: impl Into<String>, gid: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            gid: gid.into(),
        }
    }

    /// Reads `SHEET_ID` (required, non-blank) and `SHEET_GID` (defaults to the first tab).
    pub fn from_env() -> Result<Self> {
        let sheet_id = env::var("SHEET_ID").context("SHEET_ID must be set to the spreadsheet id")?;
        let gid = env::var("SHEET_GID").unwrap_or_else(|_| DEFAULT_GID.to_string());
        Self::from_parts(sheet_id, gid)
    }

    fn from_parts(sheet_id: String, gid: String) -> Result<Self> {
        let sheet_id = sheet_id.trim();
        if sheet_id.is_empty() {
            bail!("SHEET_ID is blank; set it to the spreadsheet id");
        }
        let gid = match gid.trim() {
            "" => DEFAULT_GID,
            g => g,
        };
        Ok(Self::new(sheet_id, gid))
    }

    /// CSV export endpoint for this tab.
    ///
    /// The id always lands as a single path segment under `/spreadsheets/d/`.
    pub fn csv_url(&self) -> Result<Url> {
        if self.sheet_id.trim().is_empty() {
            bail!("Empty sheet id; cannot build export URL");
        }
        let mut url = Url::parse(EXPORT_BASE).context("parsing export base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("export base {} cannot take path segments", EXPORT_BASE))?
            .push(&self.sheet_id)
            .push("export");
        url.query_pairs_mut()
            .append_pair("format", "csv")
            .append_pair("gid", &self.gid);
        Ok(url)
    }
}
