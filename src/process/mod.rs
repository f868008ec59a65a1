// src/process/mod.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};
use tracing::{debug, warn};

use crate::clock::Clock;

pub mod columns;
pub mod customers;
pub mod extract;
pub mod image;
pub mod lines;
pub mod po_groups;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use customers::{aggregate_customers, CustomerGroup};
pub use extract::extract_order;
pub use lines::{consolidate_lines, ConsolidatedLine, LineKey};
pub use po_groups::{group_po_orders, PoGroup, PoKey};
pub use types::{OrderRecord, Quantities, RawRow};

/// Raw rows → ranked customer groups. Row indices start at 0 for the first
/// data row (the header is not counted). Cannot fail.
#[tracing::instrument(level = "debug", skip_all, fields(rows = rows.len()))]
pub fn process_orders<C: Clock + ?Sized>(rows: &[RawRow], clock: &C) -> Vec<CustomerGroup> {
    let orders = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| extract_order(row, idx, clock));
    let customers = aggregate_customers(orders);
    debug!(customers = customers.len(), "aggregated orders");
    customers
}

/// Parse a CSV export whose first record is the header.
///
/// - a UTF-8 BOM in front of the first label is dropped
/// - short records just lack the trailing columns; extra fields are ignored
/// - a repeated header label gets `_1`, `_2`, … so no cell is lost
pub fn parse_csv_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // exports are ragged when trailing cells are blank
        .from_reader(text.as_bytes());
    let mut records = rdr.records();

    let headers = match records.next() {
        Some(first) => unique_headers(&first.context("CSV parse error in header row")?),
        None => {
            warn!("CSV export is empty");
            return Ok(Vec::new());
        }
    };

    let mut rows = Vec::new();
    for (idx, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV parse error at data row {}", idx))?;
        if record.len() > headers.len() {
            warn!(
                row = idx,
                fields = record.len(),
                columns = headers.len(),
                "dropping fields beyond the header"
            );
        }
        let row: RawRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "parsed CSV");
    Ok(rows)
}

/// Read and parse a CSV export from disk.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read CSV file: {:?}", path.as_ref()))?;
    parse_csv_rows(&text).with_context(|| format!("Failed to parse {:?}", path.as_ref()))
}

/// Repeated labels become `label_1`, `label_2`, ... counted per original
/// label. A suffix already taken by a real header is skipped.
fn unique_headers(record: &StringRecord) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(record.len());

    for (i, raw) in record.iter().enumerate() {
        let base = if i == 0 {
            utils::clean_header(raw)
        } else {
            raw.to_string()
        };
        let mut label = base.clone();
        if taken.contains(&label) {
            let n = counts.entry(base.clone()).or_insert(0);
            loop {
                *n += 1;
                label = format!("{}_{}", base, n);
                if !taken.contains(&label) {
                    break;
                }
            }
        }
        taken.insert(label.clone());
        headers.push(label);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,poboard::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
    }

    const ORDER_SHEET: &str = "\u{feff}Timestamp,Nama Pemesan,No PO,Tanggal Order,Items Detail,Bahan,Cutting,Size,Lengan Pendek,Lengan Panjang,Singlet,Foto Referensi
1,Budi,PO-100,2024-04-02,Jersey,Cotton,Reguler,L,5,,,https://drive.google.com/file/d/AAA/view
2,Budi,PO-100,2024-04-02,Jersey,Cotton,Reguler,XL,,3,,
3,Sari,PO-7,2024-04-05,Polo,Lacoste,Slimfit,M,10,2,1,
4,Budi,PO-101,2024-04-09,Singlet Basket,Dryfit,Reguler,L,,,4,
";

    #[test]
    fn parses_header_row_and_strips_bom() -> Result<()> {
        let rows = parse_csv_rows(ORDER_SHEET)?;
        assert_eq!(rows.len(), 4);
        let labels: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(labels[0], "Timestamp");
        assert_eq!(labels[1], "Nama Pemesan");
        assert_eq!(rows[2]["Nama Pemesan"], "Sari");
        Ok(())
    }

    #[test]
    fn tolerates_ragged_and_blank_lines() -> Result<()> {
        let rows = parse_csv_rows("a,b,c\n1,2\n\n4,5,6,7\n")?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert!(rows[0].get("c").is_none());
        assert_eq!(rows[1].len(), 3);
        assert_eq!(rows[1]["c"], "6");
        Ok(())
    }

    #[test]
    fn suffixes_duplicate_headers() -> Result<()> {
        let rows = parse_csv_rows("Size,Size,Size\nS,M,L\n")?;
        let labels: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(labels, ["Size", "Size_1", "Size_2"]);
        assert_eq!(rows[0]["Size_2"], "L");
        Ok(())
    }

    #[test]
    fn duplicate_suffix_skips_a_real_header() -> Result<()> {
        let rows = parse_csv_rows("a,a_1,a,a\n1,2,3,4\n")?;
        let labels: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(labels, ["a", "a_1", "a_2", "a_3"]);
        assert_eq!(rows[0]["a_1"], "2");
        assert_eq!(rows[0]["a_2"], "3");
        Ok(())
    }

    #[test]
    fn empty_text_has_no_rows() -> Result<()> {
        assert!(parse_csv_rows("")?.is_empty());
        assert!(parse_csv_rows("only,a,header\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn end_to_end_two_rows_one_po() {
        init_test_logging();
        let rows = vec![
            test_support::row(&[
                ("pemesan", "Budi"),
                ("no po", "PO-100"),
                ("bahan", "Cotton"),
                ("cutting", "Reguler"),
                ("lengan pendek", "5"),
            ]),
            test_support::row(&[
                ("pemesan", "Budi"),
                ("no po", "PO-100"),
                ("bahan", "Cotton"),
                ("cutting", "Reguler"),
                ("lengan panjang", "3"),
            ]),
        ];
        let customers = process_orders(&rows, &clock());

        assert_eq!(customers.len(), 1);
        let budi = &customers[0];
        assert_eq!(budi.name, "Budi");
        assert_eq!(budi.total_items, 8.0);
        assert_eq!(budi.total_pos, 1);

        let groups = budi.po_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_qty, 8.0);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn sheet_to_customers() -> Result<()> {
        init_test_logging();
        let customers = process_orders(&parse_csv_rows(ORDER_SHEET)?, &clock());

        let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Sari", "Budi"]);
        assert_eq!(customers[0].total_items, 13.0);

        let budi = &customers[1];
        assert_eq!(budi.total_items, 12.0);
        assert_eq!(budi.total_pos, 2);
        assert_eq!(budi.last_order_date, "2024-04-09");
        assert_eq!(
            budi.image_url.as_deref(),
            Some("https://drive.google.com/thumbnail?id=AAA&sz=w2000")
        );

        let groups = budi.po_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].po_number, "PO-101");
        assert_eq!(groups[1].po_number, "PO-100");
        assert_eq!(groups[1].total_qty, 8.0);

        let lines = groups[1].lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].variant_totals(), Quantities::new(5.0, 3.0, 0.0));
        Ok(())
    }

    #[test]
    fn repeated_runs_are_identical() -> Result<()> {
        let rows = parse_csv_rows("Pemesan,Lengan Pendek\nA,1\nB,3\nC,3\nA,\n")?;
        let first = process_orders(&rows, &clock());
        let second = process_orders(&rows, &clock());
        assert_eq!(first, second);

        let names: Vec<&str> = first.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
        // no date column: every record is stamped by the clock
        assert!(first
            .iter()
            .flat_map(|c| &c.orders)
            .all(|o| o.date == "2024-05-01T00:00:00.000Z"));
        Ok(())
    }

    #[test]
    fn load_csv_file_reads_from_disk() -> Result<()> {
        init_test_logging();
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(ORDER_SHEET.as_bytes())?;

        let rows = load_csv_file(tmp.path())?;
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3]["Singlet"], "4");
        Ok(())
    }

    #[test]
    fn load_csv_file_reports_missing_file() {
        let err = load_csv_file("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("Failed to read CSV file"));
    }
}
