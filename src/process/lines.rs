// src/process/lines.rs

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

use super::types::{OrderRecord, Quantities};

/// (product name, note), both lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_name: String,
    pub note: String,
}

impl LineKey {
    pub fn of(order: &OrderRecord) -> Self {
        Self {
            product_name: order.product_name.to_lowercase(),
            note: order.note.to_lowercase(),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.product_name, self.note)
    }
}

impl Serialize for LineKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// All records of one product + note within a PO group, for the size table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedLine<'a> {
    pub key: LineKey,
    /// As written on the first member.
    pub product_name: &'a str,
    pub note: &'a str,
    pub items: Vec<&'a OrderRecord>,
    pub total_qty: f64,
    #[serde(rename = "variantTotals")]
    variants: Quantities,
}

impl ConsolidatedLine<'_> {
    /// Per-variant sums across the members (short, long, singlet).
    pub fn variant_totals(&self) -> Quantities {
        self.variants
    }
}

/// Bucket records by product + note, keeping first-seen order.
pub fn consolidate_lines<'a, I>(records: I) -> Vec<ConsolidatedLine<'a>>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut lines: IndexMap<LineKey, ConsolidatedLine<'a>> = IndexMap::new();

    for order in records {
        let line = lines
            .entry(LineKey::of(order))
            .or_insert_with_key(|key| ConsolidatedLine {
                key: key.clone(),
                product_name: &order.product_name,
                note: &order.note,
                items: Vec::new(),
                total_qty: 0.0,
                variants: Quantities::default(),
            });
        line.items.push(order);
        line.total_qty += order.total_qty();
        line.variants += order.qty;
    }

    lines.into_values().collect()
}
