// src/process/po_groups.rs

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

use super::lines::{consolidate_lines, ConsolidatedLine};
use super::types::OrderRecord;

/// PO number, material and cutting lower-cased; date kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoKey {
    pub po_number: String,
    pub material: String,
    pub cutting: String,
    pub date: String,
}

impl PoKey {
    pub fn of(order: &OrderRecord) -> Self {
        Self {
            po_number: order.po_number.to_lowercase(),
            material: order.material.to_lowercase(),
            cutting: order.cutting.to_lowercase(),
            date: order.date.clone(),
        }
    }
}

impl fmt::Display for PoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.po_number, self.material, self.cutting, self.date
        )
    }
}

/// One production batch: a PO's records sharing material, cutting and order date.
///
/// Header fields come from the first member in fold order.
#[derive(Debug, Clone)]
pub struct PoGroup<'a> {
    pub key: PoKey,
    pub po_number: &'a str,
    pub date: &'a str,
    pub deadline: &'a str,
    pub material: &'a str,
    pub cutting: &'a str,
    /// First non-empty image among the members, or `""`.
    pub image_url: &'a str,
    pub items: Vec<&'a OrderRecord>,
    pub total_qty: f64,
}

impl<'a> PoGroup<'a> {
    fn open(key: PoKey, first: &'a OrderRecord) -> Self {
        Self {
            key,
            po_number: &first.po_number,
            date: &first.date,
            deadline: &first.deadline,
            material: &first.material,
            cutting: &first.cutting,
            image_url: &first.image_url,
            items: Vec::new(),
            total_qty: 0.0,
        }
    }

    /// Product/note breakdown of this group, computed on each call.
    pub fn lines(&self) -> Vec<ConsolidatedLine<'a>> {
        consolidate_lines(self.items.iter().copied())
    }
}

impl Serialize for PoGroup<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PoGroup", 10)?;
        s.serialize_field("key", &self.key.to_string())?;
        s.serialize_field("poNumber", self.po_number)?;
        s.serialize_field("date", self.date)?;
        s.serialize_field("deadline", self.deadline)?;
        s.serialize_field("material", self.material)?;
        s.serialize_field("cutting", self.cutting)?;
        s.serialize_field("imageUrl", self.image_url)?;
        s.serialize_field("items", &self.items)?;
        s.serialize_field("totalQty", &self.total_qty)?;
        s.serialize_field("lines", &self.lines())?;
        s.end()
    }
}

/// Bucket records by [`PoKey`], newest date first.
///
/// Dates compare as plain strings, so ordering is only calendar-correct when
/// every date shares one ISO-like layout. Ties keep first-seen order.
pub fn group_po_orders<'a, I>(records: I) -> Vec<PoGroup<'a>>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut groups: IndexMap<PoKey, PoGroup<'a>> = IndexMap::new();

    for order in records {
        let group = groups
            .entry(PoKey::of(order))
            .or_insert_with_key(|key| PoGroup::open(key.clone(), order));
        group.items.push(order);
        group.total_qty += order.total_qty();
        if group.image_url.is_empty() && !order.image_url.is_empty() {
            group.image_url = order.image_url.as_str();
        }
    }

    let mut out: Vec<PoGroup<'a>> = groups.into_values().collect();
    out.sort_by(|a, b| b.date.cmp(a.date));
    out
}
