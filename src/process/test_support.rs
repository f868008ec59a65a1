use super::types::{OrderRecord, Quantities, RawRow};

pub fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A plain record for customer "Budi"; override fields with struct update syntax.
pub fn order(id: &str, qty: Quantities) -> OrderRecord {
    OrderRecord {
        id: id.to_string(),
        original_data: RawRow::new(),
        customer: "Budi".into(),
        po_number: "PO-1".into(),
        date: "2024-01-01".into(),
        deadline: "-".into(),
        product_name: "Jersey".into(),
        material: "Cotton".into(),
        cutting: "Reguler".into(),
        size: "L".into(),
        note: "-".into(),
        image_url: String::new(),
        qty,
    }
}

pub fn ids<'a>(orders: impl IntoIterator<Item = &'a OrderRecord>) -> Vec<&'a str> {
    orders.into_iter().map(|o| o.id.as_str()).collect()
}
