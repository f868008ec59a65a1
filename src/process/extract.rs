// src/process/extract.rs

use crate::clock::{iso_timestamp, Clock};

use super::columns::ColumnResolver;
use super::image::normalize_image_url;
use super::types::{OrderRecord, Quantities, RawRow};
use super::utils::parse_quantity;

// Candidate header names per field, highest priority first.
const CUSTOMER: &[&str] = &["pemesan", "nama", "customer"];
const PO_NUMBER: &[&str] = &["no po", "nomor po", "po"];
const ORDER_DATE: &[&str] = &["tanggal order", "tgl order", "date"];
const DEADLINE: &[&str] = &["deadline", "tenggat"];
const PRODUCT: &[&str] = &["items detail", "item", "produk", "barang"];
const MATERIAL: &[&str] = &["bahan", "material"];
const CUTTING: &[&str] = &["cutting", "potongan"];
const SIZE: &[&str] = &["size", "ukuran"];
const NOTE: &[&str] = &["catatan", "note", "keterangan"];
const IMAGE: &[&str] = &["foto referensi", "link foto", "image"];
const QTY_SHORT: &[&str] = &["lengan pendek", "pendek"];
const QTY_LONG: &[&str] = &["lengan panjang", "panjang"];
const QTY_SINGLET: &[&str] = &["singlet"];

pub const UNNAMED_CUSTOMER: &str = "Tanpa Nama";
pub const CUSTOM_ITEM: &str = "Item Custom";
pub const PLACEHOLDER: &str = "-";

/// Turn one raw row into an [`OrderRecord`]. Never fails: every field that
/// can't be resolved gets its fallback.
///
/// `index` is the zero-based data row position; it seeds the record id and the
/// fallback PO number. A row without an order date is stamped with `clock`.
pub fn extract_order<C: Clock + ?Sized>(row: &RawRow, index: usize, clock: &C) -> OrderRecord {
    let cols = ColumnResolver::new(row);
    let text = |candidates: &[&str], fallback: &str| or_else(cols.resolve(candidates), fallback);

    let date = match cols.resolve(ORDER_DATE) {
        "" => iso_timestamp(clock.now()),
        d => d.to_string(),
    };
    let po_number = match cols.resolve(PO_NUMBER) {
        "" => format!("PO-{index}"),
        po => po.to_string(),
    };

    OrderRecord {
        id: format!("order-{index}"),
        original_data: row.clone(),
        customer: text(CUSTOMER, UNNAMED_CUSTOMER),
        po_number,
        date,
        deadline: text(DEADLINE, PLACEHOLDER),
        product_name: text(PRODUCT, CUSTOM_ITEM),
        material: text(MATERIAL, PLACEHOLDER),
        cutting: text(CUTTING, PLACEHOLDER),
        size: text(SIZE, PLACEHOLDER),
        note: text(NOTE, PLACEHOLDER),
        image_url: normalize_image_url(cols.resolve(IMAGE)),
        qty: Quantities::new(
            parse_quantity(cols.resolve(QTY_SHORT)),
            parse_quantity(cols.resolve(QTY_LONG)),
            parse_quantity(cols.resolve(QTY_SINGLET)),
        ),
    }
}

fn or_else(value: &str, fallback: &str) -> String {
    let chosen = if value.is_empty() { fallback } else { value };
    chosen.to_string()
}
