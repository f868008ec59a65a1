// src/process/types.rs

use indexmap::IndexMap;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// One data row of the source table: column label (as written in the header) → cell.
/// Keeps header order, which the column resolver relies on.
pub type RawRow = IndexMap<String, String>;

/// The three garment variant counters of an order line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quantities {
    pub short: f64,
    pub long: f64,
    pub singlet: f64,
}

impl Quantities {
    pub fn new(short: f64, long: f64, singlet: f64) -> Self {
        Self {
            short,
            long,
            singlet,
        }
    }

    /// Always the sum of the three counters; never stored separately.
    pub fn total(&self) -> f64 {
        self.short + self.long + self.singlet
    }
}

impl Add for Quantities {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.short + rhs.short,
            self.long + rhs.long,
            self.singlet + rhs.singlet,
        )
    }
}

impl AddAssign for Quantities {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Quantities {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Serialize for Quantities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Quantities", 4)?;
        s.serialize_field("qtyShort", &self.short)?;
        s.serialize_field("qtyLong", &self.long)?;
        s.serialize_field("qtySinglet", &self.singlet)?;
        s.serialize_field("totalQty", &self.total())?;
        s.end()
    }
}

/// One extracted line item. Every field is already defaulted; nothing here is optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// `order-<row index>`
    pub id: String,
    pub original_data: RawRow,
    pub customer: String,
    pub po_number: String,
    pub date: String,
    pub deadline: String,
    pub product_name: String,
    pub material: String,
    pub cutting: String,
    pub size: String,
    pub note: String,
    pub image_url: String,
    #[serde(flatten)]
    pub qty: Quantities,
}

impl OrderRecord {
    pub fn total_qty(&self) -> f64 {
        self.qty.total()
    }
}
