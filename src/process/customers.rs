// src/process/customers.rs

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashSet;
use tracing::trace;

use super::po_groups::{group_po_orders, PoGroup};
use super::types::OrderRecord;

/// Everything one customer ordered, with the board counters.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerGroup {
    pub name: String,
    /// In input order.
    pub orders: Vec<OrderRecord>,
    pub total_items: f64,
    /// Distinct PO numbers, not PO groups.
    pub total_pos: usize,
    /// Greatest order date by string comparison.
    pub last_order_date: String,
    /// First `http` image seen across the customer's rows.
    pub image_url: Option<String>,
}

impl CustomerGroup {
    fn open(name: String, first_date: &str) -> Self {
        Self {
            name,
            orders: Vec::new(),
            total_items: 0.0,
            total_pos: 0,
            last_order_date: first_date.to_string(),
            image_url: None,
        }
    }

    fn push(&mut self, order: OrderRecord) {
        self.total_items += order.total_qty();
        if self.image_url.is_none() && order.image_url.starts_with("http") {
            self.image_url = Some(order.image_url.clone());
        }
        if order.date > self.last_order_date {
            self.last_order_date = order.date.clone();
        }
        self.orders.push(order);
    }

    /// PO groups over this customer's records, newest first.
    pub fn po_groups(&self) -> Vec<PoGroup<'_>> {
        group_po_orders(&self.orders)
    }
}

impl Serialize for CustomerGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CustomerGroup", 7)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("orders", &self.orders)?;
        s.serialize_field("groups", &self.po_groups())?;
        s.serialize_field("totalItems", &self.total_items)?;
        s.serialize_field("totalPOs", &self.total_pos)?;
        s.serialize_field("lastOrderDate", &self.last_order_date)?;
        s.serialize_field("imageUrl", &self.image_url)?;
        s.end()
    }
}

/// Fold records into customers (exact, case-sensitive name match) and rank
/// them by total pieces, largest first. Customers with equal totals keep the
/// order in which they first appeared.
pub fn aggregate_customers<I>(records: I) -> Vec<CustomerGroup>
where
    I: IntoIterator<Item = OrderRecord>,
{
    let mut customers: IndexMap<String, CustomerGroup> = IndexMap::new();

    for order in records {
        customers
            .entry(order.customer.clone())
            .or_insert_with_key(|name| {
                trace!(customer = %name, "new customer");
                CustomerGroup::open(name.clone(), &order.date)
            })
            .push(order);
    }

    let mut out: Vec<CustomerGroup> = customers
        .into_values()
        .map(|mut group| {
            group.total_pos = group
                .orders
                .iter()
                .map(|o| o.po_number.as_str())
                .collect::<HashSet<_>>()
                .len();
            group
        })
        .collect();
    out.sort_by(|a, b| b.total_items.total_cmp(&a.total_items));
    out
}
