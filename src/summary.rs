// src/summary.rs

use serde::Serialize;

use crate::process::CustomerGroup;

/// Board-wide counters shown above the customer cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of each customer's distinct PO count.
    #[serde(rename = "totalPOs")]
    pub total_pos: usize,
    /// Total pieces across every order line.
    pub total_items: f64,
    pub unique_customers: usize,
}

impl DashboardStats {
    pub fn from_customers(customers: &[CustomerGroup]) -> Self {
        customers.iter().fold(
            Self {
                unique_customers: customers.len(),
                ..Self::default()
            },
            |acc, c| Self {
                total_pos: acc.total_pos + c.total_pos,
                total_items: acc.total_items + c.total_items,
                ..acc
            },
        )
    }
}

/// What a renderer receives: counters plus the ranked customers, each with its
/// PO groups and their product lines expanded.
#[derive(Debug, Serialize)]
pub struct Report {
    pub stats: DashboardStats,
    pub customers: Vec<CustomerGroup>,
}

impl Report {
    pub fn new(customers: Vec<CustomerGroup>) -> Self {
        Self {
            stats: DashboardStats::from_customers(&customers),
            customers,
        }
    }
}
