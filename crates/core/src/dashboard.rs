//! Admin dashboard counters.

use serde::{Deserialize, Serialize};

use crate::mill::OrderStatus;
use crate::types::{lenient_timestamp, DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: DbId,
    pub order_number: String,
    pub farmer_id: DbId,
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentReport {
    pub id: DbId,
    pub report_number: String,
    pub farmer_name: String,
    pub is_approved: bool,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
}

/// Platform-wide totals shown on the admin landing screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub total_farmers: i64,
    pub total_mills: i64,
    pub total_orders: i64,
    pub total_reports: i64,
    pub pending_orders: i64,
    pub unapproved_reports: i64,
    pub monthly_orders: i64,
    pub monthly_reports: i64,
    #[serde(default)]
    pub recent_orders: Vec<RecentOrder>,
    #[serde(default)]
    pub recent_reports: Vec<RecentReport>,
}
