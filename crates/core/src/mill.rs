//! Feed mills and the feed orders they fulfil.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{lenient_timestamp, DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mill {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Production capacity in kg per day.
    pub capacity_per_day: f64,
    pub is_active: bool,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MillUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_per_day: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Dispatched,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Dispatched => "dispatched",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the mill still has work to do on the order.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedOrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub feed_type_id: DbId,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedOrder {
    pub id: DbId,
    pub order_number: String,
    pub farmer_id: DbId,
    pub mill_id: DbId,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub delivery_address: String,
    #[serde(default, with = "lenient_timestamp::option")]
    pub expected_delivery_date: Option<Timestamp>,
    #[serde(default, with = "lenient_timestamp::option")]
    pub actual_delivery_date: Option<Timestamp>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub items: Vec<FeedOrderItem>,
}

/// Status change sent by a mill. The backend stamps the delivery date when
/// the status becomes `dispatched` and none is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedOrderStatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "lenient_timestamp::option"
    )]
    pub actual_delivery_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedType {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_per_kg: f64,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}
