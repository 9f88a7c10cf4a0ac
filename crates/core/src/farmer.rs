//! Farmer profiles and the admin-side farmer management payloads.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{lenient_timestamp, DbId, Timestamp};

/// Minimum length of an admin quick-search query.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Result limit used by quick search when the caller does not pick one.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

// ---------------------------------------------------------------------------
// Self-service profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: DbId,
    pub farmer_id: DbId,
    pub name: String,
    pub location: String,
    pub capacity: i64,
    #[serde(default)]
    pub current_stock: Option<i64>,
    pub farm_size: f64,
    pub is_active: bool,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

/// The authenticated farmer's own profile (`GET /farmers/me`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub phone: String,
    pub address: String,
    pub farm_type: String,
    #[serde(default)]
    pub experience_years: Option<i32>,
    pub is_verified: bool,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub farms: Vec<Farm>,
}

/// Partial update of the farmer's own profile. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmerProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<i32>,
}

// ---------------------------------------------------------------------------
// Admin management
// ---------------------------------------------------------------------------

/// A farmer row as listed to administrators, joined with its user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerListItem {
    pub id: DbId,
    pub user_id: DbId,
    pub phone: String,
    pub address: String,
    pub farm_type: String,
    #[serde(default)]
    pub experience_years: Option<i32>,
    pub is_verified: bool,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
    pub user_email: String,
    pub user_full_name: String,
    pub user_is_active: bool,
    #[serde(default)]
    pub farm_count: i64,
}

/// Create a farmer together with its user account.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminFarmerCreate {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub farm_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl AdminFarmerCreate {
    /// Reject payloads with a blank required field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            ("email", &self.email),
            ("full_name", &self.full_name),
            ("password", &self.password),
            ("phone", &self.phone),
            ("address", &self.address),
            ("farm_type", &self.farm_type),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for AdminFarmerCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminFarmerCreate")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .field("address", &self.address)
            .field("farm_type", &self.farm_type)
            .field("experience_years", &self.experience_years)
            .field("is_verified", &self.is_verified)
            .finish()
    }
}

/// Partial update of a farmer and its user account.
///
/// Email and password cannot be changed after creation, so they have no
/// field here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminFarmerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// Filters for the admin farmer listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarmerFilter {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub farm_type: Option<String>,
    pub is_verified: Option<bool>,
}

impl FarmerFilter {
    /// Query-string pairs for the filters that are set.
    ///
    /// Numeric and boolean filters are emitted whenever present, so
    /// `is_verified = Some(false)` yields `is_verified=false`. Text filters
    /// are skipped when empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(farm_type) = self.farm_type.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("farm_type", farm_type.to_string()));
        }
        if let Some(is_verified) = self.is_verified {
            pairs.push(("is_verified", is_verified.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerSearchResult {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub farm_type: String,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerSearchResponse {
    pub query: String,
    pub results_count: usize,
    pub farmers: Vec<FarmerSearchResult>,
}

/// Aggregate farmer statistics computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmersCountResponse {
    pub total_farmers: i64,
    pub verified_farmers: i64,
    pub unverified_farmers: i64,
    pub active_users: i64,
    pub inactive_users: i64,
    pub verification_rate: f64,
    #[serde(default)]
    pub farm_type_distribution: HashMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkVerifyResponse {
    pub message: String,
    pub updated_count: usize,
    pub farmer_ids: Vec<DbId>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteFarmerResponse {
    pub message: String,
    pub farmer_id: DbId,
    pub user_deleted: bool,
}

/// Quick search needs at least [`MIN_SEARCH_QUERY_LEN`] characters.
pub fn validate_search_query(query: &str) -> Result<(), CoreError> {
    if query.trim().chars().count() < MIN_SEARCH_QUERY_LEN {
        return Err(CoreError::Validation(format!(
            "Search query must be at least {MIN_SEARCH_QUERY_LEN} characters"
        )));
    }
    Ok(())
}

/// Bulk verification needs at least one farmer id.
pub fn validate_bulk_ids(farmer_ids: &[DbId]) -> Result<(), CoreError> {
    if farmer_ids.is_empty() {
        return Err(CoreError::Validation(
            "Farmer IDs list cannot be empty".into(),
        ));
    }
    Ok(())
}
