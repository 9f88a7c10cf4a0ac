//! Daily routine logs and mortality records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{lenient_timestamp, DbId, Timestamp};

/// A farmer's daily log entry as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineData {
    #[serde(with = "lenient_timestamp")]
    pub date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortality_count: Option<i32>,
    pub feed_consumption_kg: f64,
    pub average_bird_weight_g: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_consumption_liters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RoutineData {
    /// Reject negative readings before they are submitted. Bounds beyond
    /// the sign are left to the backend.
    pub fn validate(&self) -> Result<(), CoreError> {
        let readings = [
            ("Mortality count", self.mortality_count.map(f64::from)),
            ("Feed consumption", Some(self.feed_consumption_kg)),
            ("Average bird weight", Some(self.average_bird_weight_g)),
            ("Water consumption", self.water_consumption_liters),
            ("Humidity", self.humidity_percentage),
        ];
        for (name, value) in readings {
            if value.is_some_and(|v| v < 0.0) {
                return Err(CoreError::Validation(format!("{name} cannot be negative")));
            }
        }
        Ok(())
    }
}

/// Partial update of a routine entry. The date is fixed once logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutineUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mortality_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_consumption_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_bird_weight_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_consumption_liters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineResponse {
    pub id: DbId,
    pub farmer_id: DbId,
    #[serde(with = "lenient_timestamp")]
    pub date: Timestamp,
    #[serde(default)]
    pub mortality_count: Option<i32>,
    pub feed_consumption_kg: f64,
    pub average_bird_weight_g: f64,
    #[serde(default)]
    pub water_consumption_liters: Option<f64>,
    #[serde(default)]
    pub temperature_celsius: Option<f64>,
    #[serde(default)]
    pub humidity_percentage: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

/// A routine entry with its linked mortality records (`GET /routine/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineWithMortality {
    #[serde(flatten)]
    pub routine: RoutineResponse,
    #[serde(default)]
    pub mortality_records: Vec<MortalityRecordResponse>,
}

/// Date window for listing routine entries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoutineQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RoutineQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.to_string()));
        }
        pairs
    }
}

/// Mortality record payload, linked to a routine entry by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityRecord {
    pub routine_data_id: DbId,
    pub count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MortalityRecord {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.count < 0 {
            return Err(CoreError::Validation(
                "Mortality count cannot be negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityRecordResponse {
    pub id: DbId,
    pub routine_data_id: DbId,
    pub farmer_id: DbId,
    pub count: i32,
    #[serde(default)]
    pub cause: Option<String>,
    #[serde(default)]
    pub age_days: Option<i32>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
}

/// Server reply to a mortality photo upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoUploadResponse {
    pub file_url: String,
    #[serde(default)]
    pub filename: Option<String>,
}
