//! Production reports as stored by the backend (`/production/reports`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::report::{CostCell, ProductionCostDetail, ProductionReport};
use crate::types::{lenient_timestamp, DbId, Timestamp};

/// Display layout used by the report viewer for hatch dates.
pub const HATCH_DATE_DISPLAY_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDetailRecord {
    pub id: DbId,
    pub production_report_id: DbId,
    pub item: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    pub amount: f64,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionReportRecord {
    pub id: DbId,
    pub farmer_id: DbId,
    pub report_number: String,
    pub farmer_name: String,
    pub place: String,
    #[serde(with = "lenient_timestamp")]
    pub hatch_date: Timestamp,
    pub total_mortality_percent: f64,
    pub chicks_housed: i64,
    pub mortality_nos: i64,
    pub bird_lifted: i64,
    #[serde(default)]
    pub shortage: Option<i64>,
    pub bird_weight_kg: f64,
    pub fcr_percent: f64,
    pub lifting_percent: f64,
    pub avg_weight_kg: f64,
    #[serde(default)]
    pub mean_age_days: Option<i64>,
    #[serde(default)]
    pub farmer_profit_kg: Option<f64>,
    #[serde(default)]
    pub msp_kg: Option<f64>,
    pub lot_grade: String,
    pub production_cost_per_kg: f64,
    pub basic_rate: f64,
    #[serde(default)]
    pub performance_bonus: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub shorting_bird_kg: Option<String>,
    #[serde(default)]
    pub extra_mortality: Option<String>,
    #[serde(default)]
    pub minimum_growing_charge: Option<String>,
    pub final_amount: f64,
    pub is_approved: bool,
    #[serde(default)]
    pub approved_by: Option<DbId>,
    #[serde(default, with = "lenient_timestamp::option")]
    pub approved_at: Option<Timestamp>,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "lenient_timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub cost_details: Vec<CostDetailRecord>,
}

/// Filters for a farmer's own report listing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_approved: Option<bool>,
}

impl ReportQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.to_string()));
        }
        if let Some(approved) = self.is_approved {
            pairs.push(("is_approved", approved.to_string()));
        }
        pairs
    }
}

impl From<&ProductionReportRecord> for ProductionReport {
    fn from(record: &ProductionReportRecord) -> Self {
        let text = |cell: &Option<String>| {
            cell.as_deref()
                .map(CostCell::from_text)
                .unwrap_or_else(|| CostCell::Text(String::new()))
        };

        Self {
            farmer_name: record.farmer_name.clone(),
            place: record.place.clone(),
            hatch_date: record
                .hatch_date
                .format(HATCH_DATE_DISPLAY_FORMAT)
                .to_string(),
            total_mortality_percent: record.total_mortality_percent,
            chicks_housed: record.chicks_housed,
            mortality_nos: record.mortality_nos,
            bird_lifted: record.bird_lifted,
            shortage: record.shortage.unwrap_or(0),
            bird_weight: record.bird_weight_kg,
            fcr_percent: record.fcr_percent,
            lifting_percent: record.lifting_percent,
            avg_weight: record.avg_weight_kg,
            mean_age: record.mean_age_days,
            farmer_profit_kg: record.farmer_profit_kg,
            msp_kg: record.msp_kg,
            lot_grade: record.lot_grade.clone(),
            production_cost_details: record
                .cost_details
                .iter()
                .map(|row| ProductionCostDetail {
                    item: row.item.clone(),
                    quantity: text(&row.quantity),
                    rate: text(&row.rate),
                    amount: CostCell::Number(row.amount),
                })
                .collect(),
            production_cost_per_kg: record.production_cost_per_kg,
            basic: record.basic_rate,
            performance: record.performance_bonus.clone().unwrap_or_default(),
            bal: record.balance.unwrap_or(0.0),
            shorting_bird_kg: record.shorting_bird_kg.clone().unwrap_or_default(),
            extra_mortality: record.extra_mortality.clone().unwrap_or_default(),
            minimum_growing_charge: record.minimum_growing_charge.clone().unwrap_or_default(),
            final_amount: record.final_amount,
        }
    }
}
