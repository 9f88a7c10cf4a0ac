//! Production-cost report view model and the static report table.
//!
//! The report viewer reads from a table compiled into the binary. Unknown
//! report ids resolve to the default report so the viewer always has
//! something to show; [`find_report`] is the strict variant.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Id of the report returned for unknown ids.
pub const DEFAULT_REPORT_ID: &str = "1";

/// Cost-table row label that carries the grand total.
pub const TOTAL_ROW: &str = "TOTAL";

/// Cost-table row label whose quantity is the feed consumed, in kg.
pub const FEED_ROW: &str = "Feed";

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// A cost-table cell: either a figure or free text such as `"ACTUAL"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CostCell {
    Number(f64),
    Text(String),
}

impl CostCell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Interpret backend text cells, keeping non-numeric text verbatim.
    pub fn from_text(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(raw.to_string()))
    }

    fn empty() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for CostCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionCostDetail {
    pub item: String,
    pub quantity: CostCell,
    pub rate: CostCell,
    pub amount: CostCell,
}

/// Settlement summary for one completed flock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionReport {
    pub farmer_name: String,
    pub place: String,
    /// Display date, `dd.mm.yyyy`.
    pub hatch_date: String,
    pub total_mortality_percent: f64,
    pub chicks_housed: i64,
    pub mortality_nos: i64,
    pub bird_lifted: i64,
    pub shortage: i64,
    /// Total live weight lifted, kg.
    pub bird_weight: f64,
    pub fcr_percent: f64,
    pub lifting_percent: f64,
    /// Average live weight per bird, kg.
    pub avg_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_age: Option<i64>,
    #[serde(default, rename = "farmerProfitKG", skip_serializing_if = "Option::is_none")]
    pub farmer_profit_kg: Option<f64>,
    #[serde(default, rename = "mspKG", skip_serializing_if = "Option::is_none")]
    pub msp_kg: Option<f64>,
    pub lot_grade: String,
    pub production_cost_details: Vec<ProductionCostDetail>,
    pub production_cost_per_kg: f64,
    pub basic: f64,
    pub performance: String,
    pub bal: f64,
    pub shorting_bird_kg: String,
    pub extra_mortality: String,
    pub minimum_growing_charge: String,
    pub final_amount: f64,
}

// ---------------------------------------------------------------------------
// Static table
// ---------------------------------------------------------------------------

fn cost_row(item: &str, quantity: CostCell, rate: CostCell, amount: f64) -> ProductionCostDetail {
    ProductionCostDetail {
        item: item.to_string(),
        quantity,
        rate,
        amount: CostCell::Number(amount),
    }
}

fn sanjarwas_flock_1() -> ProductionReport {
    use CostCell::{Number, Text};

    ProductionReport {
        farmer_name: "DEEPAK".into(),
        place: "SANJARWAS FLOCK 1".into(),
        hatch_date: "30.01.2024".into(),
        total_mortality_percent: 10.5520396,
        chicks_housed: 15959,
        mortality_nos: 1684,
        bird_lifted: 14275,
        shortage: 0,
        bird_weight: 25570.2,
        fcr_percent: 1.726619268,
        lifting_percent: 89.4479604,
        avg_weight: 1.791257443,
        mean_age: None,
        farmer_profit_kg: None,
        msp_kg: None,
        lot_grade: "A".into(),
        production_cost_details: vec![
            cost_row("Chicks", Number(15959.0), Number(27.0), 430893.0),
            cost_row(FEED_ROW, Number(44150.0), Number(41.5), 1832225.0),
            cost_row("Medicine", Text("ACTUAL".into()), CostCell::empty(), 54580.0),
            cost_row("Admin", Number(15959.0), Number(2.2), 35109.8),
            cost_row(TOTAL_ROW, CostCell::empty(), CostCell::empty(), 2352807.8),
        ],
        production_cost_per_kg: 92.01366434,
        basic: 8.0,
        performance: "82-10.01366434-5.006832172".into(),
        bal: -2.993167828,
        shorting_bird_kg: "0 82 0".into(),
        extra_mortality: "797.95 886.05 23923.35".into(),
        minimum_growing_charge: "3*25570.2 76710.6".into(),
        final_amount: 76710.6,
    }
}

fn reports() -> &'static HashMap<&'static str, ProductionReport> {
    static REPORTS: OnceLock<HashMap<&'static str, ProductionReport>> = OnceLock::new();
    REPORTS.get_or_init(|| HashMap::from([(DEFAULT_REPORT_ID, sanjarwas_flock_1())]))
}

/// Look up a report, returning `None` for ids not in the table.
pub fn find_report(report_id: &str) -> Option<&'static ProductionReport> {
    reports().get(report_id)
}

/// Look up a report, falling back to the default report for unknown ids.
pub fn get_report_data(report_id: &str) -> &'static ProductionReport {
    find_report(report_id).unwrap_or_else(|| &reports()[DEFAULT_REPORT_ID])
}

/// Ids present in the static table, sorted.
pub fn report_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = reports().keys().copied().collect();
    ids.sort_unstable();
    ids
}

// ---------------------------------------------------------------------------
// Derived figures
// ---------------------------------------------------------------------------

/// Figures recomputed from a report's raw counts and cost rows.
///
/// A field is `None` when its denominator is zero or its input row is
/// missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFigures {
    pub mortality_percent: Option<f64>,
    pub lifting_percent: Option<f64>,
    pub avg_weight_kg: Option<f64>,
    pub fcr: Option<f64>,
    /// Sum of all numeric amounts except the total row.
    pub total_cost: f64,
    pub cost_per_kg: Option<f64>,
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

impl ReportFigures {
    pub fn from_report(report: &ProductionReport) -> Self {
        let housed = report.chicks_housed as f64;
        let feed_kg = report
            .production_cost_details
            .iter()
            .find(|row| row.item.eq_ignore_ascii_case(FEED_ROW))
            .and_then(|row| row.quantity.as_number());
        let total_cost: f64 = report
            .production_cost_details
            .iter()
            .filter(|row| !row.item.eq_ignore_ascii_case(TOTAL_ROW))
            .filter_map(|row| row.amount.as_number())
            .sum();

        Self {
            mortality_percent: ratio(report.mortality_nos as f64 * 100.0, housed),
            lifting_percent: ratio(report.bird_lifted as f64 * 100.0, housed),
            avg_weight_kg: ratio(report.bird_weight, report.bird_lifted as f64),
            fcr: feed_kg.and_then(|kg| ratio(kg, report.bird_weight)),
            total_cost,
            cost_per_kg: ratio(total_cost, report.bird_weight),
        }
    }

    /// Names of stored report fields that disagree with the recomputed
    /// figures by more than `tolerance` (relative).
    pub fn mismatches(&self, report: &ProductionReport, tolerance: f64) -> Vec<&'static str> {
        let stated_total = report
            .production_cost_details
            .iter()
            .find(|row| row.item.eq_ignore_ascii_case(TOTAL_ROW))
            .and_then(|row| row.amount.as_number());

        let checks = [
            ("totalMortalityPercent", self.mortality_percent, Some(report.total_mortality_percent)),
            ("liftingPercent", self.lifting_percent, Some(report.lifting_percent)),
            ("avgWeight", self.avg_weight_kg, Some(report.avg_weight)),
            ("fcrPercent", self.fcr, Some(report.fcr_percent)),
            ("productionCostPerKg", self.cost_per_kg, Some(report.production_cost_per_kg)),
            ("TOTAL", Some(self.total_cost), stated_total),
        ];

        checks
            .into_iter()
            .filter_map(|(name, computed, stated)| match (computed, stated) {
                (Some(c), Some(s)) if !within(c, s, tolerance) => Some(name),
                _ => None,
            })
            .collect()
    }
}

fn within(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(f64::EPSILON);
    (a - b).abs() / scale <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_default_report() {
        assert_eq!(get_report_data("1"), get_report_data("unknown-id"));
        assert!(std::ptr::eq(get_report_data("1"), get_report_data("")));
    }

    #[test]
    fn find_report_distinguishes_misses() {
        assert!(find_report(DEFAULT_REPORT_ID).is_some());
        assert!(find_report("42").is_none());
        assert_eq!(report_ids(), vec!["1"]);
    }

    #[test]
    fn default_report_figures_match_stored_values() {
        let report = get_report_data(DEFAULT_REPORT_ID);
        let figures = ReportFigures::from_report(report);

        assert!(figures.mismatches(report, 1e-6).is_empty());
        assert!((figures.total_cost - 2352807.8).abs() < 1e-6);
    }

    #[test]
    fn tampered_report_is_flagged() {
        let mut report = get_report_data(DEFAULT_REPORT_ID).clone();
        report.mortality_nos = 100;
        let figures = ReportFigures::from_report(&report);
        assert_eq!(figures.mismatches(&report, 1e-6), vec!["totalMortalityPercent"]);
    }

    #[test]
    fn zero_denominators_yield_none() {
        let mut report = get_report_data(DEFAULT_REPORT_ID).clone();
        report.chicks_housed = 0;
        report.bird_weight = 0.0;
        let figures = ReportFigures::from_report(&report);
        assert!(figures.mortality_percent.is_none());
        assert!(figures.fcr.is_none());
        assert!(figures.cost_per_kg.is_none());
    }

    #[test]
    fn serializes_with_view_model_field_names() {
        let json = serde_json::to_value(get_report_data(DEFAULT_REPORT_ID)).unwrap();
        assert_eq!(json["farmerName"], "DEEPAK");
        assert_eq!(json["productionCostDetails"][2]["quantity"], "ACTUAL");
        assert_eq!(json["productionCostDetails"][0]["rate"], 27.0);
        assert!(json.get("mspKG").is_none());
    }

    #[test]
    fn cost_cell_from_text_keeps_words() {
        assert_eq!(CostCell::from_text("41.5"), CostCell::Number(41.5));
        assert_eq!(CostCell::from_text("ACTUAL"), CostCell::Text("ACTUAL".into()));
    }
}
