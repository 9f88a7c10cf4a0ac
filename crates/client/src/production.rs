//! Production reports.
//!
//! The report viewer currently reads the static table in
//! [`kukkuta_core::report`]; this service reaches the backend records that
//! table stands in for.

use kukkuta_core::production::{ProductionReportRecord, ReportQuery};
use kukkuta_core::report::ProductionReport;
use kukkuta_core::types::DbId;
use reqwest::Method;

use crate::error::ClientResult;
use crate::http::ApiContext;

pub struct ProductionService {
    ctx: ApiContext,
}

impl ProductionService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    fn reports_url(&self) -> String {
        format!("{}/reports", self.ctx.endpoints().production_url())
    }

    /// The current farmer's reports, newest first.
    pub async fn get_my_reports(&self, query: &ReportQuery) -> ClientResult<Vec<ProductionReportRecord>> {
        let request = self
            .ctx
            .authorized(Method::GET, self.reports_url())
            .await?
            .query(&query.query_pairs());
        self.ctx
            .send_json(request, "Failed to fetch production reports")
            .await
    }

    pub async fn get_report(&self, report_id: DbId) -> ClientResult<ProductionReportRecord> {
        let url = format!("{}/{report_id}", self.reports_url());
        let request = self.ctx.authorized(Method::GET, url).await?;
        self.ctx
            .send_json(request, "Failed to fetch production report")
            .await
    }

    /// Fetch a report and convert it to the viewer's model.
    pub async fn get_report_view(&self, report_id: DbId) -> ClientResult<ProductionReport> {
        let record = self.get_report(report_id).await?;
        Ok(ProductionReport::from(&record))
    }
}
