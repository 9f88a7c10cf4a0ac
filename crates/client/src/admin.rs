//! Administrator operations: farmer management and the dashboard.

use kukkuta_core::dashboard::AdminDashboard;
use kukkuta_core::farmer::{
    validate_bulk_ids, validate_search_query, AdminFarmerCreate, AdminFarmerUpdate,
    BulkVerifyResponse, DeleteFarmerResponse, FarmerFilter, FarmerListItem, FarmerSearchResponse,
    FarmersCountResponse, DEFAULT_SEARCH_LIMIT,
};
use kukkuta_core::types::DbId;
use reqwest::Method;

use crate::error::ClientResult;
use crate::http::ApiContext;

pub struct AdminService {
    ctx: ApiContext,
}

impl AdminService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    fn farmers(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.ctx.endpoints().farmers_url())
    }

    /// List farmers. Only the filters that are set reach the query string.
    pub async fn get_all_farmers(&self, filter: &FarmerFilter) -> ClientResult<Vec<FarmerListItem>> {
        let request = self
            .ctx
            .authorized(Method::GET, self.farmers(""))
            .await?
            .query(&filter.query_pairs());
        self.ctx.send_json(request, "Failed to fetch farmers").await
    }

    pub async fn get_farmer_by_id(&self, farmer_id: DbId) -> ClientResult<FarmerListItem> {
        let request = self
            .ctx
            .authorized(Method::GET, self.farmers(&farmer_id.to_string()))
            .await?;
        self.ctx.send_json(request, "Failed to fetch farmer").await
    }

    /// Create a farmer and its user account. Blank required fields are
    /// rejected without contacting the backend.
    pub async fn create_farmer(&self, payload: &AdminFarmerCreate) -> ClientResult<FarmerListItem> {
        payload.validate()?;
        let request = self
            .ctx
            .authorized(Method::POST, self.farmers("admin/create"))
            .await?
            .json(payload);
        let created: FarmerListItem = self.ctx.send_json(request, "Failed to create farmer").await?;
        tracing::info!(farmer_id = created.id, user_id = created.user_id, "Created farmer");
        Ok(created)
    }

    pub async fn update_farmer(
        &self,
        farmer_id: DbId,
        patch: &AdminFarmerUpdate,
    ) -> ClientResult<FarmerListItem> {
        let request = self
            .ctx
            .authorized(Method::PUT, self.farmers(&farmer_id.to_string()))
            .await?
            .json(patch);
        self.ctx.send_json(request, "Failed to update farmer").await
    }

    /// Delete a farmer profile, and its user account when
    /// `delete_user_account` is set.
    pub async fn delete_farmer(
        &self,
        farmer_id: DbId,
        delete_user_account: bool,
    ) -> ClientResult<DeleteFarmerResponse> {
        let mut request = self
            .ctx
            .authorized(Method::DELETE, self.farmers(&farmer_id.to_string()))
            .await?;
        if delete_user_account {
            request = request.query(&[("delete_user_account", "true")]);
        }
        let deleted: DeleteFarmerResponse =
            self.ctx.send_json(request, "Failed to delete farmer").await?;
        tracing::info!(farmer_id, user_deleted = deleted.user_deleted, "Deleted farmer");
        Ok(deleted)
    }

    pub async fn get_farmers_count(&self) -> ClientResult<FarmersCountResponse> {
        let request = self
            .ctx
            .authorized(Method::GET, self.farmers("admin/count"))
            .await?;
        self.ctx
            .send_json(request, "Failed to fetch farmers statistics")
            .await
    }

    /// Set the verification flag on every listed farmer in one request.
    ///
    /// Ids travel as the JSON body, the flag as a query parameter.
    pub async fn bulk_verify_farmers(
        &self,
        farmer_ids: &[DbId],
        is_verified: bool,
    ) -> ClientResult<BulkVerifyResponse> {
        validate_bulk_ids(farmer_ids)?;
        let request = self
            .ctx
            .authorized(Method::PUT, self.farmers("admin/bulk-verify"))
            .await?
            .query(&[("is_verified", is_verified.to_string())])
            .json(farmer_ids);
        let result: BulkVerifyResponse = self
            .ctx
            .send_json(request, "Failed to bulk verify farmers")
            .await?;
        tracing::info!(
            requested = farmer_ids.len(),
            updated = result.updated_count,
            is_verified,
            "Bulk verification applied",
        );
        Ok(result)
    }

    /// Free-text search over name, email and phone, returning at most
    /// `limit` matches ([`DEFAULT_SEARCH_LIMIT`] when `None`).
    pub async fn search_farmers(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> ClientResult<FarmerSearchResponse> {
        validate_search_query(query)?;
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let request = self
            .ctx
            .authorized(Method::GET, self.farmers("admin/search"))
            .await?
            .query(&[("query", query.to_string()), ("limit", limit.to_string())]);
        self.ctx.send_json(request, "Failed to search farmers").await
    }

    pub async fn dashboard(&self) -> ClientResult<AdminDashboard> {
        let url = format!("{}/dashboard", self.ctx.endpoints().admin_url());
        let request = self.ctx.authorized(Method::GET, url).await?;
        self.ctx.send_json(request, "Failed to fetch dashboard").await
    }
}
