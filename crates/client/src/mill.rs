//! Feed mill profile and order dispatch.

use kukkuta_core::mill::{FeedOrder, FeedOrderStatusUpdate, FeedType, Mill, MillUpdate, OrderStatus};
use kukkuta_core::types::DbId;
use reqwest::Method;

use crate::error::ClientResult;
use crate::http::ApiContext;

pub struct MillService {
    ctx: ApiContext,
}

impl MillService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.ctx.endpoints().mills_url())
    }

    pub async fn get_profile(&self) -> ClientResult<Mill> {
        let request = self.ctx.authorized(Method::GET, self.url("me")).await?;
        self.ctx.send_json(request, "Failed to fetch mill profile").await
    }

    pub async fn update_profile(&self, patch: &MillUpdate) -> ClientResult<Mill> {
        let request = self
            .ctx
            .authorized(Method::PUT, self.url("me"))
            .await?
            .json(patch);
        self.ctx.send_json(request, "Failed to update mill profile").await
    }

    /// Orders placed with this mill, newest first.
    pub async fn get_orders(&self, status: Option<OrderStatus>) -> ClientResult<Vec<FeedOrder>> {
        let pairs: Vec<(&str, &str)> = status
            .map(|s| ("status_filter", s.as_str()))
            .into_iter()
            .collect();
        let request = self
            .ctx
            .authorized(Method::GET, self.url("orders"))
            .await?
            .query(&pairs);
        self.ctx.send_json(request, "Failed to fetch orders").await
    }

    pub async fn get_order(&self, order_id: DbId) -> ClientResult<FeedOrder> {
        let request = self
            .ctx
            .authorized(Method::GET, self.url(&format!("orders/{order_id}")))
            .await?;
        self.ctx.send_json(request, "Failed to fetch order").await
    }

    pub async fn update_order_status(
        &self,
        order_id: DbId,
        update: &FeedOrderStatusUpdate,
    ) -> ClientResult<FeedOrder> {
        let request = self
            .ctx
            .authorized(Method::PUT, self.url(&format!("orders/{order_id}/status")))
            .await?
            .json(update);
        let order: FeedOrder = self
            .ctx
            .send_json(request, "Failed to update order status")
            .await?;
        tracing::info!(order_id, status = %order.status, "Order status updated");
        Ok(order)
    }

    /// Mark an order dispatched; the backend stamps the delivery date.
    pub async fn dispatch_order(&self, order_id: DbId) -> ClientResult<FeedOrder> {
        let update = FeedOrderStatusUpdate {
            status: Some(OrderStatus::Dispatched),
            ..Default::default()
        };
        self.update_order_status(order_id, &update).await
    }

    /// Feed types on offer. Listed without authentication.
    pub async fn get_feed_types(&self) -> ClientResult<Vec<FeedType>> {
        let request = self.ctx.anonymous(Method::GET, self.url("feed-types"));
        self.ctx.send_json(request, "Failed to fetch feed types").await
    }
}
