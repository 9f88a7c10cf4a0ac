//! Backend liveness check.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::http::ApiContext;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Server clock, Unix seconds.
    pub timestamp: f64,
    pub version: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

pub struct HealthService {
    ctx: ApiContext,
}

impl HealthService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    pub async fn check(&self) -> ClientResult<HealthStatus> {
        let request = self
            .ctx
            .anonymous(Method::GET, self.ctx.endpoints().health_url());
        self.ctx.send_json(request, "Backend health check failed").await
    }
}
