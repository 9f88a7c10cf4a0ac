//! The authenticated farmer's own profile.

use kukkuta_core::farmer::{FarmerProfile, FarmerProfileUpdate};
use reqwest::Method;

use crate::error::ClientResult;
use crate::http::ApiContext;

pub struct FarmerProfileService {
    ctx: ApiContext,
}

impl FarmerProfileService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    fn me_url(&self) -> String {
        format!("{}/me", self.ctx.endpoints().farmers_url())
    }

    pub async fn get_profile(&self) -> ClientResult<FarmerProfile> {
        let request = self.ctx.authorized(Method::GET, self.me_url()).await?;
        self.ctx.send_json(request, "Failed to fetch profile").await
    }

    /// Apply a partial update. Fields are not validated client-side.
    pub async fn update_profile(&self, patch: &FarmerProfileUpdate) -> ClientResult<FarmerProfile> {
        let request = self
            .ctx
            .authorized(Method::PUT, self.me_url())
            .await?
            .json(patch);
        self.ctx.send_json(request, "Failed to update profile").await
    }
}
