//! Registration, login and logout.

use kukkuta_core::auth::{AuthResponse, LoginPayload, RegisterPayload, Session};
use reqwest::Method;

use crate::error::ClientResult;
use crate::http::ApiContext;

pub struct AuthService {
    ctx: ApiContext,
}

impl AuthService {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Create an account. The backend's response body is returned as-is.
    pub async fn register(&self, payload: &RegisterPayload) -> ClientResult<serde_json::Value> {
        let url = format!("{}/register", self.ctx.endpoints().auth_url());
        let request = self.ctx.anonymous(Method::POST, url).json(payload);
        let body = self.ctx.send_json(request, "Registration failed").await?;
        tracing::info!(email = %payload.email, role = %payload.role, "Registered account");
        Ok(body)
    }

    /// Log in and persist the session.
    ///
    /// The credential store is only written after the backend accepts the
    /// credentials; a failed login leaves it untouched.
    pub async fn login(&self, payload: &LoginPayload) -> ClientResult<AuthResponse> {
        let url = format!("{}/login", self.ctx.endpoints().auth_url());
        let request = self.ctx.anonymous(Method::POST, url).json(payload);
        let auth: AuthResponse = self.ctx.send_json(request, "Login failed").await?;

        self.ctx.session().save(&auth).await?;
        tracing::info!(user_id = auth.user_id, role = %auth.role, "Logged in");
        Ok(auth)
    }

    /// Forget the stored session. The backend is not contacted.
    pub async fn logout(&self) -> ClientResult<()> {
        self.ctx.session().clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// The stored access token, `None` when logged out.
    pub async fn get_token(&self) -> ClientResult<Option<String>> {
        Ok(self.ctx.session().token().await?)
    }

    pub async fn current_session(&self) -> ClientResult<Option<Session>> {
        Ok(self.ctx.session().current().await?)
    }
}
