//! Shared HTTP plumbing for the service clients.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, Endpoints};
use crate::error::{extract_detail, ClientError, ClientResult};
use crate::session::SessionStore;

/// Everything a service needs to talk to the backend: one pooled HTTP
/// client, the resolved endpoints and the session.
#[derive(Clone)]
pub struct ApiContext {
    http: reqwest::Client,
    endpoints: Arc<Endpoints>,
    session: SessionStore,
}

impl ApiContext {
    /// Build a context from configuration, applying the request timeout if
    /// one is configured.
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config.endpoints(), session))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints, session: SessionStore) -> Self {
        Self {
            http,
            endpoints: Arc::new(endpoints),
            session,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// A request without credentials.
    pub(crate) fn anonymous(&self, method: Method, url: String) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// A request carrying the stored bearer token.
    ///
    /// Fails with [`ClientError::NotAuthenticated`] before anything is
    /// sent when no token is stored.
    pub(crate) async fn authorized(&self, method: Method, url: String) -> ClientResult<RequestBuilder> {
        let token = self.session.require_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request, returning the raw response whatever its status.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let request = builder.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending API request");
        Ok(self.http.execute(request).await?)
    }

    /// Send a request and parse its JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &'static str,
    ) -> ClientResult<T> {
        let response = ensure_success(self.execute(builder).await?, fallback).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request and discard its body.
    pub(crate) async fn send_empty(
        &self,
        builder: RequestBuilder,
        fallback: &'static str,
    ) -> ClientResult<()> {
        ensure_success(self.execute(builder).await?, fallback).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into [`ClientError::Api`], preferring the
/// server's `detail` over `fallback`.
async fn ensure_success(response: Response, fallback: &'static str) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    tracing::warn!(
        status = status.as_u16(),
        url = %url,
        detail = detail.as_deref().unwrap_or(""),
        "API request failed",
    );

    Err(ClientError::Api {
        status: status.as_u16(),
        message: detail.clone().unwrap_or_else(|| fallback.to_string()),
        detail,
    })
}
