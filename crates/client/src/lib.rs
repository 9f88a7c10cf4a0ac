//! Typed REST client for the Kukkuta Kendra backend.
//!
//! [`KukkutaClient`] owns one pooled HTTP client, the resolved endpoints
//! and the session store, and hands out a service per resource. Every
//! protected call reads the stored bearer token; with no token stored it
//! fails with [`ClientError::NotAuthenticated`] before sending.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod farmer;
pub mod health;
pub mod http;
pub mod mill;
pub mod production;
pub mod routine;
pub mod session;
pub mod store;

use std::sync::Arc;

pub use kukkuta_core as domain;

pub use config::{ClientConfig, Endpoints};
pub use error::{ClientError, ClientResult};
pub use http::ApiContext;
pub use session::SessionStore;
pub use store::{CredentialStore, FileStore, MemoryStore};

#[derive(Clone)]
pub struct KukkutaClient {
    ctx: ApiContext,
}

impl KukkutaClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> ClientResult<Self> {
        let ctx = ApiContext::new(config, SessionStore::new(store))?;
        Ok(Self { ctx })
    }

    /// Build a client from configuration, persisting the session to
    /// `session_file` when one is configured and in memory otherwise.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let store: Arc<dyn CredentialStore> = match &config.session_file {
            Some(path) => Arc::new(FileStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        };
        Self::new(config, store)
    }

    pub fn from_context(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ApiContext {
        &self.ctx
    }

    pub fn auth(&self) -> auth::AuthService {
        auth::AuthService::new(self.ctx.clone())
    }

    pub fn farmer(&self) -> farmer::FarmerProfileService {
        farmer::FarmerProfileService::new(self.ctx.clone())
    }

    pub fn routine(&self) -> routine::RoutineService {
        routine::RoutineService::new(self.ctx.clone())
    }

    pub fn admin(&self) -> admin::AdminService {
        admin::AdminService::new(self.ctx.clone())
    }

    pub fn mill(&self) -> mill::MillService {
        mill::MillService::new(self.ctx.clone())
    }

    pub fn production(&self) -> production::ProductionService {
        production::ProductionService::new(self.ctx.clone())
    }

    pub fn health(&self) -> health::HealthService {
        health::HealthService::new(self.ctx.clone())
    }
}
