//! Session persistence on top of a [`CredentialStore`].

use std::sync::Arc;

use kukkuta_core::auth::{AuthResponse, Session, KEY_ACCESS_TOKEN, KEY_USER_ID, KEY_USER_ROLE, SESSION_KEYS};

use crate::error::{ClientError, ClientResult};
use crate::store::{CredentialStore, MemoryStore, StoreError};

/// Explicit handle on the persisted session, shared by every service.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn CredentialStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The stored bearer token, or `None` when logged out.
    pub async fn token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(KEY_ACCESS_TOKEN).await
    }

    /// The stored bearer token, or [`ClientError::NotAuthenticated`].
    pub async fn require_token(&self) -> ClientResult<String> {
        self.token().await?.ok_or(ClientError::NotAuthenticated)
    }

    /// Persist a successful login.
    ///
    /// The token is written last so it is never present without its role
    /// and user id.
    pub async fn save(&self, auth: &AuthResponse) -> Result<(), StoreError> {
        self.store.set(KEY_USER_ROLE, auth.role.as_str()).await?;
        self.store
            .set(KEY_USER_ID, &auth.user_id.to_string())
            .await?;
        self.store.set(KEY_ACCESS_TOKEN, &auth.access_token).await
    }

    /// Remove every session key. The token goes first.
    pub async fn clear(&self) -> Result<(), StoreError> {
        for key in SESSION_KEYS {
            self.store.delete(key).await?;
        }
        Ok(())
    }

    /// The full stored session, or `None` if any part is missing or
    /// unreadable.
    pub async fn current(&self) -> Result<Option<Session>, StoreError> {
        let token = self.store.get(KEY_ACCESS_TOKEN).await?;
        let role = self.store.get(KEY_USER_ROLE).await?;
        let user_id = self.store.get(KEY_USER_ID).await?;

        let (Some(token), Some(role), Some(user_id)) = (token, role, user_id) else {
            return Ok(None);
        };

        match Session::from_stored(&token, &role, &user_id) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored session");
                Ok(None)
            }
        }
    }
}
