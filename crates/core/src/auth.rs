//! Account registration, login and session types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::UserRole;
use crate::types::DbId;

/// Credential-store key holding the bearer token.
pub const KEY_ACCESS_TOKEN: &str = "access_token";
/// Credential-store key holding the role string.
pub const KEY_USER_ROLE: &str = "user_role";
/// Credential-store key holding the stringified user id.
pub const KEY_USER_ID: &str = "user_id";

/// Every key written by login and removed by logout.
pub const SESSION_KEYS: [&str; 3] = [KEY_ACCESS_TOKEN, KEY_USER_ROLE, KEY_USER_ID];

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: DbId,
    pub role: UserRole,
}

/// An authenticated session as persisted in the credential store.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub role: UserRole,
    pub user_id: DbId,
}

impl Session {
    /// Rebuild a session from the three stored string values.
    pub fn from_stored(access_token: &str, role: &str, user_id: &str) -> Result<Self, CoreError> {
        let role = role.parse()?;
        let user_id = user_id
            .parse()
            .map_err(|_| CoreError::Validation(format!("Stored user id '{user_id}' is not an integer")))?;
        Ok(Self {
            access_token: access_token.to_string(),
            role,
            user_id,
        })
    }
}

impl From<&AuthResponse> for Session {
    fn from(resp: &AuthResponse) -> Self {
        Self {
            access_token: resp.access_token.clone(),
            role: resp.role,
            user_id: resp.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_from_stored_parses_role_and_id() {
        let session = Session::from_stored("tok", "admin", "42").unwrap();
        assert_eq!(session.role, UserRole::Admin);
        assert_eq!(session.user_id, 42);
    }

    #[test]
    fn session_from_stored_rejects_non_numeric_id() {
        let err = Session::from_stored("tok", "farmer", "abc").unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }

    #[test]
    fn login_payload_debug_hides_password() {
        let payload = LoginPayload {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{payload:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("a@b.c"));
    }

    #[test]
    fn auth_response_parses_backend_body() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"access_token":"t","token_type":"bearer","user_id":7,"role":"farmer"}"#,
        )
        .unwrap();
        assert_eq!(Session::from(&resp).user_id, 7);
    }
}
