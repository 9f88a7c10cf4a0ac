use kukkuta_core::error::CoreError;

use crate::store::StoreError;

/// Errors from the Kukkuta REST client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body
    /// decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// `message` is the server's `detail` when it sent one, otherwise the
    /// operation's fallback text ("Failed to ...").
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    /// A protected call was attempted with no stored access token. Nothing
    /// was sent.
    #[error("Not authenticated: no access token stored")]
    NotAuthenticated,

    /// Client-side validation rejected the input. Nothing was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    /// A local file (e.g. a photo to upload) could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The server-provided `detail`, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a backend error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Pull the `detail` field out of an error body.
///
/// The backend sends a string for business errors and a list of field
/// errors for request validation failures; the latter is returned as its
/// JSON text.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
