use std::path::PathBuf;
use std::time::Duration;

use kukkuta_core::error::CoreError;

/// Production backend.
pub const DEFAULT_BASE_URL: &str =
    "https://kukkuta-kendra-app-fgbaerahbufsage5.centralus-01.azurewebsites.net";

/// API version segment used in every versioned URL.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Backend URLs derived from a single base URL.
///
/// URLs are built by plain concatenation. A malformed base URL is not
/// rejected here; every request made with it fails at the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    api_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str, api_version: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_url: format!("{base_url}/api/{api_version}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/{version}`
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth", self.api_url)
    }

    pub fn farmers_url(&self) -> String {
        format!("{}/farmers", self.api_url)
    }

    pub fn routine_url(&self) -> String {
        format!("{}/routine", self.api_url)
    }

    pub fn mills_url(&self) -> String {
        format!("{}/mills", self.api_url)
    }

    pub fn admin_url(&self) -> String {
        format!("{}/admin", self.api_url)
    }

    pub fn production_url(&self) -> String {
        format!("{}/production", self.api_url)
    }

    /// Liveness endpoint; lives outside the versioned prefix.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
    /// Where to persist the session. `None` keeps it in memory.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with every other setting at
    /// its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: None,
            session_file: None,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                  |
    /// |--------------------------------|--------------------------|
    /// | `KUKKUTA_API_BASE_URL`         | [`DEFAULT_BASE_URL`]     |
    /// | `KUKKUTA_API_VERSION`          | `v1`                     |
    /// | `KUKKUTA_REQUEST_TIMEOUT_SECS` | unset (no timeout)       |
    /// | `KUKKUTA_SESSION_FILE`         | unset (in-memory store)  |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable
    /// source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let base_url = lookup("KUKKUTA_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let api_version =
            lookup("KUKKUTA_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.into());

        let request_timeout = lookup("KUKKUTA_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    CoreError::Validation(format!(
                        "KUKKUTA_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })
            })
            .transpose()?;

        let session_file = lookup("KUKKUTA_SESSION_FILE")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            base_url,
            api_version,
            request_timeout,
            session_file,
        })
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url, &self.api_version)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn derives_every_sub_resource() {
        let endpoints = Endpoints::new("http://10.0.0.5:8000", "v1");
        assert_eq!(endpoints.api_url(), "http://10.0.0.5:8000/api/v1");
        assert_eq!(endpoints.auth_url(), "http://10.0.0.5:8000/api/v1/auth");
        assert_eq!(endpoints.farmers_url(), "http://10.0.0.5:8000/api/v1/farmers");
        assert_eq!(endpoints.routine_url(), "http://10.0.0.5:8000/api/v1/routine");
        assert_eq!(endpoints.mills_url(), "http://10.0.0.5:8000/api/v1/mills");
        assert_eq!(endpoints.admin_url(), "http://10.0.0.5:8000/api/v1/admin");
        assert_eq!(
            endpoints.production_url(),
            "http://10.0.0.5:8000/api/v1/production"
        );
        assert_eq!(endpoints.health_url(), "http://10.0.0.5:8000/health");
    }

    #[test]
    fn malformed_base_is_concatenated_verbatim() {
        let endpoints = Endpoints::new("not a url", "v2");
        assert_eq!(endpoints.auth_url(), "not a url/api/v2/auth");
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, "v1");
        assert!(config.request_timeout.is_none());
        assert!(config.session_file.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("KUKKUTA_API_BASE_URL", "http://localhost:8000"),
            ("KUKKUTA_REQUEST_TIMEOUT_SECS", "15"),
            ("KUKKUTA_SESSION_FILE", "/tmp/session.json"),
        ]))
        .unwrap();
        assert_eq!(config.endpoints().health_url(), "http://localhost:8000/health");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/session.json")));
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[(
            "KUKKUTA_REQUEST_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
