//! API configuration for frontend-backend communication
//!
//! The backend serves the REST API under `/api` on its own port; the
//! browser talks to it from whatever host served the WASM bundle.

/// Port of the backend server
pub const BACKEND_PORT: u16 = 8080;

/// Path prefix of every REST endpoint
pub const API_PREFIX: &str = "/api";

/// Where the REST API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and port, e.g. "http://localhost:8080"
    pub base_url: String,
    /// Prefix placed between the base URL and every endpoint path
    pub api_prefix: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: API_PREFIX.to_string(),
        }
    }

    /// Config derived from the current window location (browser only).
    pub fn from_window() -> Self {
        Self::new(api_base())
    }

    /// Joins base URL, prefix and `path` with exactly one slash at each seam.
    ///
    /// ```rust,ignore
    /// let cfg = ApiConfig::new("http://localhost:8080/");
    /// assert_eq!(cfg.url("item-requests/42"), "http://localhost:8080/api/item-requests/42");
    /// ```
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}/{}", base, prefix, path)
        }
    }
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using [`BACKEND_PORT`] for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:8080"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}
