use std::env;
use std::time::Duration;

pub const DEFAULT_CORPUS_API_BASE_URL: &str = "https://api.corpus.swecha.org";

/// Runtime configuration for the Corpus API proxy
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the external Corpus API (default: "https://api.corpus.swecha.org")
    pub corpus_api_base_url: String,

    /// Timeout for login, identity and listing calls in seconds (default: 30)
    pub request_timeout_secs: u64,

    /// Timeout for record uploads in seconds (default: 60)
    pub upload_timeout_secs: u64,

    /// Maximum accepted file size in bytes (default: 256 MB)
    pub max_file_size: usize,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            corpus_api_base_url: DEFAULT_CORPUS_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            upload_timeout_secs: 60,
            max_file_size: 256 * 1024 * 1024, // 256 MB
            allowed_origins: vec![
                "https://craft-connect.streamlit.app".to_string(),
                "http://localhost:8501".to_string(), // Streamlit default
            ],
        }
    }
}

impl ProxyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            corpus_api_base_url: env::var("SWECHA_API_BASE_URL")
                .ok()
                .map(|v| normalize_url(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(default.corpus_api_base_url),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),

            upload_timeout_secs: env::var("UPLOAD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.upload_timeout_secs),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Point the proxy at a different Corpus API, keeping every other default
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            corpus_api_base_url: normalize_url(base_url),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

fn normalize_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(normalize_url)
        .filter(|s| !s.is_empty())
        .collect()
}
