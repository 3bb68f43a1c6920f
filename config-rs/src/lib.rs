//! config-rs/lib.rs
//! Shared configuration for the event planner services.
//! Reads the process environment once at startup into explicit structs that
//! are then handed to the clients that need them.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default upload limit for contract files (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Load a `.env` file if one exists. Missing files are not an error.
pub fn load_dotenv() {
    if dotenv::dotenv().is_err() {
        log::debug!("No .env file found, using process environment only");
    }
}

// Read an environment variable and parse it, falling back to `default` when
// the variable is absent or unparsable.
fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Invalid value in {}, using default", name);
            default
        }),
        Err(_) => default,
    }
}

fn get_env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get service port from environment variables with proper fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "API_GATEWAY")
/// * `default_port` - The default port to use if not specified in environment
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    get_env_var(&var_name, default_port)
}

/// Create a SocketAddr for binding a service
///
/// `{SERVICE}_SERVICE_ADDR` may hold a full `host:port` (optionally with an
/// `http://` prefix); otherwise the service binds `0.0.0.0` on the port from
/// [`get_service_port`].
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Ok(addr_str) = env::var(&var_name) {
        let trimmed = addr_str
            .trim()
            .trim_start_matches("http://")
            .trim_start_matches("https://");
        if let Ok(addr) = trimmed.parse::<SocketAddr>() {
            return addr;
        }
        log::warn!("Invalid address format in {}, using default", var_name);
    }

    let port = get_service_port(service_name, default_port);
    SocketAddr::from(([0, 0, 0, 0], port))
}

/// Settings for the generative-AI provider (text + embeddings).
#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub text_model: String,
    pub embedding_model: String,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    /// Cap for waits after transport-level failures
    pub network_max_retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            api_version: "v1beta".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            max_retries: 3,
            initial_retry_delay_ms: 1000,
            max_retry_delay_ms: 30_000,
            network_max_retry_delay_ms: 8000,
            request_timeout_secs: 60,
        }
    }
}

impl AiConfig {
    /// Reads:
    /// - GEMINI_API_KEY: provider credential (trimmed)
    /// - GEMINI_BASE_URL / GEMINI_API_VERSION
    /// - GEMINI_TEXT_MODEL / GEMINI_EMBEDDING_MODEL
    /// - LLM_MAX_RETRIES (default: 3)
    /// - LLM_INITIAL_RETRY_DELAY_MS (default: 1000)
    /// - LLM_MAX_RETRY_DELAY_MS (default: 30000)
    /// - LLM_NETWORK_MAX_RETRY_DELAY_MS (default: 8000)
    /// - LLM_REQUEST_TIMEOUT_SECS (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            api_key: get_env_optional("GEMINI_API_KEY").unwrap_or_default(),
            base_url: get_env_string("GEMINI_BASE_URL", &defaults.base_url),
            api_version: get_env_string("GEMINI_API_VERSION", &defaults.api_version),
            text_model: get_env_string("GEMINI_TEXT_MODEL", &defaults.text_model),
            embedding_model: get_env_string("GEMINI_EMBEDDING_MODEL", &defaults.embedding_model),
            max_retries: get_env_var("LLM_MAX_RETRIES", defaults.max_retries),
            initial_retry_delay_ms: get_env_var(
                "LLM_INITIAL_RETRY_DELAY_MS",
                defaults.initial_retry_delay_ms,
            ),
            max_retry_delay_ms: get_env_var("LLM_MAX_RETRY_DELAY_MS", defaults.max_retry_delay_ms),
            network_max_retry_delay_ms: get_env_var(
                "LLM_NETWORK_MAX_RETRY_DELAY_MS",
                defaults.network_max_retry_delay_ms,
            ),
            request_timeout_secs: get_env_var(
                "LLM_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
        };

        if config.is_configured() {
            log::info!("Gemini API key found ({} chars)", config.api_key.len());
        } else {
            log::warn!("GEMINI_API_KEY not set; generation will fall back to static results");
        }

        config
    }

    /// Check if an API key is present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// The key must never reach a log line, so Debug is written by hand.
impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("text_model", &self.text_model)
            .field("embedding_model", &self.embedding_model)
            .field("max_retries", &self.max_retries)
            .field("initial_retry_delay_ms", &self.initial_retry_delay_ms)
            .field("max_retry_delay_ms", &self.max_retry_delay_ms)
            .field("network_max_retry_delay_ms", &self.network_max_retry_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Settings for the vector index used by semantic vendor search.
#[derive(Clone)]
pub struct VectorIndexConfig {
    pub api_key: String,
    /// Index data-plane host, e.g. `https://vendors-abc123.svc.pinecone.io`
    pub host: String,
    pub top_k: usize,
    pub request_timeout_secs: u64,
}

impl VectorIndexConfig {
    /// Returns `None` when either PINECONE_API_KEY or PINECONE_INDEX_HOST is
    /// missing; semantic search is then skipped.
    pub fn from_env() -> Option<Self> {
        let api_key = get_env_optional("PINECONE_API_KEY");
        let host = get_env_optional("PINECONE_INDEX_HOST");

        match (api_key, host) {
            (Some(api_key), Some(host)) => {
                let host = if host.starts_with("http://") || host.starts_with("https://") {
                    host
                } else {
                    format!("https://{}", host)
                };
                Some(Self {
                    api_key,
                    host: host.trim_end_matches('/').to_string(),
                    top_k: get_env_var("VECTOR_TOP_K", 5),
                    request_timeout_secs: get_env_var("VECTOR_REQUEST_TIMEOUT_SECS", 30),
                })
            }
            _ => {
                log::warn!("Vector index not configured; semantic vendor search disabled");
                None
            }
        }
    }
}

impl fmt::Debug for VectorIndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorIndexConfig")
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("top_k", &self.top_k)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// HTTP gateway settings
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: get_bind_address("API_GATEWAY", 5002),
            max_upload_bytes: get_env_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}
