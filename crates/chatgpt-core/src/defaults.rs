//! Centralized default constants for the chatgpt client.
//!
//! Every crate in the workspace references these instead of defining its own
//! magic numbers.

// =============================================================================
// REMOTE
// =============================================================================

/// Base URL of the OpenAI API. Endpoint paths carry the `/v1` prefix.
pub const BASE_URL: &str = "https://api.openai.com";

/// Default chat model used by the command-line binary.
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";

// =============================================================================
// TRANSPORT
// =============================================================================

/// Default read timeout in seconds.
pub const TIMEOUT_SECS: u64 = 10;

/// Maximum idle connections kept per host.
pub const POOL_MAX_IDLE: usize = 5;

/// Seconds an idle pooled connection is kept alive.
pub const POOL_KEEP_ALIVE_SECS: u64 = 1;

// =============================================================================
// MULTIPART
// =============================================================================

/// Content type for uploaded files whose type cannot be detected.
pub const UPLOAD_FALLBACK_MIME: &str = "text/plain";

/// Content type for image parts whose type cannot be detected.
pub const IMAGE_FALLBACK_MIME: &str = "image/png";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Bearer token.
pub const ENV_TOKEN: &str = "CHATGPT_TOKEN";

/// Bearer token fallback, shared with other OpenAI tooling.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Read timeout in seconds.
pub const ENV_TIMEOUT: &str = "CHATGPT_TIMEOUT";

/// Base URL override.
pub const ENV_BASE_URL: &str = "CHATGPT_BASE_URL";

/// Proxy host.
pub const ENV_PROXY_IP: &str = "CHATGPT_PROXY_IP";

/// Proxy port.
pub const ENV_PROXY_PORT: &str = "CHATGPT_PROXY_PORT";

/// Proxy basic-auth user name.
pub const ENV_PROXY_USERNAME: &str = "CHATGPT_PROXY_USERNAME";

/// Proxy basic-auth password.
pub const ENV_PROXY_PASSWORD: &str = "CHATGPT_PROXY_PASSWORD";

/// Set to "1" or "true" to accept any TLS certificate.
pub const ENV_ACCEPT_INVALID_CERTS: &str = "CHATGPT_ACCEPT_INVALID_CERTS";
