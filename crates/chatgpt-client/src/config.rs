//! Client configuration.
//!
//! A [`ClientConfig`] is built once and handed to the transport; nothing in it
//! changes for the lifetime of the client. It can be assembled in code or
//! read from `CHATGPT_*` environment variables.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatgpt_client::config::{ClientConfig, ProxyConfig};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new("sk-...")
//!     .with_timeout(Duration::from_secs(30))
//!     .with_proxy(ProxyConfig::new("10.0.0.1", 3128).with_credentials("user", "secret"));
//! ```

use std::env;
use std::fmt;
use std::time::Duration;

use chatgpt_core::defaults;
use chatgpt_core::{Error, Result};
use tracing::debug;

/// How server certificates are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsPolicy {
    /// Validate certificate chains against the platform roots.
    #[default]
    Verify,
    /// Accept any certificate chain. Needed behind TLS-intercepting proxies;
    /// removes protection against man-in-the-middle attacks.
    AcceptInvalidCerts,
}

/// Upstream HTTP proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Basic-auth credentials sent as `Proxy-Authorization`.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// `http://host:port`
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Everything needed to build a transport.
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent on every request.
    pub token: String,
    /// Read timeout.
    pub timeout: Duration,
    /// Scheme and host of the API, without the `/v1` prefix.
    pub base_url: String,
    /// Optional upstream proxy; `None` disables proxying entirely.
    pub proxy: Option<ProxyConfig>,
    pub tls: TlsPolicy,
}

impl ClientConfig {
    /// Configuration with default timeout, base URL and no proxy.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
            base_url: defaults::BASE_URL.to_string(),
            proxy: None,
            tls: TlsPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_tls(mut self, tls: TlsPolicy) -> Self {
        self.tls = tls;
        self
    }

    /// Load from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | CHATGPT_TOKEN | `OPENAI_API_KEY` | Bearer token (required) |
    /// | CHATGPT_TIMEOUT | 10 | Read timeout (seconds) |
    /// | CHATGPT_BASE_URL | https://api.openai.com | API host |
    /// | CHATGPT_PROXY_IP | (none) | Proxy host |
    /// | CHATGPT_PROXY_PORT | (none) | Proxy port |
    /// | CHATGPT_PROXY_USERNAME | (none) | Proxy user |
    /// | CHATGPT_PROXY_PASSWORD | (none) | Proxy password |
    /// | CHATGPT_ACCEPT_INVALID_CERTS | false | Skip certificate validation |
    pub fn from_env() -> Result<Self> {
        let token = env::var(defaults::ENV_TOKEN)
            .or_else(|_| env::var(defaults::ENV_OPENAI_API_KEY))
            .map_err(|_| {
                Error::Config(format!(
                    "{} or {} must be set",
                    defaults::ENV_TOKEN,
                    defaults::ENV_OPENAI_API_KEY
                ))
            })?;

        let mut config = Self::new(token);

        if let Ok(raw) = env::var(defaults::ENV_TIMEOUT) {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a number of seconds, got: {}",
                    defaults::ENV_TIMEOUT,
                    raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(base_url) = env::var(defaults::ENV_BASE_URL) {
            config.base_url = base_url;
        }

        let host = env::var(defaults::ENV_PROXY_IP).ok();
        let port = env::var(defaults::ENV_PROXY_PORT).ok();
        if let (Some(host), Some(port)) = (host, port) {
            let port: u16 = port.parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a port number, got: {}",
                    defaults::ENV_PROXY_PORT,
                    port
                ))
            })?;
            let mut proxy = ProxyConfig::new(host, port);
            proxy.username = env::var(defaults::ENV_PROXY_USERNAME).ok();
            proxy.password = env::var(defaults::ENV_PROXY_PASSWORD).ok();
            config.proxy = Some(proxy);
        }

        let relaxed = env::var(defaults::ENV_ACCEPT_INVALID_CERTS)
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        if relaxed {
            config.tls = TlsPolicy::AcceptInvalidCerts;
        }

        debug!(?config, "Loaded client configuration from environment");
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::Config("token cannot be empty".to_string()));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if let Some(proxy) = &self.proxy {
            if proxy.host.trim().is_empty() {
                return Err(Error::Config("proxy host cannot be empty".to_string()));
            }
            if proxy.password.is_some() && proxy.username.is_none() {
                return Err(Error::Config("proxy password given without a username".to_string()));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"***")
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("tls", &self.tls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("sk-test");
        assert_eq!(config.token, "sk-test");
        assert_eq!(config.timeout, Duration::from_secs(defaults::TIMEOUT_SECS));
        assert_eq!(config.base_url, defaults::BASE_URL);
        assert!(config.proxy.is_none());
        assert_eq!(config.tls, TlsPolicy::Verify);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let err = ClientConfig::new("  ").validate().unwrap_err();
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClientConfig::new("sk-test").with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ClientConfig::new("sk-test").with_base_url("api.openai.com");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_validate_rejects_empty_proxy_host() {
        let config = ClientConfig::new("sk-test").with_proxy(ProxyConfig::new("", 8080));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_proxy_password_without_username() {
        let mut proxy = ProxyConfig::new("10.0.0.1", 3128);
        proxy.password = Some("s3cret".to_string());
        let err = ClientConfig::new("sk-test").with_proxy(proxy).validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_validate_accepts_proxy_username_without_password() {
        let mut proxy = ProxyConfig::new("10.0.0.1", 3128);
        proxy.username = Some("alice".to_string());
        assert!(ClientConfig::new("sk-test").with_proxy(proxy).validate().is_ok());
    }

    #[test]
    fn test_proxy_url() {
        let proxy = ProxyConfig::new("127.0.0.1", 3128);
        assert_eq!(proxy.url(), "http://127.0.0.1:3128");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = ClientConfig::new("sk-very-secret")
            .with_proxy(ProxyConfig::new("proxy", 8080).with_credentials("alice", "hunter2"));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-very-secret"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("alice"));
    }
}
