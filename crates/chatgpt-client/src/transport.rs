//! HTTP transport: a configured blocking client plus the bearer interceptor.
//!
//! The client keeps a small idle pool (five connections, one second keep-alive),
//! never retries on its own, and only proxies when a [`ProxyConfig`] is given.
//! Environment proxy variables are ignored.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chatgpt_core::defaults;
use chatgpt_core::{Error, Result};
use reqwest::blocking::{Client, Request, RequestBuilder, Response};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, Proxy, Url};
use tracing::{info, warn};

use crate::config::{ClientConfig, ProxyConfig, TlsPolicy};

/// Configured HTTP client shared by every call of one service.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    authorization: HeaderValue,
    tls_policy: TlsPolicy,
}

impl Transport {
    /// Build a transport from the configuration.
    ///
    /// If the relaxed TLS policy cannot be installed, the transport falls back to
    /// normal certificate verification and logs a warning; [`Transport::tls_policy`]
    /// reports what is actually in effect.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let authorization = bearer(&config.token)?;
        let proxy = config.proxy.as_ref().map(build_proxy).transpose()?;

        if config.tls == TlsPolicy::AcceptInvalidCerts {
            warn!("TLS certificate validation is disabled for this client");
        }

        let (client, tls_policy) = match build_client(config, proxy.clone(), config.tls) {
            Ok(client) => (client, config.tls),
            Err(e) if config.tls == TlsPolicy::AcceptInvalidCerts => {
                warn!(
                    error = %e,
                    "Could not install relaxed TLS policy, falling back to certificate verification"
                );
                (build_client(config, proxy, TlsPolicy::Verify)?, TlsPolicy::Verify)
            }
            Err(e) => return Err(e.into()),
        };

        let proxy_url = config
            .proxy
            .as_ref()
            .map(ProxyConfig::url)
            .unwrap_or_else(|| "(none)".to_string());
        info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            proxy = %proxy_url,
            tls = ?tls_policy,
            "Initialized HTTP transport"
        );

        Ok(Self {
            client,
            authorization,
            tls_policy,
        })
    }

    /// TLS policy in effect after construction.
    pub fn tls_policy(&self) -> TlsPolicy {
        self.tls_policy
    }

    /// Start a request against this transport's client.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Set `Authorization: Bearer <token>`, replacing any value already present.
    pub fn authorize(&self, request: &mut Request) {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.authorization.clone());
    }

    /// Authorize and send. Blocks until the response head arrives.
    pub fn execute(&self, mut request: Request) -> reqwest::Result<Response> {
        self.authorize(&mut request);
        self.client.execute(request)
    }
}

fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| Error::Config("token is not a valid header value".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// `Basic base64(username:password)`, as sent in `Proxy-Authorization`.
pub fn proxy_authorization(username: &str, password: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|e| Error::Config(format!("invalid proxy credentials: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

// The same header is used for the CONNECT handshake and for plain-HTTP
// requests forwarded through the proxy.
fn build_proxy(config: &ProxyConfig) -> Result<Proxy> {
    let mut proxy = Proxy::all(config.url())
        .map_err(|e| Error::Config(format!("invalid proxy address {}: {}", config.url(), e)))?;

    if let Some(username) = &config.username {
        let password = config.password.as_deref().unwrap_or_default();
        proxy = proxy.custom_http_auth(proxy_authorization(username, password)?);
    }

    Ok(proxy)
}

fn build_client(
    config: &ClientConfig,
    proxy: Option<Proxy>,
    tls: TlsPolicy,
) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .timeout(config.timeout)
        .pool_max_idle_per_host(defaults::POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(defaults::POOL_KEEP_ALIVE_SECS));

    builder = match proxy {
        Some(proxy) => builder.proxy(proxy),
        None => builder.no_proxy(),
    };

    if tls == TlsPolicy::AcceptInvalidCerts {
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build()
}
