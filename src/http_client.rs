use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::ScanConfig;

/// HTTP client for probing: fixed headers, one timeout, no retries.
///
/// Response bodies are never decompressed, so a declared `Content-Length`
/// is the wire value.
pub fn create_probe_client(config: &ScanConfig) -> anyhow::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language).context("invalid Accept-Language value")?,
    );

    ClientBuilder::new()
        .pool_max_idle_per_host(config.effective_concurrency())
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_nodelay(true)

        // Timeouts
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))

        // Headers
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)

        // Redirects
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))

        // TLS, self-signed certificates accepted
        .use_rustls_tls()
        .danger_accept_invalid_certs(true)

        .build()
        .context("failed to build HTTP client")
}
