use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::config::ScanConfig;
use crate::http_client::create_probe_client;
use crate::probe::listing::is_directory_listing;
use crate::probe::outcome::{HeadOutcome, Outcome};
use crate::url::Url;

/// The probing surface the classifier and reconnaissance are written against.
///
/// Every call is exactly one request attempt. Implementations must not
/// panic on network faults; they report them through the return value.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn get(&self, url: &Url) -> Outcome;

    async fn head(&self, url: &Url) -> HeadOutcome;

    /// GET the URL and report whether it renders an autogenerated index.
    async fn looks_like_directory_listing(&self, url: &Url) -> bool;

    /// Body of a 200 response, `None` otherwise.
    async fn fetch_text(&self, url: &Url) -> Option<String>;
}

/// `reqwest`-backed [`Probe`].
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    pub fn new(config: &ScanConfig) -> anyhow::Result<Self> {
        Ok(Self { client: create_probe_client(config)? })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn declared_length(resp: &Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

#[async_trait]
impl Probe for ProbeClient {
    async fn get(&self, url: &Url) -> Outcome {
        match self.client.get(url.as_str()).send().await {
            Ok(resp) => {
                let outcome = Outcome::from_response(resp.status().as_u16(), declared_length(&resp));
                tracing::debug!(url = %url, ?outcome, "GET");
                outcome
            }
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "GET failed");
                Outcome::TransportFailure
            }
        }
    }

    async fn head(&self, url: &Url) -> HeadOutcome {
        match self.client.head(url.as_str()).send().await {
            Ok(resp) => match declared_length(&resp) {
                Some(len) => HeadOutcome::ContentLength(len),
                None => {
                    tracing::debug!(url = %url, "HEAD without Content-Length");
                    HeadOutcome::TransportFailure
                }
            },
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "HEAD failed");
                HeadOutcome::TransportFailure
            }
        }
    }

    async fn looks_like_directory_listing(&self, url: &Url) -> bool {
        let body = match self.client.get(url.as_str()).send().await {
            Ok(resp) => resp.text().await,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "listing check failed");
                return false;
            }
        };
        match body {
            Ok(html) => is_directory_listing(&html),
            Err(_) => false,
        }
    }

    async fn fetch_text(&self, url: &Url) -> Option<String> {
        let resp = self.client.get(url.as_str()).send().await.ok()?;
        if resp.status().as_u16() != 200 {
            return None;
        }
        resp.text().await.ok()
    }
}
