#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use joomla_hunter::{HeadOutcome, Outcome, Probe, Url};
use parking_lot::Mutex;

/// Probe double answering from a table keyed on path+query.
///
/// Unlisted GETs are `NotFound`. It also records every request and the
/// highest number of components that were being probed at once.
#[derive(Default)]
pub struct ScriptedProbe {
    pub gets: HashMap<String, Outcome>,
    pub heads: HashMap<String, u64>,
    pub listings: HashSet<String>,
    pub bodies: HashMap<String, String>,
    /// Panic when any of these resources is requested.
    pub panic_on: HashSet<String>,
    pub delay: Option<Duration>,
    pub requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, resource: &str) -> Self {
        self.gets.insert(resource.to_string(), Outcome::StatusCode(200));
        self
    }

    pub fn outcome(mut self, resource: &str, outcome: Outcome) -> Self {
        self.gets.insert(resource.to_string(), outcome);
        self
    }

    pub fn head(mut self, resource: &str, length: u64) -> Self {
        self.heads.insert(resource.to_string(), length);
        self
    }

    pub fn listing(mut self, resource: &str) -> Self {
        self.listings.insert(resource.to_string());
        self
    }

    pub fn body(mut self, resource: &str, body: &str) -> Self {
        self.bodies.insert(resource.to_string(), body.to_string());
        self
    }

    pub fn panic_on(mut self, resource: &str) -> Self {
        self.panic_on.insert(resource.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requested(&self, resource: &str) -> bool {
        self.requests.lock().iter().any(|r| r == resource)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    async fn enter(&self, url: &Url) -> String {
        let resource = url.resource().to_string();
        self.requests.lock().push(resource.clone());
        if self.panic_on.contains(&resource) {
            panic!("scripted failure for {}", resource);
        }
        if let Some(delay) = self.delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        resource
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn get(&self, url: &Url) -> Outcome {
        let resource = self.enter(url).await;
        self.gets.get(&resource).copied().unwrap_or(Outcome::NotFound)
    }

    async fn head(&self, url: &Url) -> HeadOutcome {
        let resource = self.enter(url).await;
        match self.heads.get(&resource) {
            Some(len) => HeadOutcome::ContentLength(*len),
            None => HeadOutcome::TransportFailure,
        }
    }

    async fn looks_like_directory_listing(&self, url: &Url) -> bool {
        let resource = self.enter(url).await;
        self.listings.contains(&resource)
    }

    async fn fetch_text(&self, url: &Url) -> Option<String> {
        let resource = self.enter(url).await;
        self.bodies.get(&resource).cloned()
    }
}

pub fn target() -> Url {
    Url::parse("http://joomla.test").unwrap()
}
