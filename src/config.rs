use serde::Deserialize;

use crate::agent::DEFAULT_ACCEPT_LANGUAGE;

/// Settings shared by the probe client and the scan coordinator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum classification tasks in flight.
    pub concurrency: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    pub max_redirects: usize,
}

impl ScanConfig {
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            timeout_secs: 5,
            user_agent: crate::agent::FALLBACK_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            max_redirects: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ScanConfig::default();
        assert!(cfg.concurrency >= 1);
        assert_eq!(cfg.timeout_secs, 5);
        assert!(!cfg.user_agent.is_empty());
    }

    #[test]
    fn test_zero_concurrency_clamped() {
        let cfg = ScanConfig { concurrency: 0, ..ScanConfig::default() };
        assert_eq!(cfg.effective_concurrency(), 1);
    }

    #[test]
    fn test_partial_deserialize() {
        let cfg: ScanConfig = serde_json::from_str(r#"{"concurrency": 3}"#).unwrap();
        assert_eq!(cfg.concurrency, 3);
        assert_eq!(cfg.timeout_secs, 5);
    }
}
