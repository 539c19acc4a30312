pub mod agent;
pub mod analyze;
pub mod catalog;
pub mod concurrent;
pub mod config;
pub mod finding;
pub mod http_client;
pub mod output;
pub mod probe;
pub mod url;

pub use crate::analyze::{classify, preflight, Preflight};
pub use crate::catalog::Catalog;
pub use crate::concurrent::ScanCoordinator;
pub use crate::config::ScanConfig;
pub use crate::finding::*;
pub use crate::output::ScanReport;
pub use crate::probe::{HeadOutcome, Outcome, Probe, ProbeClient};
pub use crate::url::{Url, UrlError};
