pub mod clean_reporter;

pub use clean_reporter::{render_posture, ScanReport};
