pub mod client;
pub mod listing;
pub mod outcome;

pub use client::{Probe, ProbeClient};
pub use outcome::{HeadOutcome, Outcome};
