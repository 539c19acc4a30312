pub mod component;
pub mod recon;

pub use component::classify;
pub use recon::{preflight, Preflight};
