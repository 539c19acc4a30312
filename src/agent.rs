use rand::seq::SliceRandom;

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.8";

pub const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Desktop browser strings (realistic, no per-request rotation)
const DESKTOP_USER_AGENTS: &[&str] = &[
    FALLBACK_USER_AGENT,
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

/// Pick a desktop user agent for this run. Stays constant for the whole scan.
pub fn random_desktop_agent() -> String {
    DESKTOP_USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_USER_AGENT)
        .to_string()
}
