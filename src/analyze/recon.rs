use crate::finding::SitePosture;
use crate::probe::{Outcome, Probe};
use crate::url::{Url, UrlError};

/// Files that commonly carry the core version, probed in order.
pub const VERSION_DISCLOSURE_PATHS: &[&str] = &[
    "/administrator/manifests/files/joomla.xml",
    "/language/en-GB/en-GB.xml",
    "/README.txt",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    Ready(SitePosture),
    /// The baseline probe did not return a status code; nothing else was probed.
    Aborted(Outcome),
}

/// Liveness gate and site-wide checks run once before enumeration.
pub async fn preflight<P>(target: &Url, probe: &P) -> Result<Preflight, UrlError>
where
    P: Probe + ?Sized,
{
    let baseline = probe.get(&target.append("/")?).await;
    if !matches!(baseline, Outcome::StatusCode(_)) {
        tracing::warn!(target = %target, outcome = ?baseline, "baseline probe failed, aborting");
        return Ok(Preflight::Aborted(baseline));
    }

    let mut posture = SitePosture { live: true, ..SitePosture::default() };
    posture.robots_present = probe.get(&target.append("/robots.txt")?).await.is_ok();
    posture.error_log_present = probe.get(&target.append("/error_log")?).await.is_ok();

    for path in VERSION_DISCLOSURE_PATHS {
        let url = target.append(path)?;
        if !probe.get(&url).await.is_ok() {
            continue;
        }
        if let Some(body) = probe.fetch_text(&url).await {
            let lines = version_lines(&body);
            tracing::debug!(url = %url, count = lines.len(), "version disclosure");
            posture.version_lines.extend(lines);
        }
    }

    Ok(Preflight::Ready(posture))
}

/// Lines mentioning "version" in any case, verbatim and in document order.
pub fn version_lines(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| line.to_lowercase().contains("version"))
        .map(str::to_string)
        .collect()
}
