use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::finding::{ComponentFinding, IsolatedFailure, PresenceState, SitePosture};
use crate::url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Found,
    Exposure,
    Missing,
    Failure,
    Info,
}

impl Marker {
    pub fn emoji(&self) -> &str {
        match self {
            Marker::Found => "[+]",
            Marker::Exposure => "[!]",
            Marker::Missing => "[-]",
            Marker::Failure => "[x]",
            Marker::Info => "[*]",
        }
    }

    pub fn color_code(&self) -> &str {
        match self {
            Marker::Found => "\x1b[1;92m",    // Bright Green
            Marker::Exposure => "\x1b[1;91m", // Bright Red
            Marker::Missing => "\x1b[1;94m",  // Blue
            Marker::Failure => "\x1b[1;33m",  // Yellow
            Marker::Info => "\x1b[1;96m",     // Cyan
        }
    }

    pub fn reset_color() -> &'static str {
        "\x1b[0m"
    }

    fn paint(&self, color: bool) -> String {
        if color {
            format!("{}{}{}", self.color_code(), self.emoji(), Marker::reset_color())
        } else {
            self.emoji().to_string()
        }
    }
}

/// Everything a finished enumeration produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: Url,
    pub posture: SitePosture,
    /// Completion order, not catalog order.
    pub findings: Vec<ComponentFinding>,
    pub isolated_failures: Vec<IsolatedFailure>,
    /// Catalog entries never dispatched because the scan was cancelled.
    pub skipped: usize,
    pub duration_ms: u64,
}

impl ScanReport {
    pub fn found(&self) -> impl Iterator<Item = &ComponentFinding> {
        self.findings.iter().filter(|f| f.state.is_found())
    }

    pub fn found_count(&self) -> usize {
        self.found().count()
    }

    pub fn isolated_failure_count(&self) -> usize {
        self.isolated_failures.len()
    }

    pub fn finding(&self, component: &str) -> Option<&ComponentFinding> {
        self.findings.iter().find(|f| f.component == component)
    }

    /// Print clean CLI output - only found components and exposures
    pub fn print_summary(&self) {
        print!("{}", self.render(true));
    }

    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", "=".repeat(60));
        let _ = writeln!(out, "              SCAN COMPLETE");
        let _ = writeln!(out, "{}", "=".repeat(60));

        out.push_str(&render_posture(&self.target, &self.posture, color));

        let mut found: Vec<_> = self.found().collect();
        found.sort_by(|a, b| a.component.cmp(&b.component));

        let _ = writeln!(out, "\n{} Components:", Marker::Info.paint(color));
        if found.is_empty() {
            let _ = writeln!(out, "   {} No components found", Marker::Missing.paint(color));
        }
        for finding in found {
            let entry = finding.evidence.first().map(|e| e.url.as_str()).unwrap_or("");
            let _ = writeln!(out, "   {} {} \t > {}", Marker::Found.paint(color), finding.component, entry);
            if finding.state != PresenceState::ActiveEndpoint {
                let _ = writeln!(out, "\t But {}", finding.state.label());
            }
            for evidence in finding.evidence.iter().skip(1) {
                let _ = writeln!(out, "\t {} {} \t > {}", Marker::Exposure.paint(color), evidence.label, evidence.url);
            }
        }

        if !self.isolated_failures.is_empty() {
            let _ = writeln!(out, "\n{} Isolated failures:", Marker::Failure.paint(color));
            for failure in &self.isolated_failures {
                let _ = writeln!(out, "   {} {}: {}", Marker::Failure.paint(color), failure.component, failure.reason);
            }
        }

        let _ = writeln!(out, "\n{} Summary:", Marker::Info.paint(color));
        let _ = writeln!(out, "   Target: {}", self.target);
        let _ = writeln!(out, "   Duration: {}ms", self.duration_ms);
        let _ = writeln!(out, "   Components scanned: {}", self.findings.len());
        let _ = writeln!(out, "   Components found: {}", self.found_count());
        let _ = writeln!(out, "   Isolated failures: {}", self.isolated_failure_count());
        if self.skipped > 0 {
            let _ = writeln!(out, "   Skipped (cancelled): {}", self.skipped);
        }
        out.push('\n');
        out
    }

    /// Save detailed report to file
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("txt");

        match extension {
            "json" => {
                let json = serde_json::to_string_pretty(self)?;
                fs::write(path, json)?;
            }
            _ => {
                fs::write(path, self.render(false))?;
            }
        }

        Ok(())
    }
}

/// Site-wide lines, shown before enumeration starts and again in the summary.
pub fn render_posture(target: &Url, posture: &SitePosture, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} Site: {}", Marker::Info.paint(color), target);

    if posture.robots_present {
        let _ = writeln!(out, "   {} Robots file found \t > {}/robots.txt", Marker::Found.paint(color), target.as_str().trim_end_matches('/'));
    } else {
        let _ = writeln!(out, "   {} No robots file found", Marker::Missing.paint(color));
    }

    if posture.error_log_present {
        let _ = writeln!(out, "   {} Error log found \t > {}/error_log", Marker::Exposure.paint(color), target.as_str().trim_end_matches('/'));
    } else {
        let _ = writeln!(out, "   {} No error log found", Marker::Missing.paint(color));
    }

    if !posture.version_lines.is_empty() {
        let _ = writeln!(out, "   {} Version disclosure:", Marker::Exposure.paint(color));
        for line in &posture.version_lines {
            let _ = writeln!(out, "       {}", line.trim());
        }
    }
    out
}
