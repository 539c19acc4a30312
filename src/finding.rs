use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog identifier of an extension, e.g. `com_content`.
pub type ComponentId = String;

/// Where (and whether) a component answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresenceState {
    NotFound,
    /// `index.php?option=<id>` is routable.
    ActiveEndpoint,
    /// The public component directory exists but the endpoint does not answer.
    InactiveOrProtected,
    /// Only the administrator component directory exists.
    AdminOnly,
}

impl PresenceState {
    pub fn is_found(&self) -> bool {
        !matches!(self, PresenceState::NotFound)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PresenceState::NotFound => "not found",
            PresenceState::ActiveEndpoint => "active",
            PresenceState::InactiveOrProtected => "possibly inactive or protected",
            PresenceState::AdminOnly => "administrator components only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    Readme,
    License,
    Changelog,
    Manifest,
    InformativeIndex,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::Readme => "README",
            ArtifactKind::License => "LICENSE",
            ArtifactKind::Changelog => "CHANGELOG",
            ArtifactKind::Manifest => "MANIFEST",
            ArtifactKind::InformativeIndex => "INDEX (descriptive)",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DirectoryKind {
    PublicListing,
    AdminListing,
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryKind::PublicListing => f.write_str("explorable directory"),
            DirectoryKind::AdminListing => f.write_str("explorable admin directory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFinding {
    pub component: ComponentId,
    pub state: PresenceState,
    pub artifacts: BTreeSet<ArtifactKind>,
    pub directories: BTreeSet<DirectoryKind>,
    /// Every probe that hit, entry point first.
    pub evidence: Vec<Evidence>,
}

impl ComponentFinding {
    pub fn not_found(component: impl Into<ComponentId>) -> Self {
        Self::new(component, PresenceState::NotFound)
    }

    pub fn new(component: impl Into<ComponentId>, state: PresenceState) -> Self {
        Self {
            component: component.into(),
            state,
            artifacts: BTreeSet::new(),
            directories: BTreeSet::new(),
            evidence: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub label: String,
    pub url: String,
}

impl Evidence {
    pub fn new(label: impl fmt::Display, url: impl fmt::Display) -> Self {
        Self { label: label.to_string(), url: url.to_string() }
    }
}

/// Result of the reconnaissance that runs before enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePosture {
    pub live: bool,
    pub robots_present: bool,
    pub error_log_present: bool,
    pub version_lines: Vec<String>,
}

/// A catalog entry whose classification task failed unexpectedly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedFailure {
    pub component: ComponentId,
    pub reason: String,
}
