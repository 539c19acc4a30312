//! Per-component classification.
//!
//! Presence is decided by the first entry point that answers 200. Found
//! components then get the full artifact battery; every row is probed and
//! every hit is recorded, nothing short-circuits.

use crate::finding::{ArtifactKind, ComponentFinding, DirectoryKind, Evidence, PresenceState};
use crate::probe::Probe;
use crate::url::{Url, UrlError};

/// Prefix stripped from the id to build the `<name>.xml` install manifest path.
pub const COMPONENT_PREFIX: &str = "com_";

/// A descriptive `index.html` must declare more than this many bytes.
pub const INFORMATIVE_INDEX_MIN_BYTES: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    Public,
    Admin,
}

impl Root {
    pub fn dir(self, component: &str) -> String {
        match self {
            Root::Public => format!("/components/{}/", component),
            Root::Admin => format!("/administrator/components/{}/", component),
        }
    }
}

/// Entry points in priority order.
pub fn entry_points(component: &str) -> [(PresenceState, String); 3] {
    [
        (PresenceState::ActiveEndpoint, format!("/index.php?option={}", component)),
        (PresenceState::InactiveOrProtected, Root::Public.dir(component)),
        (PresenceState::AdminOnly, Root::Admin.dir(component)),
    ]
}

#[derive(Debug, Clone, Copy)]
enum FileName {
    Fixed(&'static str),
    /// `<id without prefix>.xml`
    InstallManifest,
}

const ARTIFACT_FILES: &[(ArtifactKind, Root, FileName)] = &[
    (ArtifactKind::Readme, Root::Public, FileName::Fixed("README.txt")),
    (ArtifactKind::Readme, Root::Public, FileName::Fixed("readme.txt")),
    (ArtifactKind::Readme, Root::Public, FileName::Fixed("README.md")),
    (ArtifactKind::Readme, Root::Public, FileName::Fixed("readme.md")),
    (ArtifactKind::Readme, Root::Admin, FileName::Fixed("README.txt")),
    (ArtifactKind::Readme, Root::Admin, FileName::Fixed("readme.txt")),
    (ArtifactKind::Readme, Root::Admin, FileName::Fixed("README.md")),
    (ArtifactKind::Readme, Root::Admin, FileName::Fixed("readme.md")),
    (ArtifactKind::License, Root::Public, FileName::Fixed("LICENSE.txt")),
    (ArtifactKind::License, Root::Public, FileName::Fixed("license.txt")),
    (ArtifactKind::License, Root::Admin, FileName::Fixed("LICENSE.txt")),
    (ArtifactKind::License, Root::Admin, FileName::Fixed("license.txt")),
    (ArtifactKind::License, Root::Public, FileName::InstallManifest),
    (ArtifactKind::License, Root::Admin, FileName::InstallManifest),
    (ArtifactKind::Changelog, Root::Public, FileName::Fixed("CHANGELOG.txt")),
    (ArtifactKind::Changelog, Root::Public, FileName::Fixed("changelog.txt")),
    (ArtifactKind::Changelog, Root::Admin, FileName::Fixed("CHANGELOG.txt")),
    (ArtifactKind::Changelog, Root::Admin, FileName::Fixed("changelog.txt")),
    (ArtifactKind::Manifest, Root::Public, FileName::Fixed("MANIFEST.xml")),
    (ArtifactKind::Manifest, Root::Public, FileName::Fixed("manifest.xml")),
    (ArtifactKind::Manifest, Root::Admin, FileName::Fixed("MANIFEST.xml")),
    (ArtifactKind::Manifest, Root::Admin, FileName::Fixed("manifest.xml")),
    (ArtifactKind::InformativeIndex, Root::Public, FileName::Fixed("index.htm")),
    (ArtifactKind::InformativeIndex, Root::Public, FileName::Fixed("index.html")),
    (ArtifactKind::InformativeIndex, Root::Admin, FileName::Fixed("INDEX.htm")),
    (ArtifactKind::InformativeIndex, Root::Admin, FileName::Fixed("INDEX.html")),
];

const LISTING_ROOTS: [(DirectoryKind, Root); 2] = [
    (DirectoryKind::PublicListing, Root::Public),
    (DirectoryKind::AdminListing, Root::Admin),
];

fn unprefixed(component: &str) -> &str {
    component.strip_prefix(COMPONENT_PREFIX).unwrap_or(component)
}

/// Every artifact path probed for a found component, in probe order.
pub fn artifact_battery(component: &str) -> Vec<(ArtifactKind, String)> {
    ARTIFACT_FILES
        .iter()
        .map(|(kind, root, file)| {
            let name = match file {
                FileName::Fixed(name) => (*name).to_string(),
                FileName::InstallManifest => format!("{}.xml", unprefixed(component)),
            };
            (*kind, format!("{}{}", root.dir(component), name))
        })
        .collect()
}

/// Decide presence for `component` on `target` and collect exposed artifacts.
pub async fn classify<P>(target: &Url, component: &str, probe: &P) -> Result<ComponentFinding, UrlError>
where
    P: Probe + ?Sized,
{
    let mut found = None;
    for (state, path) in entry_points(component) {
        let url = target.append(&path)?;
        if probe.get(&url).await.is_ok() {
            found = Some((state, url));
            break;
        }
    }

    let Some((state, entry)) = found else {
        tracing::debug!(component, "not found");
        return Ok(ComponentFinding::not_found(component));
    };

    tracing::info!(component, state = state.label(), url = %entry, "component found");
    let mut finding = ComponentFinding::new(component, state);
    finding.evidence.push(Evidence::new("component", &entry));

    for (kind, path) in artifact_battery(component) {
        let url = target.append(&path)?;
        if !probe.get(&url).await.is_ok() {
            continue;
        }
        if kind == ArtifactKind::InformativeIndex
            && !probe.head(&url).await.exceeds(INFORMATIVE_INDEX_MIN_BYTES)
        {
            continue;
        }
        tracing::debug!(component, artifact = %kind, url = %url, "artifact exposed");
        finding.artifacts.insert(kind);
        finding.evidence.push(Evidence::new(kind, &url));
    }

    for (kind, root) in LISTING_ROOTS {
        let url = target.append(&root.dir(component))?;
        if probe.looks_like_directory_listing(&url).await {
            tracing::debug!(component, url = %url, "directory listing exposed");
            finding.directories.insert(kind);
            finding.evidence.push(Evidence::new(kind, &url));
        }
    }

    Ok(finding)
}
