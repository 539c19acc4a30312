use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::finding::ComponentId;

const BUNDLED: &str = include_str!("../data/components.txt");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered component ids to probe. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ComponentId>,
}

impl Catalog {
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(|line| line.trim_end_matches(|c| c == '\r' || c == '\n'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Catalog shipped with the binary.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED)
    }

    pub fn entries(&self) -> &[ComponentId] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<ComponentId>> for Catalog {
    fn from(entries: Vec<ComponentId>) -> Self {
        Self { entries }
    }
}
