//! Assets and plain links.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One migrated asset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    /// Directory containing the file.
    pub path: PathBuf,
}

impl File {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }
}

/// A titled URL (breadcrumb entry, footer link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: String,
}

impl Link {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}
