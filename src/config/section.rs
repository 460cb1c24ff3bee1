//! `[site]` and `[parse]` sections.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::parser::DEFAULT_CSS_URL;

/// `[site]`: how output paths and styles are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Language whose home page is `/index.html`.
    pub primary_language: String,
    /// Prefix of every output path, e.g. `/labs/acme`.
    pub root_path: String,
    /// Stylesheet URL; `{theme}` is replaced by each language's theme.
    pub css_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            primary_language: "en".to_string(),
            root_path: String::new(),
            css_url: DEFAULT_CSS_URL.to_string(),
        }
    }
}

impl SiteSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lang = &self.primary_language;
        if lang.len() != 2 || !lang.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::Validation(format!(
                "`site.primary_language` must be a two-letter code, got `{lang}`"
            )));
        }

        let root = &self.root_path;
        if !root.is_empty() && (!root.starts_with('/') || root.ends_with('/')) {
            return Err(ConfigError::Validation(format!(
                "`site.root_path` must start with `/` and not end with one, got `{root}`"
            )));
        }
        Ok(())
    }
}

/// `[parse]`: where results go and whether earlier ones are reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    pub output_dir: PathBuf,
    pub use_cache: bool,
}

impl Default for ParseSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            use_cache: false,
        }
    }
}
