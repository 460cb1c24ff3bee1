//! `jahiap.toml` configuration.
//!
//! ```toml
//! [site]
//! primary_language = "en"
//! root_path = "/labs/acme"
//! css_url = "//static.epfl.ch/v0.23.0/styles/{theme}-built.css"
//!
//! [parse]
//! output_dir = "build"
//! use_cache = false
//! ```
//!
//! Every key is optional. Command-line flags override the file.

mod error;
mod section;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;
pub use section::{ParseSection, SiteSection};

use crate::log;
use crate::parser::ParseOptions;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "jahiap.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JahiapConfig {
    pub site: SiteSection,
    pub parse: ParseSection,
}

impl JahiapConfig {
    /// Load `path`. A missing file gives the defaults unless `required`.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        if !path.exists() && !required {
            return Ok(Self::default());
        }
        let config = Self::from_path(path)?;
        config.validate()?;
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.site.validate()
    }

    /// Options for parsing a site named `name` (or named after its directory).
    pub fn parse_options(&self, name: Option<String>) -> ParseOptions {
        ParseOptions {
            name,
            primary_language: self.site.primary_language.clone(),
            root_path: self.site.root_path.clone(),
            css_url: self.site.css_url.clone(),
        }
    }
}
