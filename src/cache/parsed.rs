//! Parsed sites persisted as JSON between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ContentHash;
use crate::debug;
use crate::model::Site;

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    version: &'a str,
    fingerprint: String,
    site: &'a Site,
}

#[derive(Deserialize)]
struct CacheEntry {
    version: String,
    fingerprint: String,
    site: Site,
}

/// `<output_dir>/<site>/parsed_<site>.json`
pub fn cache_path(output_dir: &Path, site_name: &str) -> PathBuf {
    output_dir
        .join(site_name)
        .join(format!("parsed_{site_name}.json"))
}

/// Check if file content is the same as new content
fn file_content_matches(path: &Path, content: &str) -> bool {
    path.exists() && fs::read_to_string(path).is_ok_and(|existing| existing == content)
}

/// Write `site` with the fingerprint of the inputs it was parsed from.
pub fn persist_site(site: &Site, fingerprint: ContentHash, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let entry = CacheEntryRef {
        version: env!("CARGO_PKG_VERSION"),
        fingerprint: fingerprint.to_hex(),
        site,
    };
    let json = serde_json::to_string(&entry)?;

    if file_content_matches(path, &json) {
        debug!("cache"; "parse cache unchanged, skipping write");
        return Ok(());
    }

    fs::write(path, &json)?;
    debug!("cache"; "saved {}", path.display());
    Ok(())
}

/// Cached site at `path`, if it was written by this version from inputs
/// matching `fingerprint`.
pub fn restore_site(path: &Path, fingerprint: ContentHash) -> Option<Site> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            debug!("cache"; "no usable cache at {}: {}", path.display(), e);
            return None;
        }
    };

    let entry: CacheEntry = match serde_json::from_str(&json) {
        Ok(entry) => entry,
        Err(e) => {
            debug!("cache"; "ignoring unreadable cache {}: {}", path.display(), e);
            return None;
        }
    };

    if entry.version != env!("CARGO_PKG_VERSION") {
        debug!("cache"; "ignoring cache written by version {}", entry.version);
        return None;
    }
    if ContentHash::from_hex(&entry.fingerprint) != Some(fingerprint) {
        debug!("cache"; "ignoring stale cache {}", path.display());
        return None;
    }

    debug!("cache"; "restored {} from cache", entry.site.name);
    Some(entry.site)
}
