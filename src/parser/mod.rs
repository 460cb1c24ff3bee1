//! Site assembler.
//!
//! Turns an export directory (one `export_<lang>…` document per language
//! plus the asset tree) into a [`Site`]. The work runs in phases, each
//! finished for every language before the next starts:
//!
//! 1. site parameters per language
//! 2. page identities, across all documents
//! 3. page contents and sidebars, per language
//! 4. asset files
//! 5. internal link resolution

pub mod boxes;
pub mod content;
pub mod files;
pub mod identity;
pub mod links;
pub mod navigation;
pub mod params;


use std::fs;
use std::path::{Path, PathBuf};

pub use links::{LinkStats, resolve_links};
pub use params::DEFAULT_CSS_URL;

use crate::dom::{DomCache, NodeId, XmlDocument};
use crate::error::ParseError;
use crate::model::Site;
use crate::utils::plural::plural_count;
use crate::{debug, log};

pub(crate) const PAGE_TAG: &str = "jahia:page";
const EXPORT_PREFIX: &str = "export_";

/// Knobs of one parse.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Site name; defaults to the export directory's name.
    pub name: Option<String>,
    /// Language whose home page is `/index.html`.
    pub primary_language: String,
    /// Prefix of every output path.
    pub root_path: String,
    /// Stylesheet URL template, `{theme}` is substituted.
    pub css_url: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            name: None,
            primary_language: "en".to_string(),
            root_path: String::new(),
            css_url: DEFAULT_CSS_URL.to_string(),
        }
    }
}

impl Site {
    /// Parse the export in `export_dir`.
    pub fn parse(export_dir: impl AsRef<Path>, options: &ParseOptions) -> Result<Self, ParseError> {
        SiteParser::new(export_dir.as_ref(), options).run()
    }
}

/// Drives the phases over one export directory.
pub struct SiteParser<'a> {
    export_dir: PathBuf,
    options: &'a ParseOptions,
    dom: DomCache,
}

impl<'a> SiteParser<'a> {
    pub fn new(export_dir: &Path, options: &'a ParseOptions) -> Self {
        Self {
            export_dir: export_dir.to_path_buf(),
            options,
            dom: DomCache::new(),
        }
    }

    pub fn run(self) -> Result<Site, ParseError> {
        let exports = discover_exports(&self.export_dir)?;
        let name = self
            .options
            .name
            .clone()
            .unwrap_or_else(|| default_site_name(&self.export_dir));

        let mut site = Site::new(name, &self.export_dir);
        for (language, path) in &exports {
            site.languages.push(language.clone());
            site.export_files.insert(language.clone(), path.clone());
        }
        log!("parse"; "site {} in {}", site.name, plural_count(exports.len(), "language"));

        let paths: Vec<PathBuf> = exports.iter().map(|(_, path)| path.clone()).collect();
        self.dom.preload(&paths)?;

        // Site parameters
        for (language, path) in &exports {
            let doc = self.dom.get(path)?;
            let params = params::parse_params(&doc, language, &self.options.css_url);
            site.params.insert(language.clone(), params);
        }

        // Identities of every page, every language
        for (language, path) in &exports {
            let doc = self.dom.get(path)?;
            let count = identity::register_pages(&mut site, &doc, language);
            debug!("parse"; "{}: {}", language, plural_count(count, "new page"));
        }

        // Contents, one language at a time
        for (language, path) in &exports {
            let doc = self.dom.get(path)?;
            let drafts = content::build_language(&site, self.options, language, &doc);
            debug!("parse"; "{}: {}", language, plural_count(drafts.len(), "page content"));
            content::attach_contents(&mut site, language, drafts);
        }

        site.files = files::parse_files(&self.export_dir, &site.name);

        let stats = resolve_links(&mut site);
        if stats.unresolved > 0 {
            log!("warning"; "{} could not be resolved", plural_count(stats.unresolved, "internal link"));
        }

        log!(
            "parse";
            "{}, {}, {}",
            plural_count(site.page_count(), "page"),
            plural_count(site.files.len(), "file"),
            plural_count(stats.resolved, "internal link")
        );
        Ok(site)
    }
}

/// Export documents of `dir` as `(language, path)`, in file-name order.
///
/// The language is the two letters following `export_`. When two files
/// share a language the first one is kept.
pub fn discover_exports(dir: &Path) -> Result<Vec<(String, PathBuf)>, ParseError> {
    if !dir.is_dir() {
        return Err(ParseError::MissingExportDir(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ParseError::io(dir, e))? {
        let entry = entry.map_err(|e| ParseError::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if file_name.starts_with(EXPORT_PREFIX) && entry.path().is_file() {
            candidates.push((file_name.to_string(), entry.path()));
        }
    }
    candidates.sort();

    let mut exports: Vec<(String, PathBuf)> = Vec::new();
    for (file_name, path) in candidates {
        let language = file_name[EXPORT_PREFIX.len()..]
            .get(..2)
            .filter(|code| code.bytes().all(|b| b.is_ascii_alphabetic()));
        let Some(language) = language else {
            log!("warning"; "`{}` has no language code, skipping it", file_name);
            continue;
        };
        if exports.iter().any(|(known, _)| known == language) {
            log!("warning"; "`{}` repeats language {}, skipping it", file_name, language);
            continue;
        }
        exports.push((language.to_string(), path));
    }

    if exports.is_empty() {
        log!("warning"; "no export document in {}", dir.display());
    }
    Ok(exports)
}

/// Name of the export directory, used when no site name is given.
pub fn default_site_name(export_dir: &Path) -> String {
    if let Some(name) = export_dir.file_name() {
        return name.to_string_lossy().into_owned();
    }
    // `.` or `..`
    export_dir
        .canonicalize()
        .ok()
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

/// Whether `element` sits in page `page_id` rather than in a nested page.
pub(crate) fn belongs_to(doc: &XmlDocument, element: NodeId, page_id: &str) -> bool {
    doc.nearest_ancestor(element, PAGE_TAG)
        .is_some_and(|page| doc.attr(page, "jahia:pid") == page_id)
}
