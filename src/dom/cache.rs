//! Shared cache of parsed export documents.
//!
//! Every builder asks for documents by path; each file is read and parsed
//! at most once per cache, and later requests get the same `Arc`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::XmlDocument;
use crate::debug;
use crate::error::ParseError;

#[derive(Debug, Default)]
pub struct DomCache {
    docs: RwLock<FxHashMap<PathBuf, Arc<XmlDocument>>>,
}

impl DomCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed document at `path`, reading it on first use.
    pub fn get(&self, path: &Path) -> Result<Arc<XmlDocument>, ParseError> {
        let key = cache_key(path);
        if let Some(doc) = self.docs.read().get(&key) {
            return Ok(Arc::clone(doc));
        }

        let doc = Arc::new(load(&key)?);
        // Another thread may have parsed the same file meanwhile; keep the first.
        let mut docs = self.docs.write();
        Ok(Arc::clone(docs.entry(key).or_insert(doc)))
    }

    /// Parse `paths` in parallel so later lookups are hits.
    pub fn preload(&self, paths: &[PathBuf]) -> Result<(), ParseError> {
        paths
            .par_iter()
            .try_for_each(|path| self.get(path).map(drop))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.docs.read().contains_key(&cache_key(path))
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn load(path: &Path) -> Result<XmlDocument, ParseError> {
    debug!("dom"; "parsing {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| ParseError::io(path, e))?;
    XmlDocument::parse(&text).map_err(|source| ParseError::Xml {
        path: path.to_path_buf(),
        source,
    })
}
