//! The site: owner of every page, sidebar and asset of one export.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{ContentBox, File, Link, Page, PageContent, PageId, Sidebar, SidebarId};
use crate::log;

/// Settings read once per language from the export document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageParams {
    pub title: String,
    pub acronym: String,
    pub theme: String,
    pub css_url: String,
    pub breadcrumb: Option<Link>,
    /// Empty when the site uses the default footer.
    pub footer: Vec<Link>,
}

/// One parsed export.
///
/// Pages and sidebars are stored in arenas and addressed by [`PageId`] and
/// [`SidebarId`]. Both page indexes hold the same set of handles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    /// Directory the export was read from.
    pub base_path: PathBuf,
    /// Export document per language code.
    pub export_files: BTreeMap<String, PathBuf>,
    /// Languages in processing order.
    pub languages: Vec<String>,
    pub params: BTreeMap<String, LanguageParams>,
    pub files: Vec<File>,
    /// Internal links rewritten so far.
    pub internal_links: usize,
    /// Internal links the last resolver pass could not rewrite.
    pub unresolved_links: usize,

    pub(crate) pages: Vec<Page>,
    pub(crate) sidebars: Vec<Sidebar>,
    pub(crate) pages_by_id: FxHashMap<String, PageId>,
    pub(crate) pages_by_unique_id: FxHashMap<String, PageId>,
    pub(crate) homepage: Option<PageId>,
}

impl Site {
    pub fn new(name: impl Into<String>, base_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Pages
    // ========================================================================

    /// Every page in registration order (sitemaps excluded).
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn page_ids(&self) -> impl Iterator<Item = PageId> + use<> {
        (0..self.pages.len()).map(PageId)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }

    #[inline]
    pub fn page_mut(&mut self, id: PageId) -> &mut Page {
        &mut self.pages[id.0]
    }

    pub fn page_id(&self, id: &str) -> Option<PageId> {
        self.pages_by_id.get(id).copied()
    }

    pub fn page_by_id(&self, id: &str) -> Option<&Page> {
        self.page_id(id).map(|id| self.page(id))
    }

    pub fn unique_page_id(&self, unique_id: &str) -> Option<PageId> {
        self.pages_by_unique_id.get(unique_id).copied()
    }

    pub fn page_by_unique_id(&self, unique_id: &str) -> Option<&Page> {
        self.unique_page_id(unique_id).map(|id| self.page(id))
    }

    pub fn homepage_id(&self) -> Option<PageId> {
        self.homepage
    }

    pub fn homepage(&self) -> Option<&Page> {
        self.homepage.map(|id| self.page(id))
    }

    /// Register `page`, link it under its parent and index it.
    ///
    /// The caller guarantees `page.id` is not registered yet. A missing or
    /// already taken unique id is replaced by `page-<id>` in the index.
    pub(crate) fn insert_page(&mut self, mut page: Page) -> PageId {
        let handle = PageId(self.pages.len());

        match page.parent {
            Some(parent) => {
                page.level = self.pages[parent.0].level + 1;
                self.pages[parent.0].children.push(handle);
            }
            None => {
                page.level = 0;
                self.homepage.get_or_insert(handle);
            }
        }

        let mut key = page.unique_id.clone();
        if key.is_empty() || self.pages_by_unique_id.contains_key(&key) {
            let mut fallback = format!("page-{}", page.id);
            if self.pages_by_unique_id.contains_key(&fallback) {
                fallback = format!("page-{}-{}", page.id, handle.0);
            }
            let reason = if key.is_empty() { "no" } else { "a duplicate" };
            log!("warning"; "page {} has {} unique id, indexed as `{}`", page.id, reason, fallback);
            key = fallback;
        }

        self.pages_by_id.insert(page.id.clone(), handle);
        self.pages_by_unique_id.insert(key, handle);
        self.pages.push(page);
        handle
    }

    // ========================================================================
    // Sidebars
    // ========================================================================

    #[inline]
    pub fn sidebar(&self, id: SidebarId) -> &Sidebar {
        &self.sidebars[id.0]
    }

    /// Mutations are seen by every page content sharing `id`.
    #[inline]
    pub fn sidebar_mut(&mut self, id: SidebarId) -> &mut Sidebar {
        &mut self.sidebars[id.0]
    }

    pub fn sidebars(&self) -> impl Iterator<Item = (SidebarId, &Sidebar)> {
        self.sidebars
            .iter()
            .enumerate()
            .map(|(i, sidebar)| (SidebarId(i), sidebar))
    }

    pub(crate) fn add_sidebar(&mut self, sidebar: Sidebar) -> SidebarId {
        self.sidebars.push(sidebar);
        SidebarId(self.sidebars.len() - 1)
    }

    /// Sidebar shown with `content`.
    pub fn sidebar_of(&self, content: &PageContent) -> &Sidebar {
        self.sidebar(content.sidebar)
    }

    // ========================================================================
    // Content
    // ========================================================================

    pub fn params(&self, language: &str) -> Option<&LanguageParams> {
        self.params.get(language)
    }

    /// Main boxes of every page content, sidebars excluded.
    pub fn all_boxes(&self) -> impl Iterator<Item = &ContentBox> {
        self.pages
            .iter()
            .flat_map(|page| page.contents.values())
            .flat_map(|content| content.boxes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoxKind;

    fn child(id: &str, unique_id: &str, parent: PageId) -> Page {
        let mut page = Page::new(id, unique_id, "");
        page.parent = Some(parent);
        page
    }

    #[test]
    fn test_insert_links_tree() {
        let mut site = Site::new("dcsl", "/exports/dcsl");
        let home = site.insert_page(Page::new("1", "u-home", "home"));
        let team = site.insert_page(child("2", "u-team", home));
        let member = site.insert_page(child("3", "u-member", team));

        assert_eq!(site.homepage_id(), Some(home));
        assert_eq!(site.page(home).children, vec![team]);
        assert_eq!(site.page(member).level, 2);
        assert!(site.page(home).is_homepage());
        assert!(!site.page(team).is_homepage());
        assert_eq!(site.page_by_id("3").unwrap().unique_id, "u-member");
        assert_eq!(site.page_by_unique_id("u-team").unwrap().id, "2");
    }

    #[test]
    fn test_unique_id_fallback_keeps_indexes_aligned() {
        let mut site = Site::new("dcsl", "/exports/dcsl");
        let home = site.insert_page(Page::new("1", "u1", "home"));
        let blank = site.insert_page(child("2", "", home));
        let dup = site.insert_page(child("3", "u1", home));

        assert_eq!(site.unique_page_id("u1"), Some(home));
        assert_eq!(site.unique_page_id("page-2"), Some(blank));
        assert_eq!(site.unique_page_id("page-3"), Some(dup));
        assert_eq!(site.pages_by_id.len(), site.pages_by_unique_id.len());
    }

    #[test]
    fn test_sidebar_handles() {
        let mut site = Site::default();
        let id = site.add_sidebar(Sidebar::new("en", Vec::new()));
        assert!(site.sidebar(id).is_empty());

        site.sidebar_mut(id)
            .boxes
            .push(ContentBox::new(BoxKind::Text, "News", "<p>x</p>"));
        assert_eq!(site.sidebars().count(), 1);
        assert_eq!(site.sidebar(id).boxes.len(), 1);
    }
}
