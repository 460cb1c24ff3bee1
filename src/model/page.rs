//! Pages, their per-language content, sidebars and navigation references.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ContentBox, Site};
use crate::utils::date::Timestamp;

/// Handle of a [`Page`] inside its [`Site`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub(crate) usize);

/// Handle of a [`Sidebar`] inside its [`Site`].
///
/// Several page contents hold the same handle when a sidebar is inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarId(pub(crate) usize);

/// Template of the home page.
pub const HOME_TEMPLATE: &str = "home";
/// Template of synthetic sitemap pages, which never enter the tree.
pub const SITEMAP_TEMPLATE: &str = "sitemap";

/// One node of the page tree, shared by every language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// `jahia:pid`, unique within the export.
    pub id: String,
    /// `jcr:uuid`, the target of internal links.
    pub unique_id: String,
    pub template: String,
    /// 0 for the home page.
    pub level: usize,
    pub parent: Option<PageId>,
    pub children: Vec<PageId>,
    pub navigation: Vec<NavigationPage>,
    /// Content per language code. Languages the page is missing from have no entry.
    pub contents: BTreeMap<String, PageContent>,
}

impl Page {
    pub fn new(id: impl Into<String>, unique_id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unique_id: unique_id.into(),
            template: template.into(),
            level: 0,
            parent: None,
            children: Vec::new(),
            navigation: Vec::new(),
            contents: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn is_homepage(&self) -> bool {
        self.parent.is_none()
    }

    pub fn content(&self, language: &str) -> Option<&PageContent> {
        self.contents.get(language)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.template)
    }
}

/// The language-specific facet of a [`Page`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub language: String,
    /// Final site-relative URL, e.g. `/team.html`.
    pub path: String,
    pub title: String,
    pub boxes: Vec<ContentBox>,
    pub sidebar: SidebarId,
    /// `None` when the export's timestamp was missing or malformed.
    pub last_update: Option<Timestamp>,
}

/// Boxes shown beside a page's main content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    pub language: String,
    pub boxes: Vec<ContentBox>,
}

impl Sidebar {
    pub fn new(language: impl Into<String>, boxes: Vec<ContentBox>) -> Self {
        Self {
            language: language.into(),
            boxes,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationKind {
    Internal,
    External,
}

/// Entry of a page's navigation: another page of the site, or an outside URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPage {
    pub kind: NavigationKind,
    /// Unique id of the target page when internal, URL when external.
    pub reference: String,
    pub title: String,
}

impl NavigationPage {
    pub fn internal(reference: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: NavigationKind::Internal,
            reference: reference.into(),
            title: title.into(),
        }
    }

    pub fn external(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: NavigationKind::External,
            reference: url.into(),
            title: title.into(),
        }
    }

    /// Target page, looked up on each call. `None` when external or dangling.
    pub fn page<'s>(&self, site: &'s Site) -> Option<&'s Page> {
        match self.kind {
            NavigationKind::Internal => site.page_by_unique_id(&self.reference),
            NavigationKind::External => None,
        }
    }
}

impl fmt::Display for NavigationPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            NavigationKind::Internal => "internal",
            NavigationKind::External => "external",
        };
        write!(f, "{kind} {} {}", self.reference, self.title)
    }
}
