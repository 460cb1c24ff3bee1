//! The parsed site model handed to exporters.

mod boxes;
mod file;
mod page;
mod site;

pub use boxes::{BoxFields, BoxKind, ContentBox};
pub use file::{File, Link};
pub use page::{
    HOME_TEMPLATE, NavigationKind, NavigationPage, Page, PageContent, PageId, SITEMAP_TEMPLATE,
    Sidebar, SidebarId,
};
pub use site::{LanguageParams, Site};
