//! Read-only XML access for export documents.

mod cache;
mod document;

pub use cache::DomCache;
pub use document::{Element, NodeId, XmlDocument};
