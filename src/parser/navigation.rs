//! Navigation entries declared by a page.

use super::{PAGE_TAG, belongs_to};
use crate::dom::{NodeId, XmlDocument};
use crate::model::{NavigationPage, SITEMAP_TEMPLATE};

/// Navigation of the page `element`, whose id is `page_id`.
///
/// `navigationPage` blocks nested in descendant pages are left to them.
pub fn parse_navigation(doc: &XmlDocument, element: NodeId, page_id: &str) -> Vec<NavigationPage> {
    let mut navigation = Vec::new();

    for block in doc.descendants_by_tag(element, "navigationPage") {
        if !belongs_to(doc, block, page_id) {
            continue;
        }

        for child in doc.children(block) {
            let title = doc.attr(child, "jahia:title");
            match doc.name(child) {
                PAGE_TAG if doc.attr(child, "jahia:template") != SITEMAP_TEMPLATE => {
                    navigation.push(NavigationPage::internal(doc.attr(child, "jcr:uuid"), title));
                }
                "jahia:link" => {
                    navigation.push(NavigationPage::internal(doc.attr(child, "jahia:reference"), title));
                }
                "jahia:url" => {
                    navigation.push(NavigationPage::external(doc.attr(child, "jahia:value"), title));
                }
                _ => {}
            }
        }
    }

    navigation
}
