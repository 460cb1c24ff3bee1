//! Page identity builder: registers the language-independent page tree.

use super::{PAGE_TAG, navigation::parse_navigation};
use crate::dom::{NodeId, XmlDocument};
use crate::log;
use crate::model::{HOME_TEMPLATE, Page, PageId, SITEMAP_TEMPLATE, Site};

/// Register every page of `doc` not yet known to `site`.
///
/// Pages are visited in document order, so an enclosing page is always
/// registered before the pages nested in it.
pub fn register_pages(site: &mut Site, doc: &XmlDocument, language: &str) -> usize {
    let mut registered = 0;

    for element in doc.elements_by_tag(PAGE_TAG) {
        let id = doc.attr(element, "jahia:pid");
        let template = doc.attr(element, "jahia:template");
        if template == SITEMAP_TEMPLATE || site.page_id(id).is_some() {
            continue;
        }

        let parent = match find_parent(site, doc, element) {
            Some(parent) => Some(parent),
            None => match site.homepage_id() {
                Some(home) => {
                    log!("warning"; "page {} ({}) has no parent page, attaching it to the home page", id, language);
                    Some(home)
                }
                None => {
                    if template != HOME_TEMPLATE {
                        log!("warning"; "page {} ({}) has template `{}` but no parent, using it as home page", id, language, template);
                    }
                    None
                }
            },
        };

        let mut page = Page::new(id, doc.attr(element, "jcr:uuid"), template);
        page.parent = parent;
        page.navigation = parse_navigation(doc, element, id);
        site.insert_page(page);
        registered += 1;
    }

    registered
}

/// Closest enclosing page that is registered. Sitemaps and other
/// unregistered wrappers are skipped.
fn find_parent(site: &Site, doc: &XmlDocument, element: NodeId) -> Option<PageId> {
    let mut current = doc.nearest_ancestor(element, PAGE_TAG);
    while let Some(ancestor) = current {
        if let Some(parent) = site.page_id(doc.attr(ancestor, "jahia:pid")) {
            return Some(parent);
        }
        current = doc.nearest_ancestor(ancestor, PAGE_TAG);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"<content>
      <jahia:page jahia:pid="1" jcr:uuid="u1" jahia:template="home">
        <jahia:page jahia:pid="2" jcr:uuid="u2" jahia:template="standard">
          <jahia:page jahia:pid="3" jcr:uuid="u3"/>
        </jahia:page>
        <jahia:page jahia:pid="9" jcr:uuid="u9" jahia:template="sitemap">
          <jahia:page jahia:pid="4" jcr:uuid="u4"/>
        </jahia:page>
      </jahia:page>
    </content>"#;

    #[test]
    fn test_register_tree() {
        let doc = XmlDocument::parse(TREE).unwrap();
        let mut site = Site::new("dcsl", "/tmp/dcsl");
        assert_eq!(register_pages(&mut site, &doc, "en"), 4);

        let home = site.homepage().unwrap();
        assert_eq!(home.id, "1");
        assert_eq!(home.level, 0);
        assert!(site.page_by_id("9").is_none());

        let grandchild = site.page_by_id("3").unwrap();
        assert_eq!(grandchild.level, 2);
        assert_eq!(site.page(grandchild.parent.unwrap()).id, "2");

        // Nested in a sitemap: attached to the page around the sitemap
        let under_sitemap = site.page_by_id("4").unwrap();
        assert_eq!(under_sitemap.level, 1);
        assert_eq!(under_sitemap.parent, site.homepage_id());
    }

    #[test]
    fn test_second_document_only_adds_new_pages() {
        let first = XmlDocument::parse(TREE).unwrap();
        let second = XmlDocument::parse(
            r#"<jahia:page jahia:pid="1" jcr:uuid="other" jahia:template="home">
                 <jahia:page jahia:pid="5" jcr:uuid="u5"/>
               </jahia:page>"#,
        )
        .unwrap();

        let mut site = Site::new("dcsl", "/tmp/dcsl");
        register_pages(&mut site, &first, "en");
        assert_eq!(register_pages(&mut site, &second, "fr"), 1);

        assert_eq!(site.page_by_id("1").unwrap().unique_id, "u1");
        assert_eq!(site.page_by_id("5").unwrap().level, 1);
        assert!(site.page_by_unique_id("other").is_none());
    }

    #[test]
    fn test_orphan_attached_to_home() {
        let doc = XmlDocument::parse(
            r#"<content>
                 <jahia:page jahia:pid="1" jcr:uuid="u1" jahia:template="home"/>
                 <jahia:page jahia:pid="2" jcr:uuid="u2"/>
               </content>"#,
        )
        .unwrap();
        let mut site = Site::new("dcsl", "/tmp/dcsl");
        register_pages(&mut site, &doc, "en");

        let roots = site.pages().filter(|page| page.parent.is_none()).count();
        assert_eq!(roots, 1);
        assert_eq!(site.page_by_id("2").unwrap().level, 1);
    }

    #[test]
    fn test_first_parentless_page_becomes_root() {
        let doc = XmlDocument::parse(
            r#"<content>
                 <jahia:page jahia:pid="7" jcr:uuid="u7" jahia:template="standard"/>
                 <jahia:page jahia:pid="1" jcr:uuid="u1" jahia:template="home">
                   <jahia:page jahia:pid="2" jcr:uuid="u2"/>
                 </jahia:page>
               </content>"#,
        )
        .unwrap();
        let mut site = Site::new("dcsl", "/tmp/dcsl");
        assert_eq!(register_pages(&mut site, &doc, "en"), 3);

        let roots: Vec<&str> = site
            .pages()
            .filter(|page| page.parent.is_none())
            .map(|page| page.id.as_str())
            .collect();
        assert_eq!(roots, vec!["7"]);
        assert_eq!(site.homepage().unwrap().id, "7");

        let home = site.page_by_id("1").unwrap();
        assert_eq!(home.level, 1);
        assert_eq!(home.parent, site.homepage_id());
        assert_eq!(site.page_by_id("2").unwrap().level, 2);
    }
}
