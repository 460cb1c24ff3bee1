//! Page content builder: the language-specific facet of a page.
//!
//! Contents are built in two steps. [`build_content`] reads everything the
//! page element itself declares; [`attach_contents`] then resolves sidebar
//! inheritance for a whole language at once and stores the results.

use rustc_hash::FxHashSet;

use super::boxes::{build_box, is_multi_value};
use super::{PAGE_TAG, ParseOptions, belongs_to};
use crate::dom::{NodeId, XmlDocument};
use crate::model::{ContentBox, Page, PageContent, PageId, SITEMAP_TEMPLATE, Sidebar, SidebarId, Site};
use crate::utils::date::Timestamp;
use crate::{debug, log};

/// A page content whose sidebar is not resolved yet.
#[derive(Debug)]
pub struct ContentDraft {
    pub page: PageId,
    pub path: String,
    pub title: String,
    pub boxes: Vec<ContentBox>,
    /// Boxes declared by the page itself; empty means "inherit".
    pub sidebar_boxes: Vec<ContentBox>,
    pub last_update: Option<Timestamp>,
}

pub fn build_content(
    site: &Site,
    options: &ParseOptions,
    page_id: PageId,
    language: &str,
    doc: &XmlDocument,
    element: NodeId,
) -> ContentDraft {
    let page = site.page(page_id);

    ContentDraft {
        page: page_id,
        path: output_path(options, page, language, doc.attr(element, "jahia:urlMappings")),
        title: doc.attr(element, "jahia:title").to_string(),
        boxes: main_boxes(doc, element, &page.id, &site.name),
        sidebar_boxes: sidebar_boxes(doc, element, &site.name),
        last_update: last_update(doc.attr(element, "jcr:lastModified"), &page.id, language),
    }
}

/// Site-relative URL of `page` in `language`.
pub fn output_path(options: &ParseOptions, page: &Page, language: &str, vanity: &str) -> String {
    let path = if page.is_homepage() {
        if language == options.primary_language {
            "/index.html".to_string()
        } else {
            format!("/index-{language}.html")
        }
    } else if !vanity.is_empty() {
        vanity.split("$$$").next().unwrap_or_default().to_string()
    } else {
        format!("/page-{}-{}.html", page.id, language)
    };

    format!("{}{}", options.root_path, path)
}

fn last_update(raw: &str, page_id: &str, language: &str) -> Option<Timestamp> {
    if raw.is_empty() {
        debug!("warning"; "page {} ({}) has no last modification date", page_id, language);
        return None;
    }
    match Timestamp::parse(raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            log!("warning"; "page {} ({}): {}", page_id, language, e);
            None
        }
    }
}

/// Boxes of the `main` elements owned by the page.
fn main_boxes(doc: &XmlDocument, element: NodeId, page_id: &str, site_name: &str) -> Vec<ContentBox> {
    let mut boxes = Vec::new();

    for main in doc.descendants_by_tag(element, "main") {
        if !belongs_to(doc, main, page_id) {
            continue;
        }

        if doc.attr(main, "jcr:primaryType") == "epfl:faqBox" {
            boxes.extend(
                doc.descendants_by_tag(main, "faqList")
                    .map(|faq| build_box(doc, faq, site_name, false)),
            );
        } else {
            boxes.push(build_box(doc, main, site_name, is_multi_value(doc, main)));
        }
    }

    boxes
}

/// Element children of the page's direct `extraList` children.
fn sidebar_boxes(doc: &XmlDocument, element: NodeId, site_name: &str) -> Vec<ContentBox> {
    doc.children_by_tag(element, "extraList")
        .flat_map(|list| doc.children(list))
        .map(|extra| build_box(doc, extra, site_name, false))
        .collect()
}

// ============================================================================
// Sidebar resolution
// ============================================================================

/// Resolve sidebars of one language and store the contents in `site`.
///
/// Drafts are handled by increasing page level, so every ancestor's sidebar
/// is final before its descendants look at it.
pub fn attach_contents(site: &mut Site, language: &str, mut drafts: Vec<ContentDraft>) {
    drafts.sort_by_key(|draft| site.page(draft.page).level);

    for draft in drafts {
        let sidebar = if !draft.sidebar_boxes.is_empty() {
            site.add_sidebar(Sidebar::new(language, draft.sidebar_boxes))
        } else {
            match inherited_sidebar(site, draft.page, language) {
                Some(shared) => shared,
                None => site.add_sidebar(Sidebar::new(language, Vec::new())),
            }
        };

        let content = PageContent {
            language: language.to_string(),
            path: draft.path,
            title: draft.title,
            boxes: draft.boxes,
            sidebar,
            last_update: draft.last_update,
        };
        site.page_mut(draft.page)
            .contents
            .insert(language.to_string(), content);
    }
}

/// Nearest non-empty sidebar up the parent chain, in `language`.
///
/// Ancestors without content in `language` are skipped. The walk ends at
/// the home page.
pub fn inherited_sidebar(site: &Site, page: PageId, language: &str) -> Option<SidebarId> {
    let mut current = site.page(page).parent;
    while let Some(ancestor) = current {
        let ancestor = site.page(ancestor);
        if let Some(content) = ancestor.content(language)
            && !site.sidebar(content.sidebar).is_empty()
        {
            return Some(content.sidebar);
        }
        current = ancestor.parent;
    }
    None
}

/// Builds the drafts of every page of `doc`, keeping the first element seen
/// for each page.
pub fn build_language(
    site: &Site,
    options: &ParseOptions,
    language: &str,
    doc: &XmlDocument,
) -> Vec<ContentDraft> {
    let mut drafts = Vec::new();
    let mut seen: FxHashSet<PageId> = FxHashSet::default();

    for element in doc.elements_by_tag(PAGE_TAG) {
        if doc.attr(element, "jahia:template") == SITEMAP_TEMPLATE {
            continue;
        }
        let id = doc.attr(element, "jahia:pid");
        let Some(page_id) = site.page_id(id) else {
            log!("warning"; "page {} ({}) was never registered, skipping its content", id, language);
            continue;
        };
        if !seen.insert(page_id) {
            log!("warning"; "page {} appears twice in the {} export, keeping the first", id, language);
            continue;
        }
        drafts.push(build_content(site, options, page_id, language, doc, element));
    }

    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoxKind;

    fn options() -> ParseOptions {
        ParseOptions::default()
    }

    fn home_and_child() -> (Site, PageId, PageId) {
        let mut site = Site::new("acme", "/tmp/acme");
        let home = site.insert_page(Page::new("1", "u1", "home"));
        let mut team = Page::new("2", "u2", "standard");
        team.parent = Some(home);
        let team = site.insert_page(team);
        (site, home, team)
    }

    #[test]
    fn test_output_paths() {
        let (site, home, team) = home_and_child();
        let opts = options();

        assert_eq!(output_path(&opts, site.page(home), "en", ""), "/index.html");
        assert_eq!(output_path(&opts, site.page(home), "fr", ""), "/index-fr.html");
        assert_eq!(output_path(&opts, site.page(team), "fr", ""), "/page-2-fr.html");
        assert_eq!(
            output_path(&opts, site.page(team), "en", "/team.html$$$/equipe.html"),
            "/team.html"
        );

        let rooted = ParseOptions {
            root_path: "/acme".into(),
            primary_language: "fr".into(),
            ..options()
        };
        assert_eq!(output_path(&rooted, site.page(home), "fr", ""), "/acme/index.html");
        assert_eq!(output_path(&rooted, site.page(home), "en", ""), "/acme/index-en.html");
    }

    #[test]
    fn test_last_update_tolerates_bad_dates() {
        assert_eq!(
            last_update("2017-06-13T09:39:15", "1", "en"),
            Some(Timestamp::new(2017, 6, 13, 9, 39, 15))
        );
        assert_eq!(last_update("yesterday", "1", "en"), None);
        assert_eq!(last_update("", "1", "en"), None);
    }

    #[test]
    fn test_boxes_of_nested_pages_are_not_attributed_to_parent() {
        let doc = XmlDocument::parse(
            r#"<jahia:page jahia:pid="1">
                 <main jcr:primaryType="epfl:textBox"><text jahia:value="home"/></main>
                 <jahia:page jahia:pid="2">
                   <main jcr:primaryType="epfl:textBox"><text jahia:value="team"/></main>
                 </jahia:page>
               </jahia:page>"#,
        )
        .unwrap();
        let root = doc.root().unwrap();

        let boxes = main_boxes(&doc, root, "1", "acme");
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].content, "home");
    }

    #[test]
    fn test_faq_box_yields_one_box_per_entry() {
        let doc = XmlDocument::parse(
            r#"<jahia:page jahia:pid="1">
                 <main jcr:primaryType="epfl:faqBox">
                   <faqList jcr:primaryType="epfl:faqContainer">
                     <question jahia:value="Q1"/><answer jahia:value="A1"/>
                   </faqList>
                   <faqList jcr:primaryType="epfl:faqContainer">
                     <question jahia:value="Q2"/><answer jahia:value="A2"/>
                   </faqList>
                 </main>
               </jahia:page>"#,
        )
        .unwrap();
        let boxes = main_boxes(&doc, doc.root().unwrap(), "1", "acme");
        assert_eq!(boxes.len(), 2);
        assert!(boxes.iter().all(|b| b.kind == BoxKind::Faq));
        assert_eq!(boxes[1].content, "<h2>Q2</h2><p>A2</p>");
    }

    #[test]
    fn test_sidebar_boxes_from_extra_lists() {
        let doc = XmlDocument::parse(
            r#"<jahia:page jahia:pid="1">
                 <extraList>
                   <extra jcr:primaryType="epfl:textBox"><text jahia:value="contact"/></extra>
                   <extra jcr:primaryType="epfl:actuBox"><url jahia:value="https://actu"/></extra>
                 </extraList>
                 <section><extraList><extra jcr:primaryType="epfl:textBox"/></extraList></section>
               </jahia:page>"#,
        )
        .unwrap();
        let sidebar = sidebar_boxes(&doc, doc.root().unwrap(), "acme");
        assert_eq!(sidebar.len(), 2);
        assert_eq!(sidebar[0].content, "contact");
        assert_eq!(sidebar[1].kind, BoxKind::Actu);
    }

    fn draft(page: PageId, sidebar_boxes: Vec<ContentBox>) -> ContentDraft {
        ContentDraft {
            page,
            path: String::new(),
            title: String::new(),
            boxes: Vec::new(),
            sidebar_boxes,
            last_update: None,
        }
    }

    #[test]
    fn test_empty_sidebar_is_inherited_by_handle() {
        let (mut site, home, team) = home_and_child();
        let news = ContentBox::new(BoxKind::Text, "News", "<p>n</p>");

        // Child first: resolution order must not depend on draft order
        attach_contents(&mut site, "en", vec![draft(team, Vec::new()), draft(home, vec![news])]);

        let home_sidebar = site.page(home).content("en").unwrap().sidebar;
        let team_sidebar = site.page(team).content("en").unwrap().sidebar;
        assert_eq!(home_sidebar, team_sidebar);
        assert_eq!(site.sidebars().count(), 1);
    }

    #[test]
    fn test_inheritance_stops_at_home() {
        let (mut site, home, team) = home_and_child();
        attach_contents(&mut site, "en", vec![draft(home, Vec::new()), draft(team, Vec::new())]);

        let team_content = site.page(team).content("en").unwrap();
        assert!(site.sidebar_of(team_content).is_empty());
        assert_eq!(inherited_sidebar(&site, team, "en"), None);
    }

    #[test]
    fn test_inheritance_skips_ancestors_missing_the_language() {
        let (mut site, home, team) = home_and_child();
        let mut member = Page::new("3", "u3", "standard");
        member.parent = Some(team);
        let member = site.insert_page(member);

        let contact = ContentBox::new(BoxKind::Text, "Contact", "");
        attach_contents(&mut site, "fr", vec![draft(home, vec![contact]), draft(member, Vec::new())]);

        assert!(site.page(team).content("fr").is_none());
        assert_eq!(
            site.page(member).content("fr").unwrap().sidebar,
            site.page(home).content("fr").unwrap().sidebar
        );
    }
}
