//! Site-wide settings declared once per export document.

use crate::dom::XmlDocument;
use crate::log;
use crate::model::{LanguageParams, Link};

/// CSS location used when none is configured; `{theme}` is substituted.
pub const DEFAULT_CSS_URL: &str = "//static.epfl.ch/v0.23.0/styles/{theme}-built.css";

const VALUE: &str = "jahia:value";

pub fn parse_params(doc: &XmlDocument, language: &str, css_url: &str) -> LanguageParams {
    let theme = doc.first_attribute("theme", VALUE).to_string();

    LanguageParams {
        title: doc.first_attribute("siteName", VALUE).to_string(),
        acronym: doc.first_attribute("acronym", VALUE).to_string(),
        css_url: css_url.replace("{theme}", &theme),
        theme,
        breadcrumb: parse_breadcrumb(doc, language),
        footer: parse_footer(doc),
    }
}

/// First `jahia:url` directly under the first `breadCrumbLink`.
fn parse_breadcrumb(doc: &XmlDocument, language: &str) -> Option<Link> {
    let breadcrumb = doc
        .elements_by_tag("breadCrumbLink")
        .next()
        .and_then(|link| doc.children_by_tag(link, "jahia:url").next())
        .map(|url| Link::new(doc.attr(url, VALUE), doc.attr(url, "jahia:title")));

    if breadcrumb.is_none() {
        log!("warning"; "no breadcrumb in the {} export", language);
    }
    breadcrumb
}

/// Links of the first `bottomLinksListList` directly under the document
/// element. Empty means the default footer.
fn parse_footer(doc: &XmlDocument) -> Vec<Link> {
    let Some(root) = doc.root() else {
        return Vec::new();
    };

    doc.children_by_tag(root, "bottomLinksListList")
        .next()
        .map(|list| {
            doc.descendants_by_tag(list, "jahia:url")
                .map(|url| Link::new(doc.attr(url, VALUE), doc.attr(url, "jahia:title")))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"<content>
      <siteName jahia:value="Distributed Computing Lab"/>
      <theme jahia:value="ic"/>
      <acronym jahia:value="DCL"/>
      <breadCrumbLink>
        <jahia:url jahia:value="https://ic.epfl.ch" jahia:title="IC"/>
        <jahia:url jahia:value="https://other" jahia:title="Other"/>
      </breadCrumbLink>
      <bottomLinksListList>
        <item><jahia:url jahia:value="/contact" jahia:title="Contact"/></item>
        <item><jahia:url jahia:value="/legal" jahia:title="Legal"/></item>
      </bottomLinksListList>
      <bottomLinksListList>
        <jahia:url jahia:value="/ignored" jahia:title="Ignored"/>
      </bottomLinksListList>
    </content>"#;

    #[test]
    fn test_parse_params() {
        let doc = XmlDocument::parse(EXPORT).unwrap();
        let params = parse_params(&doc, "en", DEFAULT_CSS_URL);

        assert_eq!(params.title, "Distributed Computing Lab");
        assert_eq!(params.acronym, "DCL");
        assert_eq!(params.theme, "ic");
        assert_eq!(params.css_url, "//static.epfl.ch/v0.23.0/styles/ic-built.css");
        assert_eq!(params.breadcrumb, Some(Link::new("https://ic.epfl.ch", "IC")));
        assert_eq!(
            params.footer,
            vec![Link::new("/contact", "Contact"), Link::new("/legal", "Legal")]
        );
    }

    #[test]
    fn test_missing_params_are_empty() {
        let doc = XmlDocument::parse("<content><jahia:page/></content>").unwrap();
        let params = parse_params(&doc, "fr", "/css/{theme}.css");

        assert_eq!(params.title, "");
        assert_eq!(params.css_url, "/css/.css");
        assert!(params.breadcrumb.is_none());
        assert!(params.footer.is_empty());
    }
}
