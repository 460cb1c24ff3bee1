//! Box builder: one XML fragment to one [`ContentBox`].

use crate::debug;
use crate::dom::{NodeId, XmlDocument};
use crate::model::{BoxFields, BoxKind, ContentBox};

const VALUE: &str = "jahia:value";

/// Build the box described by `element`.
///
/// With `multi_value`, every descendant `text` value is concatenated into
/// one text box instead of taking the first.
pub fn build_box(doc: &XmlDocument, element: NodeId, site_name: &str, multi_value: bool) -> ContentBox {
    let code = doc.attr(element, "jcr:primaryType");
    let kind = BoxKind::from_code(code);
    let title = doc.get_attribute(element, "boxTitle", VALUE);
    let mut content_box = ContentBox::new(kind, title, String::new());

    match &content_box.kind {
        BoxKind::Text | BoxKind::ColoredText => {
            content_box.content = text_content(doc, element, site_name, multi_value);
        }
        BoxKind::Infoscience => {
            content_box.content = shortcode("infoscience", doc.get_attribute(element, "url", VALUE));
        }
        BoxKind::Actu => {
            content_box.content = shortcode("actu", doc.get_attribute(element, "url", VALUE));
        }
        BoxKind::Faq => {
            let question = doc.get_attribute(element, "question", VALUE).to_string();
            let answer = doc.get_attribute(element, "answer", VALUE).to_string();
            content_box.content = format!("<h2>{question}</h2><p>{answer}</p>");
            content_box.fields = BoxFields::Faq { question, answer };
        }
        BoxKind::Toggle => {
            let opened = doc.get_attribute(element, "opened", VALUE);
            content_box.content = doc.get_attribute(element, "content", VALUE).to_string();
            content_box.fields = BoxFields::Toggle {
                is_open: opened.eq_ignore_ascii_case("true"),
            };
        }
        BoxKind::Unknown(code) => {
            debug!("warning"; "unknown box type `{}`", code);
        }
    }

    content_box
}

fn text_content(doc: &XmlDocument, element: NodeId, site_name: &str, multi_value: bool) -> String {
    let content = if multi_value {
        doc.descendants_by_tag(element, "text")
            .map(|text| doc.attr(text, VALUE))
            .collect::<String>()
    } else {
        doc.get_attribute(element, "text", VALUE).to_string()
    };

    if content.is_empty() {
        return content;
    }
    rewrite_file_links(&content, site_name)
}

/// Turn `###file:/content/sites/<site>/files/` placeholders into `/files/`.
pub fn rewrite_file_links(content: &str, site_name: &str) -> String {
    let sentinel = format!("###file:/content/sites/{site_name}/files/");
    content.replace(&sentinel, "/files/")
}

fn shortcode(name: &str, url: &str) -> String {
    format!("[{name} url={url}]")
}

/// More than one `text` descendant: the container is read as one multi-value box.
pub fn is_multi_value(doc: &XmlDocument, element: NodeId) -> bool {
    doc.descendants_by_tag(element, "text").nth(1).is_some()
}
