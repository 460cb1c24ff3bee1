//! Link resolver: rewrites internal page references inside box content.
//!
//! The export writes links to other pages as
//! `href="###page:/lang/en/ref/<unique id>"`. Once every page content is
//! built, those hrefs are replaced by the target's output path in the
//! language of the box holding the link. Only the href values are spliced;
//! the surrounding markup is kept byte for byte.

use std::ops::Range;

use crate::debug;
use crate::model::{PageId, SidebarId, Site};

const PAGE_SENTINEL: &str = "###page";

/// Outcome of one resolver pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub resolved: usize,
    pub unresolved: usize,
}

impl LinkStats {
    fn add(&mut self, other: Self) {
        self.resolved += other.resolved;
        self.unresolved += other.unresolved;
    }
}

/// Rewrite every internal link in `site`, main boxes and sidebars alike.
///
/// Running it again changes nothing: rewritten hrefs no longer carry the
/// sentinel.
pub fn resolve_links(site: &mut Site) -> LinkStats {
    let plan = plan_rewrites(site);

    for (page_id, language, index, rewritten) in plan.boxes {
        if let Some(content) = site.page_mut(page_id).contents.get_mut(&language) {
            content.boxes[index].content = rewritten;
        }
    }
    for (sidebar_id, index, rewritten) in plan.sidebars {
        site.sidebar_mut(sidebar_id).boxes[index].content = rewritten;
    }

    site.internal_links += plan.stats.resolved;
    site.unresolved_links = plan.stats.unresolved;
    plan.stats
}

#[derive(Default)]
struct RewritePlan {
    boxes: Vec<(PageId, String, usize, String)>,
    sidebars: Vec<(SidebarId, usize, String)>,
    stats: LinkStats,
}

fn plan_rewrites(site: &Site) -> RewritePlan {
    let mut plan = RewritePlan::default();

    for page_id in site.page_ids() {
        for (language, content) in &site.page(page_id).contents {
            for (index, content_box) in content.boxes.iter().enumerate() {
                let (rewritten, stats) = rewrite_internal_links(&content_box.content, |unique_id| {
                    target_path(site, unique_id, language)
                });
                plan.stats.add(stats);
                if let Some(rewritten) = rewritten {
                    plan.boxes.push((page_id, language.clone(), index, rewritten));
                }
            }
        }
    }

    // Each sidebar once, however many pages share it
    for (sidebar_id, sidebar) in site.sidebars() {
        for (index, content_box) in sidebar.boxes.iter().enumerate() {
            let (rewritten, stats) = rewrite_internal_links(&content_box.content, |unique_id| {
                target_path(site, unique_id, &sidebar.language)
            });
            plan.stats.add(stats);
            if let Some(rewritten) = rewritten {
                plan.sidebars.push((sidebar_id, index, rewritten));
            }
        }
    }

    plan
}

fn target_path(site: &Site, unique_id: &str, language: &str) -> Option<String> {
    let page = site.page_by_unique_id(unique_id)?;
    page.content(language).map(|content| content.path.clone())
}

/// Rewrite the `<a href="###page…">` targets of `html` through `resolve`,
/// which maps a unique id to a path.
///
/// Returns the new markup, or `None` when nothing changed.
pub fn rewrite_internal_links(
    html: &str,
    resolve: impl Fn(&str) -> Option<String>,
) -> (Option<String>, LinkStats) {
    let mut stats = LinkStats::default();
    if !html.contains(PAGE_SENTINEL) {
        return (None, stats);
    }

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    for (span, href) in anchor_hrefs(html) {
        if !href.starts_with(PAGE_SENTINEL) {
            continue;
        }
        let unique_id = href.rsplit('/').next().unwrap_or_default();
        match resolve(unique_id) {
            Some(path) => {
                stats.resolved += 1;
                edits.push((span, path));
            }
            None => {
                debug!("links"; "unresolved internal link `{}`", href);
                stats.unresolved += 1;
            }
        }
    }

    if edits.is_empty() {
        return (None, stats);
    }

    edits.sort_by_key(|(span, _)| span.start);
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for (span, path) in edits {
        out.push_str(&html[cursor..span.start]);
        out.push_str(&path);
        cursor = span.end;
    }
    out.push_str(&html[cursor..]);

    (Some(out), stats)
}

/// Byte span and value of every `<a>` href in `html`.
///
/// Start tags are scanned one at a time, so a stray `<` in text does not
/// hide a later link.
fn anchor_hrefs(html: &str) -> Vec<(Range<usize>, &str)> {
    let bytes = html.as_bytes();
    let mut hrefs = Vec::new();
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let name = pos + offset + 1;
        pos = name;
        if !is_anchor_start(&bytes[name..]) {
            continue;
        }
        let (end, href) = scan_attributes(html, name + 1);
        if let Some(span) = href {
            hrefs.push((span.clone(), &html[span]));
        }
        pos = end;
    }
    hrefs
}

/// `a` or `A` followed by the end of the tag name.
fn is_anchor_start(rest: &[u8]) -> bool {
    match rest {
        [b'a' | b'A', next, ..] => next.is_ascii_whitespace() || matches!(next, b'>' | b'/'),
        _ => false,
    }
}

/// Walk the attributes of a start tag from `from` up to its closing `>`.
///
/// Returns the offset just past the tag and the value span of the first
/// `href`, whatever its case or quoting.
fn scan_attributes(html: &str, from: usize) -> (usize, Option<Range<usize>>) {
    let bytes = html.as_bytes();
    let len = bytes.len();
    let skip_blank = |mut i: usize| {
        while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        i
    };

    let mut href = None;
    let mut i = from;
    loop {
        i = skip_blank(i);
        if i >= len {
            return (len, href);
        }
        if bytes[i] == b'>' {
            return (i + 1, href);
        }

        let name_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        let name = &html[name_start..i];

        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let start = i + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == quote)
                    .map_or(len, |at| start + at);
                i = (end + 1).min(len);
                start..end
            }
            _ => {
                let start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                start..i
            }
        };

        if href.is_none() && name.eq_ignore_ascii_case("href") {
            href = Some(value);
        }
    }
}
