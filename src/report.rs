//! Summary of a parsed site for the operator.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::model::Site;
use crate::utils::plural::{plural_es, plural_s};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub files: usize,
    pub pages: usize,
    /// Main boxes per kind, keyed by the kind's display name.
    pub boxes: BTreeMap<String, usize>,
    pub sidebar_boxes: usize,
    pub internal_links: usize,
    pub unresolved_links: usize,
    pub languages: Vec<String>,
}

impl Report {
    /// Aggregate `site`. Reads only.
    pub fn new(site: &Site) -> Self {
        let mut boxes = BTreeMap::new();
        for content_box in site.all_boxes() {
            *boxes.entry(content_box.kind.to_string()).or_insert(0) += 1;
        }

        Self {
            files: site.files.len(),
            pages: site.page_count(),
            boxes,
            sidebar_boxes: site.sidebars().map(|(_, sidebar)| sidebar.boxes.len()).sum(),
            internal_links: site.internal_links,
            unresolved_links: site.unresolved_links,
            languages: site.languages.clone(),
        }
    }

    pub fn box_count(&self) -> usize {
        self.boxes.values().sum()
    }
}

/// Write `reports` as CSV, one row per site.
///
/// Columns are `name`, `pages`, `files`, then every box kind found in any
/// report, sorted. A site without boxes of a kind gets `0`.
pub fn write_global_report<W: io::Write>(writer: W, reports: &[(String, Report)]) -> csv::Result<()> {
    let kinds: BTreeSet<&str> = reports
        .iter()
        .flat_map(|(_, report)| report.boxes.keys().map(String::as_str))
        .collect();

    let mut table = csv::Writer::from_writer(writer);
    let mut header = vec!["name", "pages", "files"];
    header.extend(kinds.iter().copied());
    table.write_record(&header)?;

    for (name, report) in reports {
        let mut row = vec![name.clone(), report.pages.to_string(), report.files.to_string()];
        row.extend(
            kinds
                .iter()
                .map(|kind| report.boxes.get(*kind).copied().unwrap_or(0).to_string()),
        );
        table.write_record(&row)?;
    }
    table.flush()?;
    Ok(())
}

/// Rendered for stdout; colors follow `--color` and the terminal.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |n: usize| n.if_supports_color(Stream::Stdout, |n| n.cyan()).to_string();

        writeln!(f, "{}", "Found:".if_supports_color(Stream::Stdout, |t| t.bold()))?;
        writeln!(f, "  - {} file{}", count(self.files), plural_s(self.files))?;
        let languages = format!("({})", self.languages.join(", "));
        writeln!(
            f,
            "  - {} page{} {}",
            count(self.pages),
            plural_s(self.pages),
            languages.if_supports_color(Stream::Stdout, |t| t.dimmed())
        )?;
        for (kind, n) in &self.boxes {
            writeln!(f, "    - {} {} box{}", count(*n), kind, plural_es(*n))?;
        }
        writeln!(
            f,
            "    - {} sidebar box{}",
            count(self.sidebar_boxes),
            plural_es(self.sidebar_boxes)
        )?;
        write!(
            f,
            "    - {} internal link{}",
            count(self.internal_links),
            plural_s(self.internal_links)
        )?;
        if self.unresolved_links > 0 {
            let unresolved = format!("({} unresolved)", self.unresolved_links);
            write!(f, " {}", unresolved.if_supports_color(Stream::Stdout, |t| t.yellow()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoxKind, ContentBox, File, Page, PageContent, Sidebar};

    fn content(language: &str, boxes: Vec<ContentBox>, site: &mut Site) -> PageContent {
        let sidebar = site.add_sidebar(Sidebar::new(
            language,
            vec![ContentBox::new(BoxKind::Text, "Contact", "")],
        ));
        PageContent {
            language: language.to_string(),
            path: "/index.html".to_string(),
            title: String::new(),
            boxes,
            sidebar,
            last_update: None,
        }
    }

    fn sample_site() -> Site {
        let mut site = Site::new("acme", "/tmp/acme");
        site.languages = vec!["en".into(), "fr".into()];
        site.files.push(File::new("logo.png", "/tmp/acme/files"));
        site.internal_links = 4;
        site.unresolved_links = 1;

        let home = site.insert_page(Page::new("1", "u1", "home"));
        let en = content(
            "en",
            vec![
                ContentBox::new(BoxKind::Text, "", ""),
                ContentBox::new(BoxKind::Text, "", ""),
                ContentBox::new(BoxKind::Unknown("epfl:mapBox".into()), "", ""),
            ],
            &mut site,
        );
        let fr = content("fr", vec![ContentBox::new(BoxKind::Faq, "", "")], &mut site);
        site.page_mut(home).contents.insert("en".into(), en);
        site.page_mut(home).contents.insert("fr".into(), fr);
        site
    }

    #[test]
    fn test_report_counts() {
        let report = Report::new(&sample_site());

        assert_eq!(report.files, 1);
        assert_eq!(report.pages, 1);
        assert_eq!(report.boxes["text"], 2);
        assert_eq!(report.boxes["faq"], 1);
        assert_eq!(report.boxes["unknown 'epfl:mapBox'"], 1);
        assert_eq!(report.box_count(), 4);
        assert_eq!(report.sidebar_boxes, 2);
        assert_eq!(report.internal_links, 4);
        assert_eq!(report.unresolved_links, 1);
        assert_eq!(report.languages, vec!["en", "fr"]);
    }

    #[test]
    fn test_report_display() {
        let rendered = Report::new(&sample_site()).to_string();
        assert!(rendered.contains("Found:"));
        assert!(rendered.contains("file"));
        assert!(rendered.contains("text box"));
        assert!(rendered.contains("internal links"));
        assert!(rendered.contains("1 unresolved"));
    }

    #[test]
    fn test_display_without_colors() {
        owo_colors::set_override(false);
        let rendered = Report::new(&sample_site()).to_string();
        assert!(!rendered.contains('\x1b'));
        assert!(rendered.starts_with("Found:\n  - 1 file\n"));
    }

    #[test]
    fn test_global_report_columns() {
        let acme = Report::new(&sample_site());
        let mut empty = Report::default();
        empty.pages = 3;

        let mut out = Vec::new();
        write_global_report(&mut out, &[("acme".into(), acme), ("dcsl".into(), empty)]).unwrap();
        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "name,pages,files,faq,text,unknown 'epfl:mapBox'");
        assert_eq!(lines[1], "acme,1,1,1,2,1");
        assert_eq!(lines[2], "dcsl,3,0,0,0,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_site() {
        let report = Report::new(&Site::default());
        assert_eq!(report, Report::default());
        assert!(!report.to_string().contains("unresolved"));
    }
}
