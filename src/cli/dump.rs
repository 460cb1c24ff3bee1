//! `jahiap dump`: a JSON summary of every page, language and box.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use jahiap::Site;
use jahiap::log;
use jahiap::model::{ContentBox, LanguageParams, Page, PageContent};
use jahiap::utils::date::Timestamp;

use super::args::DumpArgs;
use super::parse::load_site;
use jahiap::config::JahiapConfig;

/// Characters of box content kept in the summary.
const CONTENT_PREVIEW: usize = 150;

#[derive(Debug, Serialize)]
pub struct SiteDump<'a> {
    pub properties: Properties<'a>,
    pub pages: Vec<PageDump<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Properties<'a> {
    pub name: &'a str,
    pub base_path: &'a Path,
    pub languages: &'a [String],
    pub export_files: &'a BTreeMap<String, PathBuf>,
    pub params: &'a BTreeMap<String, LanguageParams>,
    pub homepage: Option<&'a str>,
    pub files: usize,
    pub pages: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct PageDump<'a> {
    pub id: &'a str,
    pub template: &'a str,
    pub level: usize,
    pub children: usize,
    pub languages: Vec<&'a str>,
    pub contents: BTreeMap<&'a str, ContentDump<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ContentDump<'a> {
    pub path: &'a str,
    pub title: &'a str,
    pub last_update: Option<Timestamp>,
    pub boxes: Vec<BoxDump<'a>>,
    pub sidebar: Vec<BoxDump<'a>>,
}

#[derive(Debug, Serialize)]
pub struct BoxDump<'a> {
    pub title: &'a str,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl<'a> SiteDump<'a> {
    pub fn new(site: &'a Site) -> Self {
        let properties = Properties {
            name: &site.name,
            base_path: &site.base_path,
            languages: &site.languages,
            export_files: &site.export_files,
            params: &site.params,
            homepage: site.homepage().map(|page| page.id.as_str()),
            files: site.files.len(),
            pages: site.pages().map(|page| page.id.as_str()).collect(),
        };
        let pages = site.pages().map(|page| PageDump::new(site, page)).collect();
        Self { properties, pages }
    }
}

impl<'a> PageDump<'a> {
    fn new(site: &'a Site, page: &'a Page) -> Self {
        Self {
            id: &page.id,
            template: &page.template,
            level: page.level,
            children: page.children.len(),
            languages: page.contents.keys().map(String::as_str).collect(),
            contents: page
                .contents
                .iter()
                .map(|(language, content)| (language.as_str(), ContentDump::new(site, content)))
                .collect(),
        }
    }
}

impl<'a> ContentDump<'a> {
    fn new(site: &'a Site, content: &'a PageContent) -> Self {
        Self {
            path: &content.path,
            title: &content.title,
            last_update: content.last_update,
            boxes: content.boxes.iter().map(BoxDump::new).collect(),
            sidebar: site.sidebar_of(content).boxes.iter().map(BoxDump::new).collect(),
        }
    }
}

impl<'a> BoxDump<'a> {
    fn new(content_box: &'a ContentBox) -> Self {
        Self {
            title: &content_box.title,
            kind: content_box.kind.to_string(),
            content: content_box.content.chars().take(CONTENT_PREVIEW).collect(),
        }
    }
}

pub fn run_dump(args: &DumpArgs, config: &JahiapConfig) -> Result<()> {
    let site = load_site(
        &args.source,
        config,
        &config.parse.output_dir,
        config.parse.use_cache,
    )?;
    let dump = SiteDump::new(&site);

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&dump)?
    } else {
        serde_json::to_string(&dump)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("cannot create {}", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("dump"; "wrote {} pages to {}", dump.pages.len(), output_path.display());
    } else {
        println!("{}", formatted);
    }
    Ok(())
}
