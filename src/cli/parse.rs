//! `jahiap parse`: assemble a site, persist it, report what was found.

use std::path::Path;

use anyhow::{Context, Result};

use jahiap::cache::{cache_path, fingerprint, persist_site, restore_site};
use jahiap::config::JahiapConfig;
use jahiap::parser::{default_site_name, discover_exports};
use jahiap::utils::plural::{plural_count, plural_es};
use jahiap::{Report, Site, debug, log};

use super::args::{ParseArgs, SourceArgs};

/// Parse the export named by `source`, or reuse a fresh cached parse.
///
/// The parsed site is written to the cache under `output_dir` either way.
pub fn load_site(
    source: &SourceArgs,
    config: &JahiapConfig,
    output_dir: &Path,
    use_cache: bool,
) -> Result<Site> {
    let export_dir = &source.export_dir;
    let exports = discover_exports(export_dir)
        .with_context(|| format!("cannot read export in {}", export_dir.display()))?;

    let name = source
        .name
        .clone()
        .unwrap_or_else(|| default_site_name(export_dir));
    let options = config.parse_options(Some(name.clone()));

    let digest = fingerprint(export_dir, &name, &exports, &options)
        .with_context(|| format!("cannot fingerprint export in {}", export_dir.display()))?;
    let cache_file = cache_path(output_dir, &name);

    if use_cache && let Some(site) = restore_site(&cache_file, digest) {
        log!("cache"; "reusing {}", cache_file.display());
        return Ok(site);
    }

    let site = Site::parse(export_dir, &options)
        .with_context(|| format!("failed to parse {}", export_dir.display()))?;

    if let Err(e) = persist_site(&site, digest, &cache_file) {
        log!("warning"; "cannot write {}: {}", cache_file.display(), e);
    }
    debug!("cache"; "fingerprint {}", digest);
    Ok(site)
}

pub fn run_parse(args: &ParseArgs, config: &JahiapConfig) -> Result<()> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.parse.output_dir.clone());
    let use_cache = args.use_cache || config.parse.use_cache;

    let site = load_site(&args.source, config, &output_dir, use_cache)?;
    let report = Report::new(&site);

    if args.print_report {
        println!("{}", report);
    } else {
        log!("report"; "{}", summary(&site.name, &report));
    }
    Ok(())
}

/// One-line outcome, logged when the full report is not printed.
fn summary(name: &str, report: &Report) -> String {
    let boxes = report.box_count();
    format!(
        "{}: {}, {} box{}, {}",
        name,
        plural_count(report.pages, "page"),
        boxes,
        plural_es(boxes),
        plural_count(report.files, "file")
    )
}
