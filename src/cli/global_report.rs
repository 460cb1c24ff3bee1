//! `jahiap global-report`: one CSV row of counts per site.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use jahiap::config::JahiapConfig;
use jahiap::log;
use jahiap::parser::default_site_name;
use jahiap::report::{Report, write_global_report};
use jahiap::utils::plural::plural_count;

use super::args::{GlobalReportArgs, SourceArgs};
use super::parse::load_site;

pub const GLOBAL_REPORT_FILE: &str = "global-report.csv";

/// Parse every export of `args` and write the table. Sites that fail to
/// parse are logged and left out.
pub fn run_global_report(args: &GlobalReportArgs, config: &JahiapConfig) -> Result<PathBuf> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.parse.output_dir.clone());
    let use_cache = args.use_cache || config.parse.use_cache;

    let mut reports = Vec::with_capacity(args.export_dirs.len());
    for export_dir in &args.export_dirs {
        let source = SourceArgs {
            export_dir: export_dir.clone(),
            name: None,
        };
        match load_site(&source, config, &output_dir, use_cache) {
            Ok(site) => reports.push((site.name.clone(), Report::new(&site))),
            Err(e) => log!("error"; "{}: {:#}", default_site_name(export_dir), e),
        }
    }

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;
    let path = output_dir.join(GLOBAL_REPORT_FILE);
    let file = fs::File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
    write_global_report(file, &reports).with_context(|| format!("cannot write {}", path.display()))?;

    log!("report"; "{} in {}", plural_count(reports.len(), "site"), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn export(root: &std::path::Path, name: &str, pages: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        let xml = format!(
            r#"<content><jahia:page jahia:pid="1" jcr:uuid="u1" jahia:template="home">{pages}</jahia:page></content>"#
        );
        fs::write(dir.join("export_en.xml"), xml).unwrap();
        dir
    }

    #[test]
    fn test_one_row_per_parsed_site() {
        let dir = TempDir::new().unwrap();
        let acme = export(
            dir.path(),
            "acme",
            r#"<main jcr:primaryType="epfl:textBox"><text jahia:value="hi"/></main>
               <jahia:page jahia:pid="2" jcr:uuid="u2"/>"#,
        );
        let dcsl = export(
            dir.path(),
            "dcsl",
            r#"<main jcr:primaryType="epfl:actuBox"><url jahia:value="https://actu"/></main>"#,
        );
        let args = GlobalReportArgs {
            export_dirs: vec![acme, dir.path().join("missing"), dcsl],
            output_dir: Some(dir.path().join("build")),
            use_cache: false,
        };

        let path = run_global_report(&args, &JahiapConfig::default()).unwrap();
        assert_eq!(path, dir.path().join("build").join(GLOBAL_REPORT_FILE));

        let csv = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["name,pages,files,actu,text", "acme,2,0,0,1", "dcsl,1,0,1,0"]);
    }
}
