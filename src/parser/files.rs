//! Asset list of the export.

use std::path::Path;

use jwalk::WalkDir;

use crate::debug;
use crate::model::File;

/// Names the export generates for image previews; never migrated.
const THUMBNAILS: &[&str] = &["thumbnail", "thumbnail2"];

/// Every file under `<base>/content/sites/<site>/files`, thumbnails excluded.
pub fn parse_files(base_path: &Path, site_name: &str) -> Vec<File> {
    let root = base_path
        .join("content")
        .join("sites")
        .join(site_name)
        .join("files");

    if !root.is_dir() {
        debug!("parse"; "no asset directory at {}", root.display());
        return Vec::new();
    }

    WalkDir::new(&root)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if THUMBNAILS.contains(&name.as_str()) {
                return None;
            }
            Some(File::new(name, e.parent_path().to_path_buf()))
        })
        .collect()
}
