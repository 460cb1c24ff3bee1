//! Fingerprint of everything a parse reads.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::parser::ParseOptions;
use crate::parser::files::parse_files;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 16 hex chars
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Hash the export documents, the asset listing and the options that shape
/// output paths.
pub fn fingerprint(
    export_dir: &Path,
    site_name: &str,
    exports: &[(String, PathBuf)],
    options: &ParseOptions,
) -> io::Result<ContentHash> {
    let mut hasher = blake3::Hasher::new();

    for field in [
        site_name,
        options.primary_language.as_str(),
        options.root_path.as_str(),
        options.css_url.as_str(),
    ] {
        hasher.update(field.as_bytes());
        hasher.update(&[0]);
    }

    for (language, path) in exports {
        hasher.update(language.as_bytes());
        hasher.update(&hash_file(path)?.0);
    }

    for file in parse_files(export_dir, site_name) {
        hasher.update(file.full_path().to_string_lossy().as_bytes());
        hasher.update(&[0]);
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

fn hash_file(path: &Path) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn export(dir: &Path, body: &str) -> Vec<(String, PathBuf)> {
        let path = dir.join("export_en.xml");
        fs::write(&path, body).unwrap();
        vec![("en".to_string(), path)]
    }

    #[test]
    fn test_hex_round_trip() {
        let hash = ContentHash::new([7; 32]);
        assert_eq!(ContentHash::from_hex(&hash.to_hex()), Some(hash));
        assert_eq!(ContentHash::from_hex("abcd"), None);
        assert_eq!(hash.to_string().len(), 16);
    }

    #[test]
    fn test_fingerprint_tracks_inputs() {
        let dir = TempDir::new().unwrap();
        let options = ParseOptions::default();
        let exports = export(dir.path(), "<content/>");

        let first = fingerprint(dir.path(), "acme", &exports, &options).unwrap();
        let same = fingerprint(dir.path(), "acme", &exports, &options).unwrap();
        assert_eq!(first, same);

        let rooted = ParseOptions {
            root_path: "/acme".into(),
            ..ParseOptions::default()
        };
        assert_ne!(first, fingerprint(dir.path(), "acme", &exports, &rooted).unwrap());

        let exports = export(dir.path(), "<content><siteName/></content>");
        assert_ne!(first, fingerprint(dir.path(), "acme", &exports, &options).unwrap());
    }

    #[test]
    fn test_fingerprint_missing_document() {
        let dir = TempDir::new().unwrap();
        let exports = vec![("en".to_string(), dir.path().join("export_en.xml"))];
        assert!(fingerprint(dir.path(), "acme", &exports, &ParseOptions::default()).is_err());
    }
}
