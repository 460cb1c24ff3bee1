//! Errors that abort building a site.
//!
//! Everything else found in an export (missing attributes, malformed dates,
//! unknown box types, dangling links) is logged and tolerated.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("export directory `{0}` does not exist")]
    MissingExportDir(PathBuf),

    #[error("IO error when reading `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{path}` is not well-formed XML")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
}

impl ParseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = ParseError::MissingExportDir(PathBuf::from("/nowhere/dcsl"));
        assert!(err.to_string().contains("/nowhere/dcsl"));

        let err = ParseError::io("export_en.xml", Error::new(ErrorKind::NotFound, "gone"));
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("export_en.xml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
