//! Jahia export parser.
//!
//! Reads a Jahia site export (one XML document per language plus the asset
//! tree) and builds a multilingual [`Site`]: a page tree whose pages carry
//! per-language contents, boxes and sidebars, with internal links rewritten
//! to final output paths.
//!
//! ```no_run
//! use jahiap::{ParseOptions, Report, Site};
//!
//! let site = Site::parse("exports/acme", &ParseOptions::default())?;
//! println!("{}", Report::new(&site));
//! # Ok::<(), jahiap::ParseError>(())
//! ```

pub mod logger;

pub mod cache;
pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod utils;

pub use dom::DomCache;
pub use error::ParseError;
pub use model::Site;
pub use parser::ParseOptions;
pub use report::Report;
