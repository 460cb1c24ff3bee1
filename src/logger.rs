//! Logging with colored module prefixes.
//!
//! ```ignore
//! log!("parse"; "{} pages in {}", count, language);
//! debug!("links"; "unresolved {}", href);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Write one prefixed line to stderr.
///
/// Stdout stays reserved for command output (reports, JSON dumps).
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut out = stderr().lock();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Plain text when stderr has no color support or `--color never` is set.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let prefix = prefix.as_str();
    match module_lower {
        "parse" | "cache" => prefix
            .if_supports_color(Stream::Stderr, |p| p.style(Style::new().bright_blue().bold()))
            .to_string(),
        "report" | "dump" => prefix
            .if_supports_color(Stream::Stderr, |p| p.style(Style::new().bright_green().bold()))
            .to_string(),
        "error" => prefix
            .if_supports_color(Stream::Stderr, |p| p.style(Style::new().bright_red().bold()))
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stderr, |p| p.style(Style::new().bright_yellow().bold()))
            .to_string(),
    }
}
