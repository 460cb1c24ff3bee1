//! Pluralization for report and log lines.

/// `""` for exactly one item, `"s"` otherwise.
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `"es"` suffix, for nouns like `box`.
#[inline]
pub fn plural_es(n: usize) -> &'static str {
    if n == 1 { "" } else { "es" }
}

/// `plural_count(3, "page")` -> `"3 pages"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
