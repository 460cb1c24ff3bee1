//! Persisted parse results, reused when the inputs have not changed.

mod hash;
mod parsed;

pub use hash::{ContentHash, fingerprint};
pub use parsed::{cache_path, persist_site, restore_site};
