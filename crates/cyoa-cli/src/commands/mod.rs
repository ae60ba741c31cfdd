pub mod check;
pub mod export;
pub mod link;
pub mod new;
pub mod play;
pub mod store;

use std::path::Path;

use cyoa_core::transport::read_adventure_file;
use cyoa_core::{Adventure, AdventureMeta};

/// Read an adventure file, mapping errors to CLI messages.
fn load(path: &Path) -> Result<Adventure, String> {
    read_adventure_file(path).map_err(|e| format!("cannot load {}: {e}", path.display()))
}

/// Export metadata from command-line flags, with defaults for the rest.
pub fn meta(title: Option<String>, color: Option<String>, spiders: bool) -> AdventureMeta {
    let defaults = AdventureMeta::default();
    AdventureMeta {
        title: title.unwrap_or(defaults.title),
        accent_color: color.unwrap_or(defaults.accent_color),
        spiders,
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
