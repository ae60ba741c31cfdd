//! Moving adventure documents across process boundaries.
//!
//! Every transport carries the same bare scenes mapping:
//!
//! - a query string (`data=…&color=…&title=…&spiders=…`), see [`query`],
//! - a key/value store under [`STORAGE_KEY`], see [`storage`],
//! - a JSON file such as a static `scenes.json`, see [`read_adventure_file`].
//!
//! The standalone HTML export embeds the same JSON as a script literal; it
//! lives in the export crate.

/// Query-string encoding for share links.
pub mod query;
/// Key/value storage backends.
pub mod storage;

use std::path::Path;

use log::debug;

use crate::document::Adventure;
use crate::error::CoreResult;

pub use query::{SharedAdventure, decode_query, encode_query, share_link};
pub use storage::{
    DirStorage, MemoryStorage, STORAGE_KEY, Storage, load_stored_adventure, store_adventure,
};

/// Read a JSON scenes mapping from a file such as `scenes.json`.
pub fn read_adventure_file(path: &Path) -> CoreResult<Adventure> {
    let json = std::fs::read_to_string(path)?;
    let adventure = Adventure::from_json(&json)?;
    debug!(
        "loaded {} scene(s) from {}",
        adventure.len(),
        path.display()
    );
    Ok(adventure)
}

/// Write a document as indented JSON.
pub fn write_adventure_file(path: &Path, adventure: &Adventure) -> CoreResult<()> {
    let mut json = adventure.to_json_pretty()?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}
