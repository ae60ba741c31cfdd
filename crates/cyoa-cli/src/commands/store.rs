use std::path::Path;

use cyoa_core::transport::{DirStorage, STORAGE_KEY, store_adventure};

pub fn run(file: &Path, dir: &Path) -> Result<(), String> {
    let adventure = super::load(file)?;
    std::fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {e}", dir.display()))?;

    let mut storage = DirStorage::new(dir);
    store_adventure(&mut storage, &adventure).map_err(|e| e.to_string())?;

    println!(
        "  Stored {} scene{} under '{STORAGE_KEY}' in {}",
        adventure.len(),
        super::plural(adventure.len()),
        dir.display()
    );
    Ok(())
}
