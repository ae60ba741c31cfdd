use std::path::Path;

use cyoa_core::starter_adventure;
use cyoa_core::transport::write_adventure_file;

pub fn run(file: &Path, force: bool) -> Result<(), String> {
    if file.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            file.display()
        ));
    }

    let adventure = starter_adventure();
    write_adventure_file(file, &adventure)
        .map_err(|e| format!("cannot write {}: {e}", file.display()))?;

    println!(
        "  Created {} with {} scene{}",
        file.display(),
        adventure.len(),
        super::plural(adventure.len())
    );

    Ok(())
}
