use std::path::{Path, PathBuf};

use cyoa_core::AdventureMeta;
use cyoa_export::{ExportFormat, export_filename, write_export};

pub fn run(
    file: &Path,
    format: &str,
    output: Option<&Path>,
    meta: AdventureMeta,
) -> Result<(), String> {
    let format = format
        .parse::<ExportFormat>()
        .map_err(|e| e.to_string())?;
    let adventure = super::load(file)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export_filename(&meta.title, format)));

    write_export(&path, &adventure, &meta, format).map_err(|e| e.to_string())?;
    println!("  Exported to {}", path.display());

    Ok(())
}
