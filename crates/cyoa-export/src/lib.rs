//! Exporting adventures.
//!
//! An adventure leaves the editor as one of two files: a self-contained HTML
//! page that plays it (see [`render_html`]), or the bare scenes mapping as
//! JSON (see [`render_json`]). [`export_filename`] derives the file name from
//! the adventure title.

/// Error types for exporting.
pub mod error;
/// Export formats and file names.
pub mod filename;
/// Standalone HTML export.
pub mod html;
/// Data-only JSON export.
pub mod json;
/// Script literals and the generated rules prelude.
pub mod script;

use std::path::Path;

use cyoa_core::{Adventure, AdventureMeta};
use log::info;

pub use error::{ExportError, ExportResult};
pub use filename::{ExportFormat, export_filename};
pub use html::render_html;
pub use json::render_json;
pub use script::{control_token_url, script_literal};

/// Render `adventure` in `format`.
pub fn render(
    adventure: &Adventure,
    meta: &AdventureMeta,
    format: ExportFormat,
) -> ExportResult<String> {
    match format {
        ExportFormat::Html => render_html(adventure, meta),
        ExportFormat::Json => render_json(adventure),
    }
}

/// Render `adventure` and write it to `path`.
pub fn write_export(
    path: &Path,
    adventure: &Adventure,
    meta: &AdventureMeta,
    format: ExportFormat,
) -> ExportResult<()> {
    let content = render(adventure, meta, format)?;
    std::fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("exported {format} to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cyoa_core::Scene;

    #[test]
    fn write_export_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let meta = AdventureMeta::default();
        let path = dir.path().join(export_filename(&meta.title, ExportFormat::Json));
        let adventure = Adventure::new().with_scene("start", Scene::new("Hi"));

        write_export(&path, &adventure, &meta, ExportFormat::Json).unwrap();

        assert!(path.ends_with("my_adventure_adventure.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(Adventure::from_json(&written).unwrap(), adventure);
    }

    #[test]
    fn write_export_reports_bad_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.html");
        let err = write_export(
            &path,
            &Adventure::new(),
            &AdventureMeta::default(),
            ExportFormat::Html,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
