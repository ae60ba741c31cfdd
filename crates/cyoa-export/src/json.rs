//! Data-only export.

use cyoa_core::Adventure;

use crate::error::ExportResult;

/// The bare scenes mapping, pretty-printed, with a trailing newline.
///
/// The output is readable by `Adventure::from_json` and by the static
/// `scenes.json` loader.
pub fn render_json(adventure: &Adventure) -> ExportResult<String> {
    let mut out = serde_json::to_string_pretty(adventure)?;
    out.push('\n');
    Ok(out)
}
