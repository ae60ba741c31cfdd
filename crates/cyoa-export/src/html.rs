//! Standalone HTML export.

use cyoa_core::{Adventure, AdventureMeta};
use log::debug;

use crate::error::ExportResult;
use crate::script::{rules_script, script_literal};

const PLAYER_SCRIPT: &str = include_str!("player.js");

const STYLE: &str = "\
    :root { --accent: #61dafb; }
    body { margin: 0; min-height: 100vh; background: #000; color: #fff; font-family: sans-serif; display: flex; justify-content: center; align-items: center; }
    #app { max-width: 42rem; padding: 2.5rem; }
    .text { font-size: 1.5rem; line-height: 2; white-space: pre-line; }
    .error { color: var(--accent); }
    .choices { display: flex; flex-wrap: wrap; gap: 1.25rem; margin-top: 2.5rem; }
    button { font-size: 1.1rem; color: #fff; background: transparent; border: 1px solid var(--accent); border-radius: 4px; padding: 0.6rem 1.25rem; cursor: pointer; }
    button:hover:enabled { background: var(--accent); color: #000; }
    button:disabled { opacity: 0.4; cursor: default; }
    .health p { margin: 0.5rem 0 0.25rem; }
    .bar { height: 0.6rem; background: #333; border-radius: 3px; }
    .fill { height: 100%; background: var(--accent); border-radius: 3px; }
    .log { margin-top: 1.5rem; max-height: 12rem; overflow-y: auto; font-family: monospace; }
    .spiders { position: fixed; inset: 0; pointer-events: none; }
    .spiders span { position: absolute; left: 0; top: 0; font-size: 1.5rem; }
";

/// Escape text for an HTML element body.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// A single self-contained HTML page that plays `adventure`.
///
/// The document and its metadata are inlined as the `SCENE_DATA`,
/// `ACCENT_COLOR`, `TAB_TITLE` and `SPIDERS_ENABLED` script constants. The
/// page loads nothing over the network.
pub fn render_html(adventure: &Adventure, meta: &AdventureMeta) -> ExportResult<String> {
    debug!(
        "rendering HTML export \"{}\" ({} scene(s))",
        meta.title,
        adventure.len()
    );

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", escape_html(&meta.title)));
    html.push_str("  <style>\n");
    html.push_str(STYLE);
    html.push_str("  </style>\n</head>\n<body>\n<main id=\"app\"></main>\n<script>\n");
    html.push_str(&format!("const SCENE_DATA = {};\n", script_literal(adventure)?));
    html.push_str(&format!(
        "const ACCENT_COLOR = {};\n",
        script_literal(&meta.accent_color)?
    ));
    html.push_str(&format!("const TAB_TITLE = {};\n", script_literal(&meta.title)?));
    html.push_str(&format!("const SPIDERS_ENABLED = {};\n", meta.spiders));
    html.push_str(&rules_script()?);
    html.push_str(PLAYER_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}
