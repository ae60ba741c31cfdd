//! Export formats and derived file names.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// What an export contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// A self-contained playable HTML page.
    #[default]
    Html,
    /// The bare scenes mapping as pretty-printed JSON.
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// File name for an export: the title lowercased, every character that is
/// not alphanumeric replaced with `_`, then `_adventure.<ext>`.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_adventure.{}", format.extension())
}
