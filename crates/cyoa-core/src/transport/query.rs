use std::borrow::Cow;

use log::debug;

use crate::document::{Adventure, AdventureMeta};
use crate::error::{CoreError, CoreResult};

/// A document decoded from a share link, with its presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedAdventure {
    /// The scenes mapping from the `data` parameter.
    pub adventure: Adventure,
    /// Title, accent color, and spider flag.
    pub meta: AdventureMeta,
}

/// Encode a document as `data=…&color=…&title=…&spiders=0|1`.
pub fn encode_query(adventure: &Adventure, meta: &AdventureMeta) -> CoreResult<String> {
    let data = adventure.to_json()?;
    Ok(format!(
        "data={}&color={}&title={}&spiders={}",
        urlencoding::encode(&data),
        urlencoding::encode(&meta.accent_color),
        urlencoding::encode(&meta.title),
        if meta.spiders { "1" } else { "0" },
    ))
}

/// Append the encoded document to `base` as its query string.
pub fn share_link(base: &str, adventure: &Adventure, meta: &AdventureMeta) -> CoreResult<String> {
    let query = encode_query(adventure, meta)?;
    let separator = if base.contains('?') { '&' } else { '?' };
    Ok(format!("{base}{separator}{query}"))
}

/// Decode a query string or a full URL carrying one.
///
/// Anything up to the first `?` and after a `#` is ignored, `+` reads as a
/// space, and unknown parameters are skipped. Missing `color`, `title`, or
/// `spiders` fall back to defaults; a missing `data` parameter is an error.
pub fn decode_query(input: &str) -> CoreResult<SharedAdventure> {
    let query = input.split_once('#').map_or(input, |(q, _)| q);
    let query = query.split_once('?').map_or(query, |(_, q)| q);

    let mut data = None;
    let mut meta = AdventureMeta::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(raw)?;
        match key {
            "data" => data = Some(value),
            "color" if !value.is_empty() => meta.accent_color = value,
            "title" if !value.is_empty() => meta.title = value,
            "color" | "title" => {}
            "spiders" => meta.spiders = value == "1",
            other => debug!("ignoring query parameter \"{other}\""),
        }
    }

    let data = data.ok_or_else(|| CoreError::Decode("missing \"data\" parameter".to_string()))?;
    let adventure = Adventure::from_json(&data)?;
    Ok(SharedAdventure { adventure, meta })
}

fn decode_component(raw: &str) -> CoreResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .map_err(|e| CoreError::Decode(format!("bad URI encoding: {e}")))
}
