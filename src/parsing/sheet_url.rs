use std::sync::LazyLock;

use regex::Regex;

static URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").expect("spreadsheet url regex is valid")
});

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{20,}$").expect("spreadsheet id regex is valid"));

/// Accepts either the full docs.google.com URL people copy out of the browser
/// or the bare spreadsheet id, and returns the id.
pub fn spreadsheet_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if let Some(caps) = URL_ID.captures(s) {
        return Ok(caps[1].to_string());
    }

    if BARE_ID.is_match(s) {
        return Ok(s.to_string());
    }

    Err(format!(
        "Could not get a spreadsheet id out of {:?}. Expected a docs.google.com/spreadsheets/d/... URL or the bare id.",
        s
    ))
}
