use crate::error::ConfigError;
use url::Url;

const PAGE_ID_LEN: usize = 32;

/// Normalize a page reference to a bare 32-hex-digit id.
///
/// Accepts a bare id (with or without hyphens) or a page URL whose last path
/// segment ends in the id, e.g. `https://www.notion.so/ws/Weekly-235337f9...`.
pub fn parse_page_ref(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    let invalid = || ConfigError::InvalidPageRef {
        value: value.to_string(),
    };

    let segment = if trimmed.contains("://") {
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        url.path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(str::to_string)
            .ok_or_else(invalid)?
    } else {
        let path = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
        path.rsplit('/')
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or_else(invalid)?
    };

    let compact: String = segment.chars().filter(|c| *c != '-').collect();
    let Some(start) = compact.len().checked_sub(PAGE_ID_LEN) else {
        return Err(invalid());
    };
    if !compact.is_char_boundary(start) {
        return Err(invalid());
    }
    let id = &compact[start..];
    if !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Ok(id.to_ascii_lowercase())
}
