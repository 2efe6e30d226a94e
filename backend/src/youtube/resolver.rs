use crate::youtube::{ChannelSearch, LookupError};
use log::info;

/// What a channel URL points to once classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// A canonical channel id, usable as is.
    Id(String),
    /// A custom name, legacy username or `@handle` that must be searched.
    Search(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no channel found for {0:?}")]
    NotFound(String),

    #[error("unsupported channel URL format: {0}")]
    UnsupportedFormat(String),

    #[error("channel lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// Drops the query string, percent-decodes and strips one trailing `/`.
pub fn normalize(url: &str) -> String {
    let without_query = url.trim().split('?').next().unwrap_or_default();
    // Invalid UTF-8 after decoding: keep the raw text and let classification decide.
    let decoded = urlencoding::decode(without_query)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| without_query.to_string());
    match decoded.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => decoded,
    }
}

/// First path segment following `marker`, if `marker` occurs in `url`.
fn segment_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    let idx = url.find(marker)?;
    url[idx + marker.len()..].split('/').next()
}

pub fn classify(url: &str) -> Result<ChannelRef, ResolveError> {
    let normalized = normalize(url);

    if let Some(id) = segment_after(&normalized, "/channel/") {
        if id.is_empty() {
            return Err(ResolveError::UnsupportedFormat(url.to_string()));
        }
        return Ok(ChannelRef::Id(id.to_string()));
    }

    for marker in ["/c/", "/user/"] {
        if let Some(name) = segment_after(&normalized, marker).filter(|n| !n.is_empty()) {
            return Ok(ChannelRef::Search(name.to_string()));
        }
    }

    if let Some(handle) = normalized
        .split('/')
        .find(|segment| segment.len() > 1 && segment.starts_with('@'))
    {
        return Ok(ChannelRef::Search(handle.to_string()));
    }

    Err(ResolveError::UnsupportedFormat(url.to_string()))
}

/// Resolves any supported channel URL to its canonical channel id.
///
/// Canonical `/channel/<id>` URLs never reach `search`; every other supported
/// shape triggers exactly one search, whose top result is taken.
pub async fn resolve_channel_id<S: ChannelSearch>(
    search: &S,
    url: &str,
) -> Result<String, ResolveError> {
    match classify(url)? {
        ChannelRef::Id(id) => Ok(id),
        ChannelRef::Search(query) => {
            info!("Searching channel id for {:?}", query);
            search
                .search_channel(&query)
                .await?
                .ok_or(ResolveError::NotFound(query))
        }
    }
}
