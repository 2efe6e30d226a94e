//! YouTube integration: turning operator-supplied channel URLs into canonical
//! channel ids, and fetching channel metadata.
//!
//! - `resolver`: URL normalization and classification. Canonical
//!   `/channel/<id>` URLs resolve locally; custom names, legacy usernames and
//!   `@handle` URLs go through a `ChannelSearch`.
//! - `client`: `YouTubeClient`, the Data API v3 implementation of
//!   `ChannelSearch` and `ChannelDirectory`.

pub mod client;
pub mod resolver;

use reqwest::StatusCode;
use std::future::Future;

/// Display metadata of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub thumbnail: String,
}

/// Failure of an external YouTube lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("YouTube API key is not configured")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to send request to {url}: {source}")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("YouTube API responded with error [{code}]: {message}")]
    ApiError { code: StatusCode, message: String },

    #[error("failed to parse YouTube API response: {0}")]
    Json(#[source] reqwest::Error),
}

/// Searches channels by free text.
pub trait ChannelSearch {
    /// Id of the best matching channel, `None` when nothing matched.
    fn search_channel(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<String>, LookupError>> + Send;
}

/// Looks up channel metadata by canonical id.
pub trait ChannelDirectory {
    fn channel_info(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<Option<ChannelInfo>, LookupError>> + Send;
}
