use crate::youtube::{ChannelDirectory, ChannelInfo, ChannelSearch, LookupError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Client for the two YouTube Data API v3 endpoints the admin surface needs.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// Base URL of the API, without trailing slash.
    base_url: String,
    /// Requests fail with `LookupError::MissingApiKey` while unset.
    api_key: Option<String>,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    #[serde(rename = "channelId")]
    channel_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    snippet: ChannelSnippet,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl YouTubeClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LookupError::Client)?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            http_client,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let key = self.api_key.as_deref().ok_or(LookupError::MissingApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("key", key)])
            .send()
            .await
            .map_err(|source| LookupError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::ApiError {
                code: status,
                message,
            });
        }

        response.json::<T>().await.map_err(LookupError::Json)
    }
}

impl ChannelSearch for YouTubeClient {
    async fn search_channel(&self, query: &str) -> Result<Option<String>, LookupError> {
        let response: SearchResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "channel"),
                    ("maxResults", "1"),
                    ("fields", "items(snippet/channelId)"),
                ],
            )
            .await?;
        Ok(response
            .items
            .into_iter()
            .next()
            .map(|item| item.snippet.channel_id))
    }
}

impl ChannelDirectory for YouTubeClient {
    async fn channel_info(&self, channel_id: &str) -> Result<Option<ChannelInfo>, LookupError> {
        let response: ChannelsResponse = self
            .get_json(
                "channels",
                &[
                    ("part", "snippet"),
                    ("id", channel_id),
                    ("fields", "items(snippet(title,thumbnails))"),
                ],
            )
            .await?;
        Ok(response.items.into_iter().next().map(|item| {
            let thumbnails = item.snippet.thumbnails;
            ChannelInfo {
                title: item.snippet.title,
                thumbnail: thumbnails
                    .high
                    .or(thumbnails.default)
                    .map(|t| t.url)
                    .unwrap_or_default(),
            }
        }))
    }
}
