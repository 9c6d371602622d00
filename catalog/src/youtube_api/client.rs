//! The single request primitive and the typed calls layered on top of it.

use crate::categories::Category;
use crate::config::Config;
use crate::youtube_api::{
    channels::ChannelListResponse,
    comment_threads::CommentThreadListResponse,
    error::{ApiErrorEnvelope, FetchError},
    search::SearchListResponse,
    videos::VideoListResponse,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::instrument;

/// The `part` values requested for full video resources.
pub const VIDEO_PARTS: &str = "snippet,contentDetails,statistics";
/// The `part` values requested for channel resources.
pub const CHANNEL_PARTS: &str = "snippet,statistics,brandingSettings";

/// Decodes a raw payload into one of the typed response structures.
///
/// A payload that doesn't have the expected shape is a
/// [`FetchErrorKind::Decode`](crate::youtube_api::FetchErrorKind::Decode) error.
pub fn decode<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, FetchError> {
    Ok(serde_json::from_value(payload)?)
}

/// Issues reads against named resources of the YouTube Data API.
///
/// [`fetch_resource`](Self::fetch_resource) is the only method an implementor
/// has to provide; the typed calls below build their query parameters and
/// decode the payload on top of it. Controllers are generic over this trait
/// so that tests can substitute a scripted implementation.
pub trait FetchResource: Send + Sync {
    /// Issues one GET against `resource` with the given query parameters.
    ///
    /// The API credential is added by the implementation. There are no
    /// retries: the call either completes once or fails once.
    fn fetch_resource(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> impl Future<Output = Result<serde_json::Value, FetchError>> + Send;

    /// Lists the most popular videos in a region, optionally within one category.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    fn list_most_popular_videos(
        &self,
        region_code: &str,
        category: &Category,
        max_results: u32,
    ) -> impl Future<Output = Result<VideoListResponse, FetchError>> + Send {
        let max_results = max_results.to_string();
        async move {
            let mut params = vec![
                ("part", VIDEO_PARTS),
                ("chart", "mostPopular"),
                ("regionCode", region_code),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(category_id) = category.filter() {
                params.push(("videoCategoryId", category_id));
            }
            decode(self.fetch_resource("videos", &params).await?)
        }
    }

    /// Fetches full video resources for the given ids.
    ///
    /// The API does not promise to return them in the requested order.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    fn list_videos_by_id(
        &self,
        video_ids: &[&str],
    ) -> impl Future<Output = Result<VideoListResponse, FetchError>> + Send {
        let ids = video_ids.join(",");
        async move {
            let params = [("part", VIDEO_PARTS), ("id", ids.as_str())];
            decode(self.fetch_resource("videos", &params).await?)
        }
    }

    /// Searches for videos matching a free-text query, in relevance order.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    fn search_videos(
        &self,
        query: &str,
        region_code: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<SearchListResponse, FetchError>> + Send {
        let max_results = max_results.to_string();
        async move {
            let params = [
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("regionCode", region_code),
                ("maxResults", max_results.as_str()),
            ];
            decode(self.fetch_resource("search", &params).await?)
        }
    }

    /// Lists a channel's most recent uploads, newest first.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    fn list_channel_uploads(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<SearchListResponse, FetchError>> + Send {
        let max_results = max_results.to_string();
        async move {
            let params = [
                ("part", "snippet"),
                ("channelId", channel_id),
                ("order", "date"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
            ];
            decode(self.fetch_resource("search", &params).await?)
        }
    }

    /// Fetches channel resources by id.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    fn list_channels(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = Result<ChannelListResponse, FetchError>> + Send {
        async move {
            let params = [("part", CHANNEL_PARTS), ("id", channel_id)];
            decode(self.fetch_resource("channels", &params).await?)
        }
    }

    /// Lists the top-level comment threads of a video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/commentThreads/list>
    fn list_comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<CommentThreadListResponse, FetchError>> + Send {
        let max_results = max_results.to_string();
        async move {
            let params = [
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", max_results.as_str()),
            ];
            decode(self.fetch_resource("commentThreads", &params).await?)
        }
    }
}

/// Client for the YouTube Data API v3, authenticated with a static API key.
///
/// Cloning is cheap: the HTTP connection pool and the credential are shared.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// Base endpoint; resource names are appended as path segments.
    base_url: Arc<str>,
    api_key: Arc<SecretString>,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Creates a client from the process configuration.
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            api_key: Arc::new(SecretString::from(
                config.api_key.expose_secret().to_owned(),
            )),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl FetchResource for YouTubeClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_resource(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, FetchError> {
        let url = format!("{}/{}", self.base_url, resource);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await
            // the request url carries the credential, so keep it out of the message
            .map_err(|e| FetchError::network(format!("GET {url}: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error.message)
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status.to_string()
                    } else {
                        body
                    }
                });
            tracing::warn!(resource, %status, %detail, "YouTube API request failed");
            return Err(FetchError::http_status(status.as_u16(), detail));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("read {resource} response: {}", e.without_url())))?;

        let payload: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::decode(format!("parse {resource} response as JSON: {e}")))?;

        tracing::trace!(resource, bytes = bytes.len(), "fetched resource");
        Ok(payload)
    }
}
