//! YouTube Search API types.

use crate::youtube_api::types::{PageInfo, null_as_default};
use crate::youtube_api::videos::VideoSnippet;
use serde::{Deserialize, Serialize};

/// Response structure for the `search.list` API call.
///
/// The order of `items` is meaningful: it is the relevance (or date) ranking
/// chosen by the API for the request.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchListResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<SearchResult>,
    #[serde(rename = "pageInfo")]
    #[serde(deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

/// A search result points at a video, channel, or playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub id: SearchResultId,
    #[serde(deserialize_with = "null_as_default")]
    pub snippet: VideoSnippet,
}

/// Identifies the resource a [`SearchResult`] matched.
///
/// Only one of the id fields is set, depending on `kind`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResultId {
    /// `youtube#video`, `youtube#channel`, or `youtube#playlist`.
    pub kind: Option<String>,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
    #[serde(rename = "playlistId")]
    pub playlist_id: Option<String>,
}

impl SearchResult {
    /// The id of the matched video, or `None` if the result is not a video.
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl SearchListResponse {
    /// Video ids in the order the API ranked them.
    pub fn video_ids(&self) -> Vec<&str> {
        self.items.iter().filter_map(SearchResult::video_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn video_ids_skip_non_video_results() {
        let response: SearchListResponse = serde_json::from_value(serde_json::json!({
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "c" } },
                { "id": { "kind": "youtube#channel", "channelId": "UC1" } },
                { "id": { "kind": "youtube#video", "videoId": "a" } },
                { "id": { "kind": "youtube#video", "videoId": "" } },
            ]
        }))
        .unwrap();

        assert_eq!(response.video_ids(), vec!["c", "a"]);
    }
}
