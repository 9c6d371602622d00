//! YouTube Videos API types.

use crate::youtube_api::types::{PageInfo, Thumbnails, null_as_default};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response structure for the `videos.list` API call.
///
/// Contains a list of [`Video`] resources that match the request criteria,
/// along with pagination information in [`PageInfo`].
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoListResponse {
    /// A list of videos that match the request criteria.
    ///
    /// When filtering by `id`, the order of this list is not guaranteed to
    /// match the order of the requested ids.
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Video>,
    #[serde(rename = "pageInfo")]
    #[serde(deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

/// A `video` resource represents a YouTube video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    /// The ID that YouTube uses to uniquely identify the video.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Basic details about the video, such as its title and channel.
    #[serde(deserialize_with = "null_as_default")]
    pub snippet: VideoSnippet,
    /// Contains statistics about the video.
    #[serde(deserialize_with = "null_as_default")]
    pub statistics: VideoStatistics,
    /// Information about the video content, including its length.
    #[serde(rename = "contentDetails")]
    #[serde(deserialize_with = "null_as_default")]
    pub content_details: VideoContentDetails,
}

/// Basic details about a video.
///
/// The `search.list` endpoint returns the same snippet shape for its results,
/// minus `categoryId`, so this type is shared with
/// [`crate::youtube_api::search::SearchResult`].
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSnippet {
    /// The date and time that the video was published.
    #[serde(rename = "publishedAt")]
    pub published_at: Option<Timestamp>,
    /// The ID that YouTube uses to uniquely identify the channel that the video was uploaded to.
    #[serde(rename = "channelId")]
    #[serde(deserialize_with = "null_as_default")]
    pub channel_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnails: Thumbnails,
    /// Channel title for the channel that the video belongs to.
    #[serde(rename = "channelTitle")]
    #[serde(deserialize_with = "null_as_default")]
    pub channel_title: String,
    /// The YouTube video category associated with the video.
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

/// Statistics about the video.
///
/// The API reports counters as decimal strings.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration, e.g. `PT15M33S`.
    pub duration: Option<String>,
}
