//! YouTube CommentThreads API types.

use crate::youtube_api::types::{PageInfo, null_as_default};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response structure for the `commentThreads.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/commentThreads/list>
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentThreadListResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<CommentThreadItem>,
    #[serde(rename = "pageInfo")]
    #[serde(deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

/// A `commentThread` resource: a top-level comment and (optionally) its replies.
///
/// See: <https://developers.google.com/youtube/v3/docs/commentThreads#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentThreadItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    #[serde(deserialize_with = "null_as_default")]
    pub top_level_comment: Comment,
    #[serde(rename = "totalReplyCount")]
    pub total_reply_count: Option<u64>,
}

/// See: <https://developers.google.com/youtube/v3/docs/comments#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub snippet: CommentSnippet,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName")]
    #[serde(deserialize_with = "null_as_default")]
    pub author_display_name: String,
    #[serde(rename = "authorProfileImageUrl")]
    pub author_profile_image_url: Option<String>,
    /// The comment text as HTML, as it would be displayed on YouTube.
    #[serde(rename = "textDisplay")]
    #[serde(deserialize_with = "null_as_default")]
    pub text_display: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<Timestamp>,
    /// Unlike video statistics, this counter is a JSON number.
    #[serde(rename = "likeCount")]
    #[serde(deserialize_with = "null_as_default")]
    pub like_count: u64,
}
