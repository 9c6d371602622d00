//! View-model records built from API responses.
//!
//! These are what controllers publish; the `youtube_api` types never leave
//! the controllers. Conversions never fail: absent fields become empty
//! strings or `None`.

use crate::youtube_api::channels::Channel;
use crate::youtube_api::comment_threads::CommentThreadItem;
use crate::youtube_api::search::SearchResult;
use crate::youtube_api::types::parse_count;
use crate::youtube_api::videos::{Video, VideoSnippet};
use jiff::Timestamp;

/// A single video's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub category_id: Option<String>,
    pub published_at: Option<Timestamp>,
    pub thumbnail_url: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    /// ISO 8601 duration exactly as the API sent it; see [`crate::format::duration`].
    pub duration_raw: Option<String>,
}

impl Item {
    fn from_snippet(id: String, snippet: VideoSnippet) -> Self {
        Self {
            id,
            thumbnail_url: snippet.thumbnails.best_url().map(str::to_owned),
            title: snippet.title,
            description: snippet.description,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            category_id: snippet.category_id.filter(|id| !id.is_empty()),
            published_at: snippet.published_at,
            ..Self::default()
        }
    }
}

impl From<Video> for Item {
    fn from(video: Video) -> Self {
        let statistics = video.statistics;
        Self {
            view_count: parse_count(statistics.view_count.as_deref()),
            like_count: parse_count(statistics.like_count.as_deref()),
            comment_count: parse_count(statistics.comment_count.as_deref()),
            duration_raw: video.content_details.duration,
            ..Self::from_snippet(video.id, video.snippet)
        }
    }
}

/// Search results carry a snippet but no statistics or duration.
impl From<SearchResult> for Item {
    fn from(result: SearchResult) -> Self {
        let id = result.id.video_id.unwrap_or_default();
        Self::from_snippet(id, result.snippet)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    /// `None` when the channel hides it.
    pub subscriber_count: Option<u64>,
    pub video_count: Option<u64>,
    pub view_count: Option<u64>,
    pub description: String,
    pub banner_url: Option<String>,
    pub published_at: Option<Timestamp>,
}

impl From<Channel> for ChannelSummary {
    fn from(channel: Channel) -> Self {
        let statistics = channel.statistics;
        let subscriber_count = if statistics.hidden_subscriber_count {
            None
        } else {
            parse_count(statistics.subscriber_count.as_deref())
        };
        Self {
            id: channel.id,
            thumbnail_url: channel.snippet.thumbnails.best_url().map(str::to_owned),
            banner_url: channel.branding_settings.banner_url().map(str::to_owned),
            title: channel.snippet.title,
            description: channel.snippet.description,
            published_at: channel.snippet.published_at,
            subscriber_count,
            video_count: parse_count(statistics.video_count.as_deref()),
            view_count: parse_count(statistics.view_count.as_deref()),
        }
    }
}

/// A top-level comment on a video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    pub id: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    /// HTML, as displayed on YouTube.
    pub text: String,
    pub published_at: Option<Timestamp>,
    pub like_count: u64,
}

impl From<CommentThreadItem> for CommentThread {
    fn from(thread: CommentThreadItem) -> Self {
        let comment = thread.snippet.top_level_comment.snippet;
        Self {
            id: thread.id,
            author_name: comment.author_display_name,
            author_avatar_url: comment.author_profile_image_url.filter(|url| !url.is_empty()),
            text: comment.text_display,
            published_at: comment.published_at,
            like_count: comment.like_count,
        }
    }
}
