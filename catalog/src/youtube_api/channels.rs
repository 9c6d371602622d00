//! YouTube Channels API types.

use crate::youtube_api::types::{PageInfo, Thumbnails, null_as_default};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response structure for the `channels.list` API call.
///
/// Contains a list of [`Channel`] resources that match the request criteria,
/// along with pagination information in [`PageInfo`].
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelListResponse {
    /// A list of channels that match the request criteria.
    ///
    /// Empty (or absent) when no channel has the requested id.
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Channel>,
    #[serde(rename = "pageInfo")]
    #[serde(deserialize_with = "null_as_default")]
    pub page_info: PageInfo,
}

/// A `channel` resource contains information about a YouTube channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Contains basic details about the channel.
    #[serde(deserialize_with = "null_as_default")]
    pub snippet: ChannelSnippet,
    #[serde(deserialize_with = "null_as_default")]
    pub statistics: ChannelStatistics,
    #[serde(rename = "brandingSettings")]
    #[serde(deserialize_with = "null_as_default")]
    pub branding_settings: BrandingSettings,
}

/// The snippet object contains basic details about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSnippet {
    /// The channel's title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// The channel's description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnails: Thumbnails,
    /// The date and time that the channel was created.
    #[serde(rename = "publishedAt")]
    pub published_at: Option<Timestamp>,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// Absent when the channel hides its subscriber count.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "hiddenSubscriberCount")]
    #[serde(deserialize_with = "null_as_default")]
    pub hidden_subscriber_count: bool,
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#brandingSettings>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingSettings {
    pub image: Option<BrandingImage>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingImage {
    /// The URL for the banner image shown on the channel page.
    #[serde(rename = "bannerExternalUrl")]
    pub banner_external_url: Option<String>,
}

impl BrandingSettings {
    pub fn banner_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(|image| image.banner_external_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_read_as_absent() {
        let response: ChannelListResponse = serde_json::from_value(serde_json::json!({
            "items": [{
                "id": "UC1",
                "snippet": { "title": "Channel", "description": null },
                "statistics": { "hiddenSubscriberCount": null, "videoCount": "3" },
                "brandingSettings": null
            }]
        }))
        .unwrap();

        let channel = &response.items[0];
        assert_eq!(channel.snippet.description, "");
        assert!(!channel.statistics.hidden_subscriber_count);
        assert_eq!(channel.statistics.video_count.as_deref(), Some("3"));
        assert_eq!(channel.branding_settings.banner_url(), None);
    }
}
