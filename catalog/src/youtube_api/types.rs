//! Shared types used by more than one YouTube API resource.

use serde::{Deserialize, Deserializer, Serialize};

/// Paging details for lists of resources.
///
/// Includes the total number of items available and the number of resources
/// returned in a single page response. We only ever read the first page, so
/// this is informational (it ends up in debug logs).
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}

/// A single thumbnail image.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// The set of thumbnails attached to a video, channel, or search result.
///
/// Which keys are present varies by resource and by upload, so every one of
/// them is optional.
///
/// See: <https://developers.google.com/youtube/v3/docs/thumbnails>
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// The URL of the largest thumbnail available, if any.
    pub fn best_url(&self) -> Option<&str> {
        [
            &self.maxres,
            &self.standard,
            &self.high,
            &self.medium,
            &self.default,
        ]
        .into_iter()
        .flatten()
        .map(|t| t.url.as_str())
        .find(|url| !url.is_empty())
    }
}

/// Reads an explicit JSON `null` the same way as an absent key.
///
/// `#[serde(default)]` only covers missing keys; the API also sends `null`
/// for fields it has nothing to report on.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parses one of the API's stringly-typed counters (`"12345"`).
///
/// Statistics can be hidden by the uploader, in which case the field is absent;
/// a malformed value is treated the same way rather than failing the whole
/// response.
pub(crate) fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_thumbnail_prefers_larger_sizes() {
        let thumbs: Thumbnails = serde_json::from_value(serde_json::json!({
            "default": { "url": "d.jpg", "width": 120, "height": 90 },
            "high": { "url": "h.jpg" },
        }))
        .unwrap();
        assert_eq!(thumbs.best_url(), Some("h.jpg"));

        assert_eq!(Thumbnails::default().best_url(), None);
    }

    #[test]
    fn counts_are_parsed_leniently() {
        assert_eq!(parse_count(Some("1500")), Some(1500));
        assert_eq!(parse_count(Some("n/a")), None);
        assert_eq!(parse_count(None), None);
    }
}
