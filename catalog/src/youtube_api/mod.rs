//! YouTube Data API v3 client library.
//!
//! Everything the catalog reads from YouTube goes through one primitive,
//! [`FetchResource::fetch_resource`]: a GET against a named resource
//! (`videos`, `search`, `channels`, `commentThreads`) with a flat list of
//! query parameters. [`YouTubeClient`] implements it over HTTP and appends the
//! configured API key to every request.
//!
//! # Resources
//!
//! | resource | used for | response type |
//! |---|---|---|
//! | `videos` | popular chart, full details by id | [`videos::VideoListResponse`] |
//! | `search` | free-text search, channel uploads | [`search::SearchListResponse`] |
//! | `channels` | channel metadata | [`channels::ChannelListResponse`] |
//! | `commentThreads` | top-level comments of a video | [`comment_threads::CommentThreadListResponse`] |
//!
//! The API omits fields freely (hidden statistics, missing thumbnails, ...),
//! so every response type defaults absent fields instead of failing to decode.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_catalog::categories::Category;
//! use youtube_catalog::config::Config;
//! use youtube_catalog::youtube_api::{FetchResource, YouTubeClient};
//!
//! # async fn example() -> eyre::Result<()> {
//! let config = Config::with_api_key("AIza...");
//! let client = YouTubeClient::new(&config, reqwest::Client::new());
//!
//! let popular = client
//!     .list_most_popular_videos("IN", &Category::All, 10)
//!     .await?;
//! for video in popular.items {
//!     println!("{}: {}", video.id, video.snippet.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod comment_threads;
pub mod error;
pub mod search;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::{FetchResource, YouTubeClient, decode};
pub use error::{FetchError, FetchErrorKind};
pub use types::{PageInfo, Thumbnails};

pub use channels::{Channel, ChannelListResponse};
pub use comment_threads::{CommentThreadItem, CommentThreadListResponse};
pub use search::{SearchListResponse, SearchResult};
pub use videos::{Video, VideoListResponse};
