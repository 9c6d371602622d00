//! Data aggregation and request orchestration for a YouTube-backed video catalog.
//!
//! Each view (feed, search, channel, video detail) has a controller that
//! combines one or more YouTube Data API calls into a view model and
//! publishes it as a [`ViewState`]. Responses to superseded requests are
//! dropped by a per-controller [`StaleGuard`], so the published state always
//! reflects the latest selection no matter the order responses arrive in.

pub mod catalog;
pub mod categories;
pub mod config;
pub mod controllers;
pub mod format;
pub mod model;
pub mod stale_guard;
pub mod trigger;
pub mod view_state;
pub mod youtube_api;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::Catalog;
pub use categories::{CATEGORIES, Category};
pub use config::{Config, ConfigError};
pub use model::{ChannelSummary, CommentThread, Item};
pub use stale_guard::{Generation, StaleGuard};
pub use view_state::{ErrorKind, ViewError, ViewState};
pub use youtube_api::{FetchError, FetchResource, YouTubeClient};
