//! The channel page: metadata plus recent uploads split into shorts and videos.

use crate::config::Config;
use crate::controllers::Controller;
use crate::model::{ChannelSummary, Item};
use crate::stale_guard::{Generation, StaleGuard};
use crate::view_state::{ViewError, ViewState};
use crate::youtube_api::FetchResource;
use tokio::sync::watch;
use tracing::instrument;

/// Which tab of the channel page an upload belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Short,
    Regular,
}

impl Classification {
    /// Guesses from the title and description whether `item` is a short.
    ///
    /// The API has no "is short" flag, so this is a text heuristic: a title
    /// containing "short" or a description carrying the `#shorts` tag, both
    /// compared case-insensitively.
    pub fn of(item: &Item) -> Self {
        let title = item.title.to_lowercase();
        let description = item.description.to_lowercase();
        if title.contains("short") || description.contains("#shorts") {
            Classification::Short
        } else {
            Classification::Regular
        }
    }
}

/// A channel's uploads, partitioned by [`Classification`].
///
/// Both lists keep the relative order of the source list, and every source
/// item is in exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uploads {
    pub shorts: Vec<Item>,
    pub regular: Vec<Item>,
}

impl Uploads {
    pub fn partition(items: Vec<Item>) -> Self {
        let (shorts, regular) = items
            .into_iter()
            .partition(|item| Classification::of(item) == Classification::Short);
        Self { shorts, regular }
    }

    pub fn len(&self) -> usize {
        self.shorts.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the channel page shows.
///
/// Metadata and uploads are fetched independently, so each carries its own
/// outcome: a page with a banner but no uploads (or the reverse) is still a
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPage {
    pub channel: Result<ChannelSummary, ViewError>,
    pub uploads: Result<Uploads, ViewError>,
}

impl ChannelPage {
    /// `true` if at least one of the two branches failed.
    pub fn is_partial(&self) -> bool {
        self.channel.is_err() || self.uploads.is_err()
    }
}

/// Looks up one channel by id. An empty result is a `NotFound` error.
pub(crate) async fn fetch_channel_summary<C: FetchResource>(
    client: &C,
    channel_id: &str,
) -> Result<ChannelSummary, ViewError> {
    let response = client.list_channels(channel_id).await?;
    response
        .items
        .into_iter()
        .next()
        .map(ChannelSummary::from)
        .ok_or_else(|| ViewError::not_found("channel", channel_id))
}

pub struct ChannelController<C> {
    client: C,
    guard: StaleGuard,
    max_results: u32,
    state: watch::Sender<ViewState<ChannelPage>>,
}

impl<C: FetchResource + 'static> ChannelController<C> {
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client,
            guard: StaleGuard::new(),
            max_results: config.channel_max_results,
            state: watch::Sender::new(ViewState::Idle),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<ChannelPage>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState<ChannelPage> {
        self.state.borrow().clone()
    }

    /// Opens the page for `channel_id` and waits for both branches.
    pub async fn open(&self, channel_id: impl Into<String>) {
        let generation = self.begin();
        self.load(generation, channel_id.into()).await;
    }

    async fn fetch_uploads(&self, channel_id: &str) -> Result<Uploads, ViewError> {
        let response = self
            .client
            .list_channel_uploads(channel_id, self.max_results)
            .await?;
        let items = response
            .items
            .into_iter()
            .filter(|result| result.video_id().is_some())
            .map(Item::from)
            .collect();
        Ok(Uploads::partition(items))
    }
}

impl<C: FetchResource + 'static> Controller for ChannelController<C> {
    type Trigger = String;

    fn begin(&self) -> Generation {
        let generation = self.guard.advance();
        self.state.send_replace(ViewState::Loading);
        generation
    }

    #[instrument(skip(self))]
    async fn load(&self, generation: Generation, channel_id: String) {
        let (channel, uploads) = tokio::join!(
            fetch_channel_summary(&self.client, &channel_id),
            self.fetch_uploads(&channel_id),
        );

        if let Err(e) = &channel {
            tracing::warn!(error = %e, "failed to fetch channel metadata");
        }
        match &uploads {
            Ok(uploads) => tracing::debug!(
                shorts = uploads.shorts.len(),
                regular = uploads.regular.len(),
                "fetched channel uploads"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to fetch channel uploads"),
        }

        let page = ChannelPage { channel, uploads };
        self.guard
            .commit(generation, &self.state, ViewState::Ready(page));
    }
}
