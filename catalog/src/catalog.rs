//! Application state shared by every view.
//!
//! A [`Catalog`] is created once at startup. It owns one controller per view
//! and the trigger channels that drive them; the presentation layer changes
//! the current selection through its methods and observes results through the
//! controllers' `watch` receivers.

use crate::categories::Category;
use crate::config::Config;
use crate::controllers::{ChannelController, FeedController, SearchController, VideoDetailController};
use crate::trigger::{TriggerSlot, publish_trigger, spawn_trigger_loop};
use crate::youtube_api::FetchResource;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Catalog<C> {
    feed: Arc<FeedController<C>>,
    search: Arc<SearchController<C>>,
    channel: Arc<ChannelController<C>>,
    video: Arc<VideoDetailController<C>>,
    category: TriggerSlot<Category>,
    query: TriggerSlot<String>,
    channel_id: TriggerSlot<String>,
    video_id: TriggerSlot<String>,
    loops: Vec<JoinHandle<()>>,
}

impl<C: FetchResource + Clone + 'static> Catalog<C> {
    /// Builds every controller around `client` and starts their trigger loops.
    ///
    /// Must be called from within a tokio runtime. Nothing is fetched until a
    /// selection is made.
    pub fn start(client: C, config: &Config) -> Self {
        let feed = Arc::new(FeedController::new(client.clone(), config));
        let search = Arc::new(SearchController::new(client.clone(), config));
        let channel = Arc::new(ChannelController::new(client.clone(), config));
        let video = Arc::new(VideoDetailController::new(client, config));

        let (category, category_rx) = watch::channel(None);
        let (query, query_rx) = watch::channel(None);
        let (channel_id, channel_id_rx) = watch::channel(None);
        let (video_id, video_id_rx) = watch::channel(None);

        let loops = vec![
            spawn_trigger_loop(Arc::clone(&feed), category_rx),
            spawn_trigger_loop(Arc::clone(&search), query_rx),
            spawn_trigger_loop(Arc::clone(&channel), channel_id_rx),
            spawn_trigger_loop(Arc::clone(&video), video_id_rx),
        ];
        tracing::debug!(region_code = %config.region_code, "catalog started");

        Self {
            feed,
            search,
            channel,
            video,
            category,
            query,
            channel_id,
            video_id,
            loops,
        }
    }

    /// Switches the feed to `category`.
    ///
    /// The feed is `Loading` by the time this returns, and nothing fetched
    /// for an earlier category can reach it anymore. Re-selecting the current
    /// category does nothing; returns whether a reload was triggered.
    pub fn select_category(&self, category: Category) -> bool {
        publish_trigger(&*self.feed, &self.category, category)
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.category
            .borrow()
            .as_ref()
            .map(|(_, category)| category.clone())
    }

    /// Runs a new search. Repeating the current query does nothing.
    pub fn search(&self, query: impl Into<String>) -> bool {
        publish_trigger(&*self.search, &self.query, query.into())
    }

    pub fn open_channel(&self, channel_id: impl Into<String>) -> bool {
        publish_trigger(&*self.channel, &self.channel_id, channel_id.into())
    }

    pub fn open_video(&self, video_id: impl Into<String>) -> bool {
        publish_trigger(&*self.video, &self.video_id, video_id.into())
    }

    /// `true` while any view has a fetch in flight.
    pub fn is_loading(&self) -> bool {
        self.feed.state().is_loading()
            || self.search.state().is_loading()
            || self.channel.state().is_loading()
            || self.video.is_loading()
    }

    pub fn feed(&self) -> &FeedController<C> {
        &self.feed
    }

    pub fn search_results(&self) -> &SearchController<C> {
        &self.search
    }

    pub fn channel(&self) -> &ChannelController<C> {
        &self.channel
    }

    pub fn video(&self) -> &VideoDetailController<C> {
        &self.video
    }

    /// Stops accepting triggers and waits for the trigger loops to exit.
    ///
    /// Loads that were already dispatched may still complete afterwards;
    /// their results land in controllers nobody is watching anymore.
    pub async fn shutdown(self) {
        let Self {
            category,
            query,
            channel_id,
            video_id,
            loops,
            ..
        } = self;
        drop((category, query, channel_id, video_id));
        for handle in loops {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "trigger loop did not exit cleanly");
            }
        }
        tracing::debug!("catalog shut down");
    }
}
