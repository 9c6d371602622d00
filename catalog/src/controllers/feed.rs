//! The popular-videos feed, filtered by category.

use crate::categories::Category;
use crate::config::Config;
use crate::controllers::Controller;
use crate::model::Item;
use crate::stale_guard::{Generation, StaleGuard};
use crate::view_state::ViewState;
use crate::youtube_api::FetchResource;
use tokio::sync::watch;
use tracing::instrument;

pub struct FeedController<C> {
    client: C,
    guard: StaleGuard,
    region_code: String,
    max_results: u32,
    state: watch::Sender<ViewState<Vec<Item>>>,
}

impl<C: FetchResource + 'static> FeedController<C> {
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client,
            guard: StaleGuard::new(),
            region_code: config.region_code.clone(),
            max_results: config.feed_max_results,
            state: watch::Sender::new(ViewState::Idle),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Vec<Item>>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState<Vec<Item>> {
        self.state.borrow().clone()
    }

    /// Switches the feed to `category` and waits for it to load.
    pub async fn select_category(&self, category: Category) {
        let generation = self.begin();
        self.load(generation, category).await;
    }
}

impl<C: FetchResource + 'static> Controller for FeedController<C> {
    type Trigger = Category;

    fn begin(&self) -> Generation {
        let generation = self.guard.advance();
        self.state.send_replace(ViewState::Loading);
        generation
    }

    #[instrument(skip(self), fields(category = %category.id()))]
    async fn load(&self, generation: Generation, category: Category) {
        let result = self
            .client
            .list_most_popular_videos(&self.region_code, &category, self.max_results)
            .await
            .map(|response| response.items.into_iter().map(Item::from).collect::<Vec<_>>());

        match &result {
            Ok(items) => tracing::debug!(returned_items = items.len(), "fetched popular videos"),
            Err(e) => tracing::warn!(error = %e, "failed to fetch popular videos"),
        }

        self.guard.commit(generation, &self.state, result.into());
    }
}
