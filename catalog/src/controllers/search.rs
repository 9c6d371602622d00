//! Free-text search: resolve a query to ranked ids, then fetch full details.
//!
//! `search.list` returns ids in ranking order but only snippet data, so a
//! second `videos.list` call fetches statistics and durations. That second
//! call returns items in an arbitrary order; [`join_in_order`] puts them back
//! into ranking order.

use crate::config::Config;
use crate::controllers::Controller;
use crate::model::Item;
use crate::stale_guard::{Generation, StaleGuard};
use crate::view_state::ViewState;
use crate::youtube_api::{FetchError, FetchResource, Video};
use std::collections::HashMap;
use tokio::sync::watch;
use tracing::instrument;

pub struct SearchController<C> {
    client: C,
    guard: StaleGuard,
    region_code: String,
    max_results: u32,
    state: watch::Sender<ViewState<Vec<Item>>>,
}

/// Projects `ranked_ids` through the fetched videos.
///
/// Ids with no matching video are dropped; the rest keep their relative
/// order. A repeated id yields its video only once, at its first position.
pub fn join_in_order(ranked_ids: &[&str], videos: Vec<Video>) -> Vec<Item> {
    let mut by_id: HashMap<String, Video> = videos
        .into_iter()
        .map(|video| (video.id.clone(), video))
        .collect();
    ranked_ids
        .iter()
        .filter_map(|id| by_id.remove(*id))
        .map(Item::from)
        .collect()
}

impl<C: FetchResource + 'static> SearchController<C> {
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client,
            guard: StaleGuard::new(),
            region_code: config.region_code.clone(),
            max_results: config.search_max_results,
            state: watch::Sender::new(ViewState::Idle),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Vec<Item>>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState<Vec<Item>> {
        self.state.borrow().clone()
    }

    /// Runs `query` and waits for its results.
    pub async fn search(&self, query: impl Into<String>) {
        let generation = self.begin();
        self.load(generation, query.into()).await;
    }

    /// Both phases, or `None` if the query was superseded between them.
    async fn run(&self, generation: Generation, query: &str) -> Option<Result<Vec<Item>, FetchError>> {
        let hits = match self
            .client
            .search_videos(query, &self.region_code, self.max_results)
            .await
        {
            Ok(hits) => hits,
            Err(e) => return Some(Err(e)),
        };

        if !self.guard.is_current(generation) {
            tracing::debug!(%generation, "query superseded before fetching details");
            return None;
        }

        let ranked_ids = hits.video_ids();
        tracing::debug!(returned_ids = ranked_ids.len(), "resolved search query");
        if ranked_ids.is_empty() {
            return Some(Ok(Vec::new()));
        }

        let details = match self.client.list_videos_by_id(&ranked_ids).await {
            Ok(details) => details,
            Err(e) => return Some(Err(e)),
        };
        let items = join_in_order(&ranked_ids, details.items);
        if items.len() < ranked_ids.len() {
            tracing::debug!(
                requested = ranked_ids.len(),
                returned = items.len(),
                "some search hits had no video details"
            );
        }
        Some(Ok(items))
    }
}

impl<C: FetchResource + 'static> Controller for SearchController<C> {
    type Trigger = String;

    fn begin(&self) -> Generation {
        let generation = self.guard.advance();
        self.state.send_replace(ViewState::Loading);
        generation
    }

    #[instrument(skip(self))]
    async fn load(&self, generation: Generation, query: String) {
        let query = query.trim();
        if query.is_empty() {
            self.guard
                .commit(generation, &self.state, ViewState::Ready(Vec::new()));
            return;
        }

        let Some(result) = self.run(generation, query).await else {
            return;
        };
        if let Err(e) = &result {
            tracing::warn!(error = %e, "search failed");
        }
        self.guard.commit(generation, &self.state, result.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, list, search_hit_json, video_json};
    use crate::view_state::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn ids(state: &ViewState<Vec<Item>>) -> Vec<&str> {
        state
            .ready()
            .map(|items| items.iter().map(|i| i.id.as_str()).collect())
            .unwrap_or_default()
    }

    fn videos(ids: &[&str]) -> Vec<Video> {
        ids.iter()
            .map(|id| serde_json::from_value(video_json(id, id)).unwrap())
            .collect()
    }

    #[test]
    fn join_restores_ranking_order() {
        let joined = join_in_order(&["c", "a", "b"], videos(&["a", "b", "c"]));
        let ids: Vec<_> = joined.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn join_drops_missing_ids_without_reordering() {
        let joined = join_in_order(&["c", "x", "a", "b"], videos(&["b", "a", "c"]));
        let ids: Vec<_> = joined.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn join_ignores_unrequested_videos() {
        let joined = join_in_order(&["a"], videos(&["z", "a"]));
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].id, "a");
    }

    #[tokio::test]
    async fn two_phase_search_keeps_phase_one_order() {
        let api = FakeApi::default();
        api.respond(
            "search",
            &[("q", "lofi")],
            Ok(list(vec![
                search_hit_json("c", "C"),
                search_hit_json("a", "A"),
                search_hit_json("b", "B"),
            ])),
        );
        api.respond(
            "videos",
            &[("id", "c,a,b")],
            Ok(list(vec![
                video_json("a", "A"),
                video_json("b", "B"),
                video_json("c", "C"),
            ])),
        );
        let search = SearchController::new(api.clone(), &Config::with_api_key("k"));

        search.search("lofi").await;

        assert_eq!(ids(&search.state()), vec!["c", "a", "b"]);
        let first = &api.calls()[0];
        assert_eq!(first.param("type"), Some("video"));
        assert_eq!(first.param("maxResults"), Some("20"));
    }

    #[tokio::test]
    async fn details_failure_fails_the_whole_search() {
        let api = FakeApi::default();
        api.respond("search", &[], Ok(list(vec![search_hit_json("a", "A")])));
        api.respond("videos", &[], Err(FetchError::http_status(500, "backend error")));
        let search = SearchController::new(api, &Config::with_api_key("k"));

        search.search("anything").await;

        assert_eq!(search.state().error().unwrap().kind, ErrorKind::HttpStatus);
    }

    #[tokio::test]
    async fn search_failure_skips_details() {
        let api = FakeApi::default();
        api.respond("search", &[], Err(FetchError::network("reset")));
        let search = SearchController::new(api.clone(), &Config::with_api_key("k"));

        search.search("anything").await;

        assert_eq!(search.state().error().unwrap().kind, ErrorKind::Network);
        assert_eq!(api.calls_to("videos"), 0);
    }

    #[tokio::test]
    async fn no_hits_is_an_empty_result() {
        let api = FakeApi::default();
        api.respond("search", &[], Ok(list(vec![])));
        let search = SearchController::new(api.clone(), &Config::with_api_key("k"));

        search.search("zzzzqqq").await;

        assert_eq!(search.state(), ViewState::Ready(vec![]));
        assert_eq!(api.calls_to("videos"), 0);
    }

    #[tokio::test]
    async fn blank_query_does_not_hit_the_api() {
        let api = FakeApi::default();
        let search = SearchController::new(api.clone(), &Config::with_api_key("k"));

        search.search("   ").await;

        assert_eq!(search.state(), ViewState::Ready(vec![]));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn superseded_query_never_reaches_state() {
        let api = FakeApi::default();
        let lofi_hits = api.respond_gated(
            "search",
            &[("q", "lofi")],
            Ok(list(vec![search_hit_json("lofi-1", "Lofi beats")])),
        );
        api.respond(
            "search",
            &[("q", "jazz")],
            Ok(list(vec![
                search_hit_json("jazz-2", "Bebop"),
                search_hit_json("jazz-1", "Swing"),
            ])),
        );
        api.respond(
            "videos",
            &[("id", "jazz-2,jazz-1")],
            Ok(list(vec![video_json("jazz-1", "Swing"), video_json("jazz-2", "Bebop")])),
        );
        api.respond("videos", &[("id", "lofi-1")], Ok(list(vec![video_json("lofi-1", "Lofi beats")])));

        let search = Arc::new(SearchController::new(api.clone(), &Config::with_api_key("k")));
        let mut rx = search.subscribe();

        let lofi = search.begin();
        let lofi_task = tokio::spawn({
            let search = Arc::clone(&search);
            async move { search.load(lofi, "lofi".to_string()).await }
        });
        tokio::task::yield_now().await;

        // "jazz" is issued while "lofi" is still waiting on its search phase
        search.search("jazz").await;
        assert_eq!(ids(&rx.borrow_and_update()), vec!["jazz-2", "jazz-1"]);

        lofi_hits.send(()).unwrap();
        lofi_task.await.unwrap();

        assert!(!rx.has_changed().unwrap());
        assert_eq!(ids(&search.state()), vec!["jazz-2", "jazz-1"]);
        // the stale query never got as far as its details phase
        assert!(
            api.calls()
                .iter()
                .all(|call| call.param("id") != Some("lofi-1"))
        );
    }

    #[tokio::test]
    async fn superseded_during_details_phase_is_dropped() {
        let api = FakeApi::default();
        api.respond("search", &[("q", "old")], Ok(list(vec![search_hit_json("old-1", "Old")])));
        let old_details = api.respond_gated(
            "videos",
            &[("id", "old-1")],
            Ok(list(vec![video_json("old-1", "Old")])),
        );
        api.respond("search", &[("q", "new")], Ok(list(vec![search_hit_json("new-1", "New")])));
        api.respond("videos", &[("id", "new-1")], Ok(list(vec![video_json("new-1", "New")])));

        let search = Arc::new(SearchController::new(api.clone(), &Config::with_api_key("k")));
        let old = search.begin();
        let old_task = tokio::spawn({
            let search = Arc::clone(&search);
            async move { search.load(old, "old".to_string()).await }
        });
        tokio::task::yield_now().await;
        assert_eq!(api.calls_to("videos"), 1);

        search.search("new").await;
        old_details.send(()).unwrap();
        old_task.await.unwrap();

        assert_eq!(ids(&search.state()), vec!["new-1"]);
    }
}
