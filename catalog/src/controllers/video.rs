//! The video detail page: the video, its channel, and its top comments.
//!
//! The three parts are published through separate slots so a failing comments
//! call never hides the video. The channel lookup depends on the video's
//! `channel_id` and runs after it; comments only need the video id and run
//! alongside.

use crate::config::Config;
use crate::controllers::Controller;
use crate::controllers::channel::fetch_channel_summary;
use crate::model::{ChannelSummary, CommentThread, Item};
use crate::stale_guard::{Generation, StaleGuard};
use crate::view_state::{ViewError, ViewState};
use crate::youtube_api::FetchResource;
use tokio::sync::watch;
use tracing::instrument;

pub struct VideoDetailController<C> {
    client: C,
    guard: StaleGuard,
    comment_max_results: u32,
    item: watch::Sender<ViewState<Item>>,
    channel: watch::Sender<ViewState<ChannelSummary>>,
    comments: watch::Sender<ViewState<Vec<CommentThread>>>,
}

impl<C: FetchResource + 'static> VideoDetailController<C> {
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client,
            guard: StaleGuard::new(),
            comment_max_results: config.comment_max_results,
            item: watch::Sender::new(ViewState::Idle),
            channel: watch::Sender::new(ViewState::Idle),
            comments: watch::Sender::new(ViewState::Idle),
        }
    }

    pub fn subscribe_item(&self) -> watch::Receiver<ViewState<Item>> {
        self.item.subscribe()
    }

    pub fn subscribe_channel(&self) -> watch::Receiver<ViewState<ChannelSummary>> {
        self.channel.subscribe()
    }

    pub fn subscribe_comments(&self) -> watch::Receiver<ViewState<Vec<CommentThread>>> {
        self.comments.subscribe()
    }

    pub fn item(&self) -> ViewState<Item> {
        self.item.borrow().clone()
    }

    pub fn channel(&self) -> ViewState<ChannelSummary> {
        self.channel.borrow().clone()
    }

    pub fn comments(&self) -> ViewState<Vec<CommentThread>> {
        self.comments.borrow().clone()
    }

    /// `true` while any of the three slots is still loading.
    pub fn is_loading(&self) -> bool {
        self.item.borrow().is_loading()
            || self.channel.borrow().is_loading()
            || self.comments.borrow().is_loading()
    }

    /// Opens `video_id` and waits for every slot to settle.
    pub async fn open(&self, video_id: impl Into<String>) {
        let generation = self.begin();
        self.load(generation, video_id.into()).await;
    }

    async fn fetch_item(&self, video_id: &str) -> Result<Item, ViewError> {
        let response = self.client.list_videos_by_id(&[video_id]).await?;
        response
            .items
            .into_iter()
            .find(|video| video.id == video_id)
            .map(Item::from)
            .ok_or_else(|| ViewError::not_found("video", video_id))
    }

    /// The video, then its channel.
    async fn load_item_and_channel(&self, generation: Generation, video_id: &str) {
        let item = self.fetch_item(video_id).await;
        if let Err(e) = &item {
            tracing::warn!(error = %e, "failed to fetch video");
        }
        let channel_id = item
            .as_ref()
            .ok()
            .map(|item| item.channel_id.clone())
            .filter(|id| !id.is_empty());

        if !self.guard.commit(generation, &self.item, item.into()) {
            return;
        }

        let Some(channel_id) = channel_id else {
            // nothing to look up; don't leave the slot spinning
            self.guard.commit(generation, &self.channel, ViewState::Idle);
            return;
        };

        let channel = fetch_channel_summary(&self.client, &channel_id).await;
        if let Err(e) = &channel {
            tracing::warn!(error = %e, %channel_id, "failed to fetch channel for video");
        }
        self.guard.commit(generation, &self.channel, channel.into());
    }

    async fn load_comments(&self, generation: Generation, video_id: &str) {
        let comments = self
            .client
            .list_comment_threads(video_id, self.comment_max_results)
            .await
            .map(|response| {
                response
                    .items
                    .into_iter()
                    .map(CommentThread::from)
                    .collect::<Vec<_>>()
            });
        match &comments {
            Ok(threads) => tracing::debug!(returned_threads = threads.len(), "fetched comments"),
            Err(e) => tracing::warn!(error = %e, "failed to fetch comments"),
        }
        self.guard.commit(generation, &self.comments, comments.into());
    }
}

impl<C: FetchResource + 'static> Controller for VideoDetailController<C> {
    type Trigger = String;

    fn begin(&self) -> Generation {
        let generation = self.guard.advance();
        self.item.send_replace(ViewState::Loading);
        self.channel.send_replace(ViewState::Loading);
        self.comments.send_replace(ViewState::Loading);
        generation
    }

    #[instrument(skip(self))]
    async fn load(&self, generation: Generation, video_id: String) {
        tokio::join!(
            self.load_item_and_channel(generation, &video_id),
            self.load_comments(generation, &video_id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, channel_json, comment_json, list, video_json};
    use crate::view_state::ErrorKind;
    use crate::youtube_api::FetchError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn happy_api() -> FakeApi {
        let api = FakeApi::default();
        api.respond("videos", &[("id", "v1")], Ok(list(vec![video_json("v1", "Trailer")])));
        api.respond(
            "channels",
            &[("id", "UC-v1")],
            Ok(list(vec![channel_json("UC-v1", "Studio")])),
        );
        api.respond(
            "commentThreads",
            &[("videoId", "v1")],
            Ok(list(vec![comment_json("c1", "first"), comment_json("c2", "second")])),
        );
        api
    }

    #[tokio::test]
    async fn all_three_slots_settle() {
        let api = happy_api();
        let detail = VideoDetailController::new(api.clone(), &Config::with_api_key("k"));

        detail.open("v1").await;

        assert_eq!(detail.item().ready().unwrap().title, "Trailer");
        assert_eq!(detail.channel().ready().unwrap().title, "Studio");
        let comments = detail.comments();
        let texts: Vec<_> = comments.ready().unwrap().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(!detail.is_loading());

        let comments_call = api
            .calls()
            .into_iter()
            .find(|call| call.resource == "commentThreads")
            .unwrap();
        assert_eq!(comments_call.param("maxResults"), Some("20"));
    }

    #[tokio::test]
    async fn channel_lookup_uses_the_videos_channel() {
        let api = happy_api();
        let detail = VideoDetailController::new(api.clone(), &Config::with_api_key("k"));

        detail.open("v1").await;

        let channel_calls: Vec<_> = api
            .calls()
            .into_iter()
            .filter(|call| call.resource == "channels")
            .collect();
        assert_eq!(channel_calls.len(), 1);
        assert_eq!(channel_calls[0].param("id"), Some("UC-v1"));
    }

    #[tokio::test]
    async fn channel_failure_leaves_video_and_comments() {
        let api = FakeApi::default();
        api.respond("videos", &[], Ok(list(vec![video_json("v1", "Trailer")])));
        api.respond("channels", &[], Err(FetchError::http_status(503, "unavailable")));
        api.respond("commentThreads", &[], Ok(list(vec![comment_json("c1", "hi")])));
        let detail = VideoDetailController::new(api, &Config::with_api_key("k"));

        detail.open("v1").await;

        assert!(detail.item().ready().is_some());
        assert_eq!(detail.channel().error().unwrap().kind, ErrorKind::HttpStatus);
        assert_eq!(detail.comments().ready().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn comments_failure_leaves_video_and_channel() {
        let api = FakeApi::default();
        api.respond("videos", &[], Ok(list(vec![video_json("v1", "Trailer")])));
        api.respond("channels", &[], Ok(list(vec![channel_json("UC-v1", "Studio")])));
        api.respond(
            "commentThreads",
            &[],
            Err(FetchError::http_status(403, "comments are disabled")),
        );
        let detail = VideoDetailController::new(api, &Config::with_api_key("k"));

        detail.open("v1").await;

        assert!(detail.item().ready().is_some());
        assert!(detail.channel().ready().is_some());
        let comments = detail.comments();
        let e = comments.error().unwrap();
        assert_eq!(e.kind, ErrorKind::HttpStatus);
        assert!(e.message.contains("comments are disabled"));
    }

    #[tokio::test]
    async fn unknown_video_is_not_found_and_skips_channel() {
        let api = FakeApi::default();
        api.respond("videos", &[], Ok(list(vec![])));
        api.respond("commentThreads", &[], Ok(list(vec![])));
        let detail = VideoDetailController::new(api.clone(), &Config::with_api_key("k"));

        detail.open("gone").await;

        assert_eq!(detail.item().error().unwrap().kind, ErrorKind::NotFound);
        assert_eq!(detail.channel(), ViewState::Idle);
        assert_eq!(api.calls_to("channels"), 0);
        assert!(!detail.is_loading());
    }

    #[tokio::test]
    async fn opening_another_video_discards_the_first() {
        let api = FakeApi::default();
        let first_video = api.respond_gated(
            "videos",
            &[("id", "first")],
            Ok(list(vec![video_json("first", "First")])),
        );
        let first_comments = api.respond_gated(
            "commentThreads",
            &[("videoId", "first")],
            Ok(list(vec![comment_json("old", "stale comment")])),
        );
        api.respond("videos", &[("id", "second")], Ok(list(vec![video_json("second", "Second")])));
        api.respond("commentThreads", &[("videoId", "second")], Ok(list(vec![])));
        api.respond("channels", &[], Ok(list(vec![channel_json("UC-second", "Second channel")])));

        let detail = Arc::new(VideoDetailController::new(api.clone(), &Config::with_api_key("k")));
        let first = detail.begin();
        let first_task = tokio::spawn({
            let detail = Arc::clone(&detail);
            async move { detail.load(first, "first".to_string()).await }
        });
        tokio::task::yield_now().await;

        detail.open("second").await;
        first_video.send(()).unwrap();
        first_comments.send(()).unwrap();
        first_task.await.unwrap();

        assert_eq!(detail.item().ready().unwrap().id, "second");
        assert_eq!(detail.comments(), ViewState::Ready(vec![]));
        // the stale video never got far enough to look up its channel
        assert!(
            api.calls()
                .iter()
                .filter(|call| call.resource == "channels")
                .all(|call| call.param("id") == Some("UC-second"))
        );
    }
}
