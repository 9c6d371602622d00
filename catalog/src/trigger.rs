//! Drives a controller from a watched trigger parameter.
//!
//! A trigger is begun by whoever changes it ([`publish_trigger`]), so the
//! controller's guard has already moved on and its view shows `Loading` by the
//! time the change is visible. The loop only dispatches the load for the
//! generation it was handed.

use crate::controllers::Controller;
use crate::stale_guard::Generation;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// The current trigger of one controller and the generation it was begun with.
pub type TriggerSlot<T> = watch::Sender<Option<(Generation, T)>>;

/// Makes `trigger` the current trigger for `controller`.
///
/// If `trigger` differs from the current value, the controller is begun
/// before this returns and the loop is woken to load it. Re-publishing the
/// current trigger does nothing. Returns whether a load was triggered.
pub fn publish_trigger<C: Controller>(
    controller: &C,
    slot: &TriggerSlot<C::Trigger>,
    trigger: C::Trigger,
) -> bool {
    slot.send_if_modified(|current| {
        if current.as_ref().is_some_and(|(_, current)| *current == trigger) {
            return false;
        }
        let generation = controller.begin();
        *current = Some((generation, trigger));
        true
    })
}

/// Loads `controller` for every trigger published to `triggers`.
///
/// `None` means "nothing selected yet" and is skipped. Each load runs on its
/// own task, so a slow load never delays the next trigger; if it is
/// superseded its result is discarded at commit. Triggers replaced before the
/// loop saw them are never loaded. The loop ends once every sender for
/// `triggers` has been dropped; loads already in flight are left to finish.
pub fn spawn_trigger_loop<C: Controller>(
    controller: Arc<C>,
    mut triggers: watch::Receiver<Option<(Generation, C::Trigger)>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let published = triggers.borrow_and_update().clone();
            if let Some((generation, trigger)) = published {
                tracing::debug!(%generation, ?trigger, "trigger changed");
                let controller = Arc::clone(&controller);
                tokio::spawn(async move { controller.load(generation, trigger).await });
            }

            if triggers.changed().await.is_err() {
                tracing::debug!("trigger source closed");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;
    use crate::config::Config;
    use crate::controllers::FeedController;
    use crate::testing::{FakeApi, list, video_json};
    use crate::view_state::ViewState;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn nothing_loads_until_a_trigger_is_set() {
        let api = FakeApi::default();
        let feed = Arc::new(FeedController::new(api.clone(), &Config::with_api_key("k")));
        let (tx, rx) = watch::channel(None);
        let handle = spawn_trigger_loop(Arc::clone(&feed), rx);

        tokio::task::yield_now().await;
        assert_eq!(feed.state(), ViewState::Idle);

        drop(tx);
        handle.await.unwrap();
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn publishing_begins_before_the_loop_runs() {
        let api = FakeApi::default();
        api.respond("videos", &[], Ok(list(vec![video_json("v1", "One")])));
        let feed = Arc::new(FeedController::new(api.clone(), &Config::with_api_key("k")));
        let (tx, rx) = watch::channel(None);
        let handle = spawn_trigger_loop(Arc::clone(&feed), rx);

        assert!(publish_trigger(&*feed, &tx, Category::All));
        assert!(feed.state().is_loading());
        assert!(!publish_trigger(&*feed, &tx, Category::All));

        let mut states = feed.subscribe();
        states.wait_for(ViewState::is_settled).await.unwrap();
        drop(tx);
        handle.await.unwrap();
        assert_eq!(api.calls_to("videos"), 1);
    }

    #[tokio::test]
    async fn each_change_loads_and_the_last_one_wins() {
        let api = FakeApi::default();
        let first = api.respond_gated(
            "videos",
            &[("videoCategoryId", "10")],
            Ok(list(vec![video_json("music", "Music")])),
        );
        api.respond("videos", &[("videoCategoryId", "20")], Ok(list(vec![video_json("gaming", "Gaming")])));
        let feed = Arc::new(FeedController::new(api.clone(), &Config::with_api_key("k")));
        let mut states = feed.subscribe();

        let (tx, rx) = watch::channel(None);
        let handle = spawn_trigger_loop(Arc::clone(&feed), rx);
        publish_trigger(&*feed, &tx, Category::from_id("10"));
        tokio::task::yield_now().await;

        publish_trigger(&*feed, &tx, Category::from_id("20"));
        let settled = states.wait_for(ViewState::is_settled).await.unwrap().clone();
        assert_eq!(settled.ready().unwrap()[0].id, "gaming");

        first.send(()).unwrap();
        drop(tx);
        handle.await.unwrap();
        tokio::task::yield_now().await;
        assert_eq!(feed.state().ready().unwrap()[0].id, "gaming");
    }
}
