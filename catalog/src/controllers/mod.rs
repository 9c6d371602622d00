//! One controller per view.
//!
//! A controller owns a [`StaleGuard`](crate::stale_guard::StaleGuard) and the
//! `watch` channel(s) holding its [`ViewState`](crate::view_state::ViewState).
//! The presentation layer only ever holds receivers.
//!
//! A trigger is handled in two steps. [`Controller::begin`] runs
//! synchronously when the trigger parameter changes: it advances the guard
//! and flips the view to `Loading`. [`Controller::load`] then performs the
//! fetches for that generation and commits whatever is still current. Keeping
//! `begin` synchronous is what orders generations by trigger rather than by
//! whichever task happens to run first.

use crate::stale_guard::Generation;
use std::fmt;
use std::future::Future;

pub mod channel;
pub mod feed;
pub mod search;
pub mod video;

pub use channel::{ChannelController, ChannelPage, Classification, Uploads};
pub use feed::FeedController;
pub use search::SearchController;
pub use video::VideoDetailController;

pub trait Controller: Send + Sync + 'static {
    /// The parameter whose changes cause a refetch.
    type Trigger: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Invalidates in-flight work and marks the view as loading.
    fn begin(&self) -> Generation;

    /// Fetches for `trigger` and commits the results if `generation` is still current.
    fn load(
        &self,
        generation: Generation,
        trigger: Self::Trigger,
    ) -> impl Future<Output = ()> + Send;
}
