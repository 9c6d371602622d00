//! A scripted [`FetchResource`] for controller tests.
//!
//! Routes are matched in the order they were added: the first route whose
//! resource matches and whose required params are all present in the request
//! wins. A gated route holds its response until the test releases it, which is
//! how tests force responses to arrive in a chosen order.

use crate::youtube_api::{FetchError, FetchResource};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub resource: String,
    pub params: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct Route {
    resource: String,
    required: Vec<(String, String)>,
    response: Result<Value, FetchError>,
    gate: Option<oneshot::Receiver<()>>,
}

impl Route {
    fn matches(&self, resource: &str, params: &[(&str, &str)]) -> bool {
        self.resource == resource
            && self
                .required
                .iter()
                .all(|(k, v)| params.iter().any(|(pk, pv)| pk == k && pv == v))
    }
}

#[derive(Default)]
struct Inner {
    routes: Vec<Route>,
    calls: Vec<Call>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

impl FakeApi {
    pub fn respond(
        &self,
        resource: &str,
        required: &[(&str, &str)],
        response: Result<Value, FetchError>,
    ) {
        self.add_route(resource, required, response, None);
    }

    /// Like [`respond`](Self::respond), but the response is held back until
    /// the returned sender fires.
    pub fn respond_gated(
        &self,
        resource: &str,
        required: &[(&str, &str)],
        response: Result<Value, FetchError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.add_route(resource, required, response, Some(rx));
        tx
    }

    fn add_route(
        &self,
        resource: &str,
        required: &[(&str, &str)],
        response: Result<Value, FetchError>,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.inner.lock().unwrap().routes.push(Route {
            resource: resource.to_string(),
            required: required
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            response,
            gate,
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn calls_to(&self, resource: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.resource == resource)
            .count()
    }
}

impl FetchResource for FakeApi {
    async fn fetch_resource(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, FetchError> {
        let (response, gate) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(Call {
                resource: resource.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
            match inner
                .routes
                .iter_mut()
                .find(|route| route.matches(resource, params))
            {
                Some(route) => (route.response.clone(), route.gate.take()),
                None => (
                    Err(FetchError::http_status(404, format!("no route for {resource}"))),
                    None,
                ),
            }
        };
        if let Some(gate) = gate {
            // a dropped sender releases the response too
            let _ = gate.await;
        }
        response
    }
}

pub fn list(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "items": items, "pageInfo": { "totalResults": total } })
}

/// A `videos.list` item whose channel id is `UC-{id}`.
pub fn video_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "publishedAt": "2024-05-01T12:00:00Z",
            "channelId": format!("UC-{id}"),
            "title": title,
            "description": format!("{title} description"),
            "channelTitle": "Some Channel",
            "categoryId": "10",
            "thumbnails": { "medium": { "url": format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg") } }
        },
        "contentDetails": { "duration": "PT4M13S" },
        "statistics": { "viewCount": "1000", "likeCount": "10", "commentCount": "1" }
    })
}

pub fn search_hit_json(id: &str, title: &str) -> Value {
    json!({
        "id": { "kind": "youtube#video", "videoId": id },
        "snippet": {
            "publishedAt": "2024-05-01T12:00:00Z",
            "channelId": format!("UC-{id}"),
            "title": title,
            "description": "",
            "channelTitle": "Some Channel"
        }
    })
}

pub fn channel_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "snippet": { "title": title, "description": "about us" },
        "statistics": { "subscriberCount": "1200", "videoCount": "34", "viewCount": "56000" }
    })
}

pub fn comment_json(id: &str, text: &str) -> Value {
    json!({
        "id": id,
        "snippet": {
            "topLevelComment": {
                "id": format!("{id}-top"),
                "snippet": {
                    "authorDisplayName": "@viewer",
                    "textDisplay": text,
                    "publishedAt": "2024-05-02T08:00:00Z",
                    "likeCount": 0
                }
            },
            "totalReplyCount": 0
        }
    })
}
