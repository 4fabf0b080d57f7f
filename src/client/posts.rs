//! Event-scoped Posts API accessor.

use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::types::{Post, PostFilter, PostPayload, StatusChange};

/// Posts API client. All endpoints are scoped under
/// `/events/{eventId}/posts`.
#[derive(Debug)]
pub struct PostsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl PostsApi<'_> {
    /// `GET /events/{eventId}/posts` with optional status/audience/channel
    /// filters and the short-representation flag.
    pub async fn list(&self, event_id: i64, filter: &PostFilter) -> Result<Vec<Post>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(audience) = filter.audience {
            query.push(("audience", audience.as_str().to_string()));
        }
        if let Some(channel) = filter.channel {
            query.push(("channel", channel.as_str().to_string()));
        }
        if filter.short {
            query.push(("short", "true".to_string()));
        }
        let url = self
            .client
            .endpoint(&["events", &event_id.to_string(), "posts"], &query);
        self.client.get_json(url).await
    }

    /// `GET /events/{eventId}/posts/{postId}`.
    pub async fn get(&self, event_id: i64, post_id: i64) -> Result<Post> {
        let url = self.post_url(event_id, post_id, &[]);
        self.client.get_json(url).await
    }

    /// `POST /events/{eventId}/posts`.
    pub async fn create(&self, event_id: i64, payload: &PostPayload) -> Result<Post> {
        let url = self
            .client
            .endpoint(&["events", &event_id.to_string(), "posts"], &[]);
        self.client.send_json(Method::POST, url, payload).await
    }

    /// `PUT /events/{eventId}/posts/{postId}`.
    pub async fn update(&self, event_id: i64, post_id: i64, payload: &PostPayload) -> Result<Post> {
        let url = self.post_url(event_id, post_id, &[]);
        self.client.send_json(Method::PUT, url, payload).await
    }

    /// `DELETE /events/{eventId}/posts/{postId}`.
    pub async fn delete(&self, event_id: i64, post_id: i64) -> Result<()> {
        let url = self.post_url(event_id, post_id, &[]);
        self.client.send_empty(Method::DELETE, url, None::<&()>).await
    }

    /// `PATCH /events/{eventId}/posts/{postId}/status` — transition the post
    /// lifecycle (e.g. SCHEDULED → CANCELLED, or FAILED with an error note).
    pub async fn set_status(
        &self,
        event_id: i64,
        post_id: i64,
        change: &StatusChange,
    ) -> Result<Post> {
        let url = self.post_url(event_id, post_id, &["status"]);
        self.client.send_json(Method::PATCH, url, change).await
    }

    /// `POST /events/{eventId}/posts/{postId}/publish-now` — trigger
    /// immediate publication regardless of the scheduled time.
    pub async fn publish_now(&self, event_id: i64, post_id: i64) -> Result<Post> {
        let url = self.post_url(event_id, post_id, &["publish-now"]);
        self.client
            .send_json(Method::POST, url, &serde_json::json!({}))
            .await
    }

    fn post_url(&self, event_id: i64, post_id: i64, tail: &[&str]) -> url::Url {
        let event_id = event_id.to_string();
        let post_id = post_id.to_string();
        let mut segments = vec!["events", event_id.as_str(), "posts", post_id.as_str()];
        segments.extend_from_slice(tail);
        self.client.endpoint(&segments, &[])
    }
}
