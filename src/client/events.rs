//! Events API accessor.

use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::types::{Event, EventPayload, EventTree, MySubscriptionStatus, Page, PageRequest, User};

/// Events API client.
#[derive(Debug)]
pub struct EventsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl EventsApi<'_> {
    /// `GET /events` — list all events.
    pub async fn list(&self) -> Result<Vec<Event>> {
        let url = self.client.endpoint(&["events"], &[]);
        self.client.get_json(url).await
    }

    /// `GET /events/{id}`.
    pub async fn get(&self, id: i64) -> Result<Event> {
        let url = self.client.endpoint(&["events", &id.to_string()], &[]);
        self.client.get_json(url).await
    }

    /// `GET /events/by-name/{name}`.
    pub async fn by_name(&self, name: &str) -> Result<Vec<Event>> {
        let url = self.client.endpoint(&["events", "by-name", name], &[]);
        self.client.get_json(url).await
    }

    /// `GET /events/by-location/{location}`.
    pub async fn by_location(&self, location: &str) -> Result<Vec<Event>> {
        let url = self.client.endpoint(&["events", "by-location", location], &[]);
        self.client.get_json(url).await
    }

    /// `GET /events/by-author/{userId}?page=&size=&sort=` — paged listing of
    /// one author's events.
    pub async fn by_author(&self, user_id: i64, page: &PageRequest) -> Result<Page<Event>> {
        let url = self.client.endpoint(
            &["events", "by-author", &user_id.to_string()],
            &[
                ("page", page.page.to_string()),
                ("size", page.size.to_string()),
                ("sort", page.sort.clone()),
            ],
        );
        self.client.get_json(url).await
    }

    /// `GET /events/{id}/creator`.
    pub async fn creator(&self, id: i64) -> Result<User> {
        let url = self
            .client
            .endpoint(&["events", &id.to_string(), "creator"], &[]);
        self.client.get_json(url).await
    }

    /// `GET /events/{id}/tree` — event summary plus its short posts.
    pub async fn tree(&self, id: i64) -> Result<EventTree> {
        let url = self
            .client
            .endpoint(&["events", &id.to_string(), "tree"], &[]);
        self.client.get_json(url).await
    }

    /// `POST /events`.
    pub async fn create(&self, payload: &EventPayload) -> Result<Event> {
        let url = self.client.endpoint(&["events"], &[]);
        self.client.send_json(Method::POST, url, payload).await
    }

    /// `PUT /events/{id}`.
    pub async fn update(&self, id: i64, payload: &EventPayload) -> Result<Event> {
        let url = self.client.endpoint(&["events", &id.to_string()], &[]);
        self.client.send_json(Method::PUT, url, payload).await
    }

    /// `DELETE /events/{id}`.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let url = self.client.endpoint(&["events", &id.to_string()], &[]);
        self.client.send_empty(Method::DELETE, url, None::<&()>).await
    }

    /// `POST /events/{id}/subscriptions/telegram` — subscribe the current
    /// user to the event's Telegram announcements.
    pub async fn subscribe_telegram(&self, id: i64) -> Result<()> {
        let url = self
            .client
            .endpoint(&["events", &id.to_string(), "subscriptions", "telegram"], &[]);
        self.client.send_empty(Method::POST, url, None::<&()>).await
    }

    /// `DELETE /events/{id}/subscriptions/telegram`.
    pub async fn unsubscribe_telegram(&self, id: i64) -> Result<()> {
        let url = self
            .client
            .endpoint(&["events", &id.to_string(), "subscriptions", "telegram"], &[]);
        self.client
            .send_empty(Method::DELETE, url, None::<&()>)
            .await
    }

    /// `GET /events/{id}/subscriptions/my` — Telegram link/subscription
    /// status of the current user for this event.
    pub async fn my_subscription(&self, id: i64) -> Result<MySubscriptionStatus> {
        let url = self
            .client
            .endpoint(&["events", &id.to_string(), "subscriptions", "my"], &[]);
        self.client.get_json(url).await
    }

    /// `GET /events/{id}/subscription/telegram/count` — number of Telegram
    /// subscribers.
    pub async fn telegram_subscriber_count(&self, id: i64) -> Result<u64> {
        let url = self.client.endpoint(
            &["events", &id.to_string(), "subscription", "telegram", "count"],
            &[],
        );
        self.client.get_json(url).await
    }
}
