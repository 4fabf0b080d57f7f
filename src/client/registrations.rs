//! Registrations API accessor.

use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::types::Registration;

/// Registrations API client: the current user's event sign-ups.
#[derive(Debug)]
pub struct RegistrationsApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl RegistrationsApi<'_> {
    /// `GET /registrations/my` — the current user's registrations.
    pub async fn my(&self) -> Result<Vec<Registration>> {
        let url = self.client.endpoint(&["registrations", "my"], &[]);
        self.client.get_json(url).await
    }

    /// `POST /registrations/my/{eventId}` — register for an event.
    pub async fn register_for(&self, event_id: i64) -> Result<()> {
        let url = self
            .client
            .endpoint(&["registrations", "my", &event_id.to_string()], &[]);
        self.client.send_empty(Method::POST, url, None::<&()>).await
    }

    /// `DELETE /registrations/my/{eventId}` — cancel a registration.
    pub async fn cancel(&self, event_id: i64) -> Result<()> {
        let url = self
            .client
            .endpoint(&["registrations", "my", &event_id.to_string()], &[]);
        self.client
            .send_empty(Method::DELETE, url, None::<&()>)
            .await
    }
}
