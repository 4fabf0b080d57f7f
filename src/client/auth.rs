//! Auth API accessor.

use reqwest::Method;

use super::ApiClient;
use crate::error::Result;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest, User};

/// Auth API client.
#[derive(Debug)]
pub struct AuthApi<'a> {
    pub(super) client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// `POST /auth/login`.
    ///
    /// Does not touch the token store; the session provider decides what to
    /// do with the returned credential.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let url = self.client.endpoint(&["auth", "login"], &[]);
        self.client.send_json(Method::POST, url, &req).await
    }

    /// `POST /auth/register`.
    pub async fn register(&self, username: &str, password: &str, role: &str) -> Result<AuthResponse> {
        let req = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        };
        let url = self.client.endpoint(&["auth", "register"], &[]);
        self.client.send_json(Method::POST, url, &req).await
    }

    /// `POST /auth/logout`. Best-effort server-side invalidation.
    pub async fn logout(&self) -> Result<()> {
        let url = self.client.endpoint(&["auth", "logout"], &[]);
        self.client
            .send_empty(Method::POST, url, None::<&()>)
            .await
    }

    /// `GET /auth/me` — the authoritative identity for the stored credential.
    pub async fn me(&self) -> Result<User> {
        let url = self.client.endpoint(&["auth", "me"], &[]);
        self.client.get_json(url).await
    }
}
