//! Environment-driven client settings.

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::session::SessionProvider;
use crate::token::{FileTokenStore, MemoryTokenStore, TokenStore};

/// Client settings.
///
/// The only externally significant configuration is the backend base URL;
/// an optional token path opts in to credential persistence across runs.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the backend API.
    pub api_url: Url,
    /// Path of the persisted-credential file. `None` keeps the token in
    /// memory only.
    pub token_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// `SPORTADM_API_URL` is required and must be non-empty;
    /// `SPORTADM_TOKEN_PATH` is optional.
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var("SPORTADM_API_URL")
            .map_err(|_| Error::Config("Missing required env var: SPORTADM_API_URL".to_string()))?;
        if raw.trim().is_empty() {
            return Err(Error::Config("SPORTADM_API_URL cannot be empty".to_string()));
        }
        let api_url = Url::parse(raw.trim())?;

        let token_path = std::env::var("SPORTADM_TOKEN_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { api_url, token_path })
    }

    /// Build the token store these settings describe.
    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        match &self.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path.clone())),
            None => Arc::new(MemoryTokenStore::new()),
        }
    }

    /// Build an API client from these settings.
    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(self.api_url.as_str(), self.token_store())
    }

    /// Build a session provider wired to these settings. The provider is in
    /// the booting state; call [`SessionProvider::boot`] next.
    pub fn session_provider(&self) -> Result<SessionProvider> {
        Ok(SessionProvider::new(self.api_client()?))
    }
}
