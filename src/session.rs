//! Session lifecycle.
//!
//! [`SessionProvider`] is the single holder of the current [`Session`] and
//! the boot flag, and the sole mutator of both. It owns the four transitions:
//! boot (restore from a stored credential), login, register, and logout.
//!
//! # Boot sequence
//!
//! Boot runs exactly once per provider lifetime. With a stored credential it
//! first installs the locally-decoded snapshot for instant feedback, then
//! asks the server for the authoritative identity:
//!
//! - `/auth/me` succeeds → the server snapshot wins.
//! - `/auth/me` fails with 401 → the credential is dead; anonymous. (The API
//!   client has already cleared the store as its 401 side effect.)
//! - `/auth/me` fails otherwise (network, 5xx) → keep the decoded snapshot if
//!   there is one, else clear the credential and go anonymous.
//!
//! The boot flag flips to false only after the final state is in place.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::claims::{Session, decode_session};
use crate::client::ApiClient;
use crate::error::Result;
use crate::gate::RouteState;

/// Process-wide session state holder.
///
/// Cheap to clone: clones share the same state, so every consumer can hold
/// a live handle.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    inner: std::sync::Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    session: RwLock<Option<Session>>,
    booting: AtomicBool,
    boot_started: AtomicBool,
}

impl SessionProvider {
    /// Create a provider over an API client. The provider starts in the
    /// booting state; call [`boot`](Self::boot) to restore a session from
    /// the token store.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: std::sync::Arc::new(Inner {
                api,
                session: RwLock::new(None),
                booting: AtomicBool::new(true),
                boot_started: AtomicBool::new(false),
            }),
        }
    }

    /// The API client this provider authenticates through.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Current session snapshot, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.inner
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether session restoration is still in flight.
    #[must_use]
    pub fn is_booting(&self) -> bool {
        self.inner.booting.load(Ordering::Acquire)
    }

    /// Whether a session is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Snapshot of (boot flag, session) for the route gate.
    #[must_use]
    pub fn route_state(&self) -> RouteState {
        RouteState {
            booting: self.is_booting(),
            session: self.session(),
        }
    }

    /// Restore a session from the stored credential. Runs once; later calls
    /// return immediately. Never fails: every failure path degrades to
    /// anonymous or to the locally-decoded snapshot.
    pub async fn boot(&self) {
        if self.inner.boot_started.swap(true, Ordering::AcqRel) {
            return;
        }

        let tokens = self.inner.api.token_store();
        let Some(token) = tokens.get() else {
            tracing::debug!("boot: no stored credential");
            self.finish_boot(None);
            return;
        };

        // Optimistic snapshot before the authoritative fetch is issued.
        let decoded = decode_session(&token);
        if let Some(session) = decoded.clone() {
            self.set_session(Some(session));
        }

        match self.inner.api.auth().me().await {
            Ok(user) => {
                tracing::debug!(user = %user.username, "boot: authoritative identity");
                self.finish_boot(Some(Session::from_user(&user)));
            }
            Err(e) if e.is_unauthorized() => {
                // Store already cleared by the API client's 401 handling.
                tracing::debug!("boot: credential rejected, starting anonymous");
                self.finish_boot(None);
            }
            Err(e) => {
                if decoded.is_some() {
                    tracing::debug!(error = %e, "boot: identity fetch failed, keeping decoded snapshot");
                    self.finish_boot(decoded);
                } else {
                    tracing::debug!(error = %e, "boot: identity fetch failed and token undecodable");
                    tokens.clear();
                    self.finish_boot(None);
                }
            }
        }
    }

    /// Authenticate and store the returned credential.
    ///
    /// On failure nothing changes and the error propagates to the caller, so
    /// the view can show it ("wrong password" and friends).
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let resp = self.inner.api.auth().login(username, password).await?;
        self.install(&resp.access_token, resp.user.as_ref());
        Ok(())
    }

    /// Register a new account and store the returned credential.
    ///
    /// Some backend variants return a token without a user body; the session
    /// then comes from decoding the new token.
    pub async fn register(&self, username: &str, password: &str, role: &str) -> Result<()> {
        let resp = self.inner.api.auth().register(username, password, role).await?;
        self.install(&resp.access_token, resp.user.as_ref());
        Ok(())
    }

    /// Log out. The local transition is unconditional and immediate; the
    /// server-side invalidation is best-effort and its failure is ignored.
    /// Idempotent.
    pub async fn logout(&self) {
        self.inner.api.token_store().clear();
        self.set_session(None);
        if let Err(e) = self.inner.api.auth().logout().await {
            tracing::debug!(error = %e, "logout: server invalidation failed (ignored)");
        }
    }

    fn install(&self, token: &str, user: Option<&crate::types::User>) {
        self.inner.api.token_store().set(token);
        let session = user.map(Session::from_user).or_else(|| decode_session(token));
        self.set_session(session);
    }

    fn set_session(&self, session: Option<Session>) {
        *self
            .inner
            .session
            .write()
            .unwrap_or_else(|e| e.into_inner()) = session;
    }

    fn finish_boot(&self, session: Option<Session>) {
        self.set_session(session);
        self.inner.booting.store(false, Ordering::Release);
    }
}
