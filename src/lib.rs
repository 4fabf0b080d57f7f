//! Client SDK for the Sport Administration backend.
//!
//! A typed REST client plus the session machinery a front end needs: token
//! persistence, optimistic (unverified) credential decoding, a boot/login/
//! register/logout lifecycle, and a pure route-authorization decision
//! function for the view layer to call before rendering.
//!
//! # Architecture
//!
//! - **Token store**: one durable bearer credential ([`token`])
//! - **Session decoder**: credential → provisional identity snapshot ([`claims`])
//! - **Session provider**: boot/login/register/logout state machine ([`session`])
//! - **Route gate**: render / placeholder / redirect decisions ([`gate`])
//! - **API client**: request core + typed resource accessors ([`client`])
//!
//! # Example
//!
//! ```rust,no_run
//! use sportadm_client::{AccessPolicy, Decision, ReturnTarget, Settings, gate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Settings::from_env()?.session_provider()?;
//!     provider.boot().await;
//!
//!     provider.login("alice", "secret").await?;
//!
//!     let decision = gate::evaluate(
//!         &provider.route_state(),
//!         &AccessPolicy::AuthenticatedOnly,
//!         &ReturnTarget::new("/dashboard", None),
//!         None,
//!     );
//!     assert_eq!(decision, Decision::Render);
//!
//!     let events = provider.api().events().list().await?;
//!     println!("{} events", events.len());
//!     Ok(())
//! }
//! ```

pub mod claims;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod session;
pub mod token;
pub mod types;

// Re-exports
pub use claims::{Session, decode_session, normalize_roles};
pub use client::{ApiClient, AuthApi, EventsApi, PostsApi, RegistrationsApi, RequestBody};
pub use config::Settings;
pub use error::{Error, Result};
pub use gate::{AccessPolicy, Decision, RedirectTarget, ReturnTarget, RouteState};
pub use session::SessionProvider;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::*;
