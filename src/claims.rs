//! Unverified token claim decoding.
//!
//! Turns a stored bearer token into a best-effort [`Session`] snapshot
//! without a network round trip, so the UI can render optimistically while
//! the authoritative `/auth/me` fetch is in flight.
//!
//! The client holds no signing key and performs NO signature verification.
//! A decoded snapshot is provisional by construction; the server remains the
//! source of truth and every API call is still authorized server-side.

use std::collections::BTreeSet;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::types::User;

/// Client-side snapshot of the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque user identifier, when the claims carry one.
    pub id: Option<String>,
    /// Display name, from the first populated name-like claim.
    pub username: Option<String>,
    /// Normalized role tags (uppercase, `ROLE_` prefix stripped, de-duplicated).
    pub roles: BTreeSet<String>,
    /// Token expiry, when the claims carry one.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Whether this session holds at least one of `required` after
    /// normalization. An empty `required` slice matches nothing.
    #[must_use]
    pub fn has_any_role(&self, required: &[&str]) -> bool {
        required
            .iter()
            .filter_map(|r| normalize_role(r))
            .any(|r| self.roles.contains(&r))
    }

    /// Build a session from an authoritative server [`User`].
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id.to_string()),
            username: Some(user.username.clone()),
            roles: normalize_roles(user.roles.iter().map(String::as_str)),
            expires_at: None,
        }
    }
}

/// Role claims arrive in several historical shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleClaim {
    List(Vec<String>),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<serde_json::Value>,
    #[serde(rename = "userId")]
    user_id: Option<serde_json::Value>,
    username: Option<String>,
    preferred_username: Option<String>,
    email: Option<String>,
    exp: Option<i64>,
    roles: Option<RoleClaim>,
    role: Option<String>,
    scope: Option<String>,
}

/// Decode the payload segment of a bearer token into a [`Session`].
///
/// Returns `None` for any malformed input: wrong segment count, invalid
/// base64url, non-JSON payload, or an `exp` already in the past. Never
/// errors; the decoder is not authoritative and degrades silently.
///
/// The display name is the first populated claim among `username`,
/// `preferred_username` and `email`. When only `email` is present the full
/// address is kept as-is (not truncated to its local part), so the snapshot
/// matches what the server would render for the same account.
#[must_use]
pub fn decode_session(token: &str) -> Option<Session> {
    let claims = decode_claims(token)?;

    let expires_at = claims
        .exp
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
    if let Some(exp) = expires_at {
        if exp <= Utc::now() {
            return None;
        }
    }

    let roles = match (&claims.roles, &claims.role, &claims.scope) {
        (Some(RoleClaim::List(list)), _, _) => normalize_roles(list.iter().map(String::as_str)),
        (Some(RoleClaim::Text(text)), _, _) => normalize_roles(split_tags(text)),
        (None, Some(role), _) => normalize_roles(split_tags(role)),
        (None, None, Some(scope)) => normalize_roles(split_tags(scope)),
        (None, None, None) => BTreeSet::new(),
    };

    let id = [&claims.sub, &claims.user_id]
        .into_iter()
        .flatten()
        .find_map(claim_to_string);
    let username = [&claims.username, &claims.preferred_username, &claims.email]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .cloned();

    Some(Session {
        id,
        username,
        roles,
        expires_at,
    })
}

fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (_header, payload, _sig) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }
    // Tolerate padded producers.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn claim_to_string(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Split a delimited role claim on commas and whitespace.
fn split_tags(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
}

/// Normalize heterogeneous role spellings into canonical tags: trimmed,
/// a single leading `ROLE_` prefix stripped, uppercased, de-duplicated.
/// `ROLE_ADMIN`, `admin` and `ADMIN` all normalize to `ADMIN`.
pub fn normalize_roles<'a>(raw: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    raw.into_iter().filter_map(normalize_role).collect()
}

fn normalize_role(raw: &str) -> Option<String> {
    let tag = raw.trim();
    if tag.is_empty() {
        return None;
    }
    let tag = tag.to_uppercase();
    let tag = tag.strip_prefix("ROLE_").unwrap_or(&tag);
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}
