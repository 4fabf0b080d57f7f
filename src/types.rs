//! Shared types mirroring the backend's API DTOs.
//!
//! Field names follow the backend's camelCase wire format; timestamps are
//! naive local datetimes as emitted by the server (`LocalDateTime`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API Types
// =============================================================================

/// An authenticated user as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Role tags as sent by the server (not yet normalized).
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Requested role tag (e.g. "participant").
    pub role: String,
}

/// Response from `POST /auth/login` and `POST /auth/register`.
///
/// Some backend variants omit `user` and return only the token; callers
/// fall back to decoding the token locally in that case.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The bearer credential.
    pub access_token: String,
    /// The authenticated user, when the backend includes it.
    #[serde(default)]
    pub user: Option<User>,
}

// =============================================================================
// Event API Types
// =============================================================================

/// An event as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier.
    pub id: i64,
    /// Event name.
    pub name: String,
    /// Scheduled start.
    pub start_at: NaiveDateTime,
    /// Venue or place name.
    pub location: String,
    /// Maximum number of participants, if capped.
    pub capacity: Option<i32>,
    /// Free-form description.
    pub description: Option<String>,
    /// Cover image URL.
    pub cover_url: Option<String>,
    /// Category tag (SPORTS, EDUCATION, MUSIC, COMMUNITY, OTHER).
    pub category: Option<String>,
    /// Tag names.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload for creating or updating an event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub name: String,
    pub start_at: NaiveDateTime,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Query parameters for the paged by-author listing.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Page size.
    pub size: u32,
    /// Sort expression, e.g. `startAt,desc`.
    pub sort: String,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: "startAt,desc".to_string(),
        }
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Total items across all pages.
    pub total_elements: u64,
    /// Total page count.
    pub total_pages: u32,
    /// This page's index.
    pub number: u32,
}

/// Minimal event slice used in the tree response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub start_at: NaiveDateTime,
    pub location: String,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// `GET /events/{id}/tree`: an event summary plus its posts in short form.
#[derive(Debug, Clone, Deserialize)]
pub struct EventTree {
    pub event: EventSummary,
    #[serde(default)]
    pub posts: Vec<PostShort>,
}

/// Truncated post representation used in listings and the event tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostShort {
    pub id: i64,
    pub title: String,
    pub publish_at: NaiveDateTime,
    pub status: PostStatus,
    pub audience: Audience,
    pub channel: Channel,
}

/// Telegram link/subscription status of the current user for one event.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MySubscriptionStatus {
    /// Whether the user has connected a Telegram account at all.
    pub linked: bool,
    /// Whether the user is subscribed to this event's announcements.
    pub subscribed: bool,
}

// =============================================================================
// Post API Types
// =============================================================================

/// Lifecycle status of a scheduled post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
    Cancelled,
}

impl PostStatus {
    /// Wire representation, as used in query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Scheduled => "SCHEDULED",
            Self::Published => "PUBLISHED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Who a post is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Audience {
    Public,
    Subscribers,
}

impl Audience {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "PUBLIC",
            Self::Subscribers => "SUBSCRIBERS",
        }
    }
}

/// Delivery channel for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Telegram,
    Email,
}

impl Channel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Telegram => "TELEGRAM",
            Self::Email => "EMAIL",
        }
    }
}

/// A scheduled post as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub event_id: i64,
    pub title: String,
    pub body: String,
    pub publish_at: NaiveDateTime,
    pub status: PostStatus,
    pub audience: Audience,
    pub channel: Channel,
    /// Identifier assigned by the delivery channel after publication.
    pub external_id: Option<String>,
    /// Delivery error message, for FAILED posts.
    pub error: Option<String>,
    /// Whether the body was machine-generated from a template.
    #[serde(default)]
    pub generated: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Payload for creating or updating a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub body: String,
    pub publish_at: NaiveDateTime,
    pub audience: Audience,
    pub channel: Channel,
    /// Optional on create: DRAFT or SCHEDULED.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

/// Filters for the post listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub audience: Option<Audience>,
    pub channel: Option<Channel>,
    /// Request the short (truncated-body) representation.
    pub short: bool,
}

/// Body for `PATCH .../posts/{id}/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub status: PostStatus,
    /// Error detail, when transitioning to FAILED.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Registration API Types
// =============================================================================

/// A user's registration for an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub created_at: Option<NaiveDateTime>,
}
