//! # User Data Transfer Objects
//!
//! Profile snapshots as sent by the backend. Balance counters are
//! denormalized server-side and are displayed verbatim.

use serde::{Deserialize, Serialize};

/// Public profile of a marketplace user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub telegram_id: i64,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub balance: f64,
    pub earned_hours: f64,
    pub spent_hours: f64,
    pub created_at: String,
}

/// Response of `POST /users/{id}/avatar`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

/// Query for `GET /users/search`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSearchQuery {
    pub username: String,
}
