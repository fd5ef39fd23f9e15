//! # Friend Data Transfer Objects
//!
//! Defines request and response structures for friend management endpoints.

use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// State of a friend edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendStatus {
    Pending,
    Accepted,
    Blocked,
}

/// Friend request to send to another user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FriendCreate {
    pub friend_id: i64,
}

/// Directed edge between two users.
///
/// `user_id` sent the request, `friend_id` received it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Friend {
    pub id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub status: FriendStatus,
    pub created_at: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub friend: Option<UserProfile>,
}

impl Friend {
    /// Whether the edge connects `a` and `b`, in either direction
    pub fn connects(&self, a: i64, b: i64) -> bool {
        (self.user_id == a && self.friend_id == b) || (self.user_id == b && self.friend_id == a)
    }
}

/// Response after rejecting a friend request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FriendRejectResponse {
    pub status: String,
}
