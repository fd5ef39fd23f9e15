//! # Friend Management API Client
//!
//! HTTP client methods for friend requests and friend management.

use shared::dto::{Friend, FriendCreate, FriendRejectResponse};

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    /// Accepted friend edges of the current user
    pub async fn friends(&self, token: &str) -> Result<Vec<Friend>, ApiError> {
        let request = self.client.get(self.url("/friends")).bearer_auth(token);
        self.send_json("friends", request).await
    }

    /// Pending requests addressed to the current user
    pub async fn friend_requests(&self, token: &str) -> Result<Vec<Friend>, ApiError> {
        let request = self
            .client
            .get(self.url("/friends/requests"))
            .bearer_auth(token);
        self.send_json("friends/requests", request).await
    }

    /// Send a friend request to another user
    #[tracing::instrument(skip(self, token))]
    pub async fn send_friend_request(&self, token: &str, friend_id: i64) -> Result<Friend, ApiError> {
        let request = self
            .client
            .post(self.url("/friends/requests"))
            .bearer_auth(token)
            .json(&FriendCreate { friend_id });
        self.send_json("friends/requests/send", request).await
    }

    /// Accept a friend request
    #[tracing::instrument(skip(self, token))]
    pub async fn accept_friend_request(
        &self,
        token: &str,
        request_id: i64,
    ) -> Result<Friend, ApiError> {
        let path = format!("/friends/{}/accept", request_id);
        let request = self.client.post(self.url(&path)).bearer_auth(token);
        self.send_json("friends/accept", request).await
    }

    /// Reject a friend request; the backend deletes the edge
    #[tracing::instrument(skip(self, token))]
    pub async fn reject_friend_request(
        &self,
        token: &str,
        request_id: i64,
    ) -> Result<FriendRejectResponse, ApiError> {
        let path = format!("/friends/{}/reject", request_id);
        let request = self.client.post(self.url(&path)).bearer_auth(token);
        self.send_json("friends/reject", request).await
    }
}
