//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use std::sync::Arc;

use async_trait::async_trait;
use lib_auth::{AuthError, SessionBackend};
use lib_core::Transition;
use shared::dto::{
    AuthCheckResponse, AvatarResponse, Friend, FriendRejectResponse, Listing, ListingCreate,
    ListingQuery, TelegramAuthResponse, Transaction, UserProfile,
};

use crate::services::api::ApiError;

/// Backend operations used by the app handlers.
///
/// Implemented by [`crate::services::api::ApiClient`] and by in-memory
/// doubles in tests. Every authenticated call takes the bearer token.
#[async_trait]
pub trait ApiService: Send + Sync {
    // ----- Session -----

    /// `POST /auth/telegram`
    async fn telegram_auth(&self, init_data: &str) -> Result<TelegramAuthResponse, ApiError>;

    /// `GET /auth/check`
    async fn auth_check(&self, token: &str) -> Result<AuthCheckResponse, ApiError>;

    /// `GET /users/me`
    async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError>;

    // ----- Listings -----

    /// `GET /listings`
    async fn list_listings(&self, token: &str, query: &ListingQuery)
        -> Result<Vec<Listing>, ApiError>;

    /// `POST /listings`
    async fn create_listing(&self, token: &str, listing: &ListingCreate)
        -> Result<Listing, ApiError>;

    /// `POST /listings/{id}/{transition}`
    async fn transition_listing(
        &self,
        token: &str,
        listing_id: i64,
        transition: Transition,
    ) -> Result<Listing, ApiError>;

    // ----- Friends -----

    /// `GET /friends`
    async fn friends(&self, token: &str) -> Result<Vec<Friend>, ApiError>;

    /// `GET /friends/requests`
    async fn friend_requests(&self, token: &str) -> Result<Vec<Friend>, ApiError>;

    /// `POST /friends/requests`
    async fn send_friend_request(&self, token: &str, friend_id: i64) -> Result<Friend, ApiError>;

    /// `POST /friends/{id}/accept`
    async fn accept_friend_request(&self, token: &str, request_id: i64)
        -> Result<Friend, ApiError>;

    /// `POST /friends/{id}/reject`
    async fn reject_friend_request(
        &self,
        token: &str,
        request_id: i64,
    ) -> Result<FriendRejectResponse, ApiError>;

    // ----- Users -----

    /// `GET /users/search`
    async fn search_users(&self, token: &str, username: &str)
        -> Result<Vec<UserProfile>, ApiError>;

    /// `GET /users/transactions`
    async fn transaction_partners(&self, token: &str) -> Result<Vec<UserProfile>, ApiError>;

    /// `POST /users/{id}/avatar`
    async fn upload_avatar(
        &self,
        token: &str,
        user_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AvatarResponse, ApiError>;

    // ----- Ledger -----

    /// `GET /transactions/{user_id}`
    async fn transactions(&self, token: &str, user_id: i64) -> Result<Vec<Transaction>, ApiError>;
}

/// Exposes an [`ApiService`] to the authentication strategies.
pub struct SessionBridge(pub Arc<dyn ApiService>);

fn to_auth_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Status { detail, .. } => AuthError::Rejected(detail),
        other => AuthError::Rejected(other.to_string()),
    }
}

#[async_trait]
impl SessionBackend for SessionBridge {
    async fn current_user(&self, token: &str) -> lib_auth::Result<UserProfile> {
        self.0.current_user(token).await.map_err(to_auth_error)
    }

    async fn telegram_auth(&self, init_data: &str) -> lib_auth::Result<TelegramAuthResponse> {
        self.0.telegram_auth(init_data).await.map_err(to_auth_error)
    }
}
