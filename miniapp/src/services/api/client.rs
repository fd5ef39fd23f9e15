//! # API Client
//!
//! Main HTTP client for backend API communication.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use lib_core::{Config, Transition};
use shared::dto::{
    AuthCheckResponse, AvatarResponse, Friend, FriendRejectResponse, Listing, ListingCreate,
    ListingQuery, TelegramAuthResponse, Transaction, UserProfile,
};

use super::error::{detail_from_body, ApiError};
use crate::core::service::ApiService;

/// HTTP client for communicating with the time-bank backend.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON success body.
    ///
    /// `op` names the endpoint in logs.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let start = std::time::Instant::now();

        let response = request.send().await.map_err(|e| {
            tracing::error!(op, error = %e, "Network error");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let result = Self::read_body(response).await;
        let duration_ms = start.elapsed().as_millis();

        match &result {
            Ok(_) => tracing::debug!(op, status = status.as_u16(), duration_ms, "Request succeeded"),
            Err(e) => tracing::warn!(op, status = status.as_u16(), error = %e, duration_ms, "Request failed"),
        }
        result
    }

    async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str::<T>(&body).map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                detail: detail_from_body(status, &body),
            })
        }
    }
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn telegram_auth(&self, init_data: &str) -> Result<TelegramAuthResponse, ApiError> {
        ApiClient::telegram_auth(self, init_data).await
    }

    async fn auth_check(&self, token: &str) -> Result<AuthCheckResponse, ApiError> {
        ApiClient::auth_check(self, token).await
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        ApiClient::current_user(self, token).await
    }

    async fn list_listings(
        &self,
        token: &str,
        query: &ListingQuery,
    ) -> Result<Vec<Listing>, ApiError> {
        ApiClient::list_listings(self, token, query).await
    }

    async fn create_listing(
        &self,
        token: &str,
        listing: &ListingCreate,
    ) -> Result<Listing, ApiError> {
        ApiClient::create_listing(self, token, listing).await
    }

    async fn transition_listing(
        &self,
        token: &str,
        listing_id: i64,
        transition: Transition,
    ) -> Result<Listing, ApiError> {
        ApiClient::transition_listing(self, token, listing_id, transition).await
    }

    async fn friends(&self, token: &str) -> Result<Vec<Friend>, ApiError> {
        ApiClient::friends(self, token).await
    }

    async fn friend_requests(&self, token: &str) -> Result<Vec<Friend>, ApiError> {
        ApiClient::friend_requests(self, token).await
    }

    async fn send_friend_request(&self, token: &str, friend_id: i64) -> Result<Friend, ApiError> {
        ApiClient::send_friend_request(self, token, friend_id).await
    }

    async fn accept_friend_request(
        &self,
        token: &str,
        request_id: i64,
    ) -> Result<Friend, ApiError> {
        ApiClient::accept_friend_request(self, token, request_id).await
    }

    async fn reject_friend_request(
        &self,
        token: &str,
        request_id: i64,
    ) -> Result<FriendRejectResponse, ApiError> {
        ApiClient::reject_friend_request(self, token, request_id).await
    }

    async fn search_users(
        &self,
        token: &str,
        username: &str,
    ) -> Result<Vec<UserProfile>, ApiError> {
        ApiClient::search_users(self, token, username).await
    }

    async fn transaction_partners(&self, token: &str) -> Result<Vec<UserProfile>, ApiError> {
        ApiClient::transaction_partners(self, token).await
    }

    async fn upload_avatar(
        &self,
        token: &str,
        user_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AvatarResponse, ApiError> {
        ApiClient::upload_avatar(self, token, user_id, file_name, bytes).await
    }

    async fn transactions(&self, token: &str, user_id: i64) -> Result<Vec<Transaction>, ApiError> {
        ApiClient::transactions(self, token, user_id).await
    }
}
