//! # Authentication Endpoints
//!
//! Telegram init data exchange and session checks.

use shared::dto::{AuthCheckResponse, TelegramAuthResponse, UserProfile};

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    /// Exchange Telegram init data for a bearer token.
    ///
    /// The init data travels as the `init_data` query parameter, untouched.
    #[tracing::instrument(skip_all, fields(init_data_len = init_data.len()))]
    pub async fn telegram_auth(&self, init_data: &str) -> Result<TelegramAuthResponse, ApiError> {
        tracing::info!("Exchanging Telegram init data");

        let request = self
            .client
            .post(self.url("/auth/telegram"))
            .query(&[("init_data", init_data)]);

        let response: TelegramAuthResponse = self.send_json("auth/telegram", request).await?;
        tracing::info!(user_id = response.user.id, "Telegram authentication successful");
        Ok(response)
    }

    /// Check whether a bearer token is still accepted.
    pub async fn auth_check(&self, token: &str) -> Result<AuthCheckResponse, ApiError> {
        let request = self.client.get(self.url("/auth/check")).bearer_auth(token);
        self.send_json("auth/check", request).await
    }

    /// Profile of the token's owner.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        let request = self.client.get(self.url("/users/me")).bearer_auth(token);
        self.send_json("users/me", request).await
    }
}
