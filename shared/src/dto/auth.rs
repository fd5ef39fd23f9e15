use serde::{Deserialize, Serialize};

use super::user::UserProfile;

/// Query parameters for `POST /auth/telegram`.
///
/// `init_data` is the raw Telegram WebApp payload; the backend checks its
/// signature, the client never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelegramAuthRequest {
    pub init_data: String,
}

/// Authentication response (Telegram exchange success)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelegramAuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserProfile,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response of `GET /auth/check`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthCheckResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Error response
///
/// The backend reports failures as `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}
