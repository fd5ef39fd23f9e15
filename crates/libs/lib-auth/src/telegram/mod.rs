//! # Telegram Launch Context
//!
//! What Telegram hands a Mini App at launch: the signed `initData` string and
//! an unsigned copy of the user object (`initDataUnsafe.user`).
//!
//! Outside a WebView the context comes from the environment:
//!
//! - `TELEGRAM_INIT_DATA`: raw signed init data
//! - `TELEGRAM_UNSAFE_USER`: JSON user object, e.g. `{"id": 1, "first_name": "A"}`

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Hash placeholder the backend's debug path accepts instead of a signature.
pub const DEBUG_HASH: &str = "debug_hash";

/// The `user` object Telegram embeds in init data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelegramContext {
    /// Signed init data, passed to the backend untouched
    pub init_data: Option<String>,
    /// Unsigned user claim; only used by the opt-in debug strategy
    pub unsafe_user: Option<TelegramUser>,
}

impl TelegramContext {
    pub fn new(init_data: Option<String>, unsafe_user: Option<TelegramUser>) -> Self {
        Self {
            init_data: init_data.filter(|d| !d.trim().is_empty()),
            unsafe_user,
        }
    }

    /// Build the context from `TELEGRAM_INIT_DATA` and `TELEGRAM_UNSAFE_USER`.
    pub fn from_env() -> Result<Self> {
        let init_data = lib_utils::get_env("TELEGRAM_INIT_DATA").ok();
        let unsafe_user = match lib_utils::get_env("TELEGRAM_UNSAFE_USER") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                serde_json::from_str::<TelegramUser>(&raw).map_err(|e| {
                    AuthError::Session(format!("TELEGRAM_UNSAFE_USER is not a user object: {}", e))
                })?,
            ),
            _ => None,
        };

        Ok(Self::new(init_data, unsafe_user))
    }

    /// Whether the app was launched from Telegram at all
    pub fn is_present(&self) -> bool {
        self.init_data.is_some() || self.unsafe_user.is_some()
    }
}

/// Build unsigned init data from a user claim: `user=<json>&hash=debug_hash`.
///
/// Anyone can forge this. Only the debug strategy calls it.
pub fn unsigned_init_data(user: &TelegramUser) -> Result<String> {
    let json = serde_json::to_string(user)
        .map_err(|e| AuthError::Session(format!("Failed to encode Telegram user: {}", e)))?;
    Ok(format!(
        "user={}&hash={}",
        urlencoding::encode(&json),
        DEBUG_HASH
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> TelegramUser {
        TelegramUser {
            id: 123456,
            first_name: "Ann".to_string(),
            last_name: None,
            username: Some("ann".to_string()),
            language_code: None,
        }
    }

    #[test]
    fn test_unsigned_init_data_format() {
        let data = unsigned_init_data(&user()).unwrap();

        assert!(data.starts_with("user=%7B%22id%22%3A123456"));
        assert!(data.ends_with("&hash=debug_hash"));

        let encoded = data
            .strip_prefix("user=")
            .and_then(|rest| rest.strip_suffix("&hash=debug_hash"))
            .unwrap();
        let decoded = urlencoding::decode(encoded).unwrap();
        let parsed: TelegramUser = serde_json::from_str(&decoded).unwrap();
        assert_eq!(parsed, user());
    }

    #[test]
    fn test_blank_init_data_is_absent() {
        let ctx = TelegramContext::new(Some("  ".to_string()), None);
        assert!(!ctx.is_present());

        let ctx = TelegramContext::new(None, Some(user()));
        assert!(ctx.is_present());
    }
}
