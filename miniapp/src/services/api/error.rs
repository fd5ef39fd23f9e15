//! # API Errors

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never got a response (connection, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 or 403: the session is missing, expired, or lacks rights
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Server is unreachable. Check your connection.".to_string(),
            ApiError::Status { status: 401, .. } => "Your session has expired".to_string(),
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
        }
    }
}

/// Extract a human-readable message from an error body.
///
/// The backend sends `{"detail": "..."}`; validation failures carry a list
/// under `detail`, which is returned as compact JSON.
pub(crate) fn detail_from_body(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => fallback_detail(status, body),
        },
        _ => fallback_detail(status, body),
    }
}

fn fallback_detail(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_body() {
        assert_eq!(
            detail_from_body(StatusCode::BAD_REQUEST, r#"{"detail": "Listing is not active"}"#),
            "Listing is not active"
        );
        assert_eq!(
            detail_from_body(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail": [{"msg": "x"}]}"#),
            r#"[{"msg":"x"}]"#
        );
        assert_eq!(detail_from_body(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(
            detail_from_body(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn test_user_message() {
        let err = ApiError::Status {
            status: 400,
            detail: "Friend request already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Friend request already exists");
        assert!(!err.is_auth_failure());

        let err = ApiError::Status {
            status: 401,
            detail: "Invalid or expired token".to_string(),
        };
        assert!(err.is_auth_failure());
        assert_eq!(err.user_message(), "Your session has expired");
    }
}
