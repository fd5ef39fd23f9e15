//! # Bearer Token Claims
//!
//! The backend issues HS256 JWTs carrying the user id, Telegram id and
//! username. The client cannot verify them (it has no secret) but reads
//! the claims to skip a round trip with an already-expired token.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID as a string)
    pub sub: String,
    #[serde(default)]
    pub telegram_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        lib_utils::time::is_expired(self.exp, now)
    }
}

/// Read a token's claims without checking its signature.
///
/// Expiry is not checked here either; use [`Claims::is_expired_at`].
pub fn peek_claims(token: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::Session(format!("Unreadable session token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(exp: i64) -> String {
        let claims = Claims {
            sub: "7".to_string(),
            telegram_id: Some("123456".to_string()),
            username: Some("alice".to_string()),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-secret-the-client-never-sees"),
        )
        .expect("JWT encoding should succeed")
    }

    #[test]
    fn test_peek_claims_without_secret() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = issue(exp);

        let claims = peek_claims(&token).expect("claims should decode");

        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.username.as_deref(), Some("alice"));
        assert!(!claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_expired_token_still_readable() {
        let exp = (Utc::now() - Duration::minutes(5)).timestamp();
        let claims = peek_claims(&issue(exp)).expect("claims should decode");

        assert!(claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(peek_claims("not-a-jwt"), Err(AuthError::Session(_))));
    }
}
