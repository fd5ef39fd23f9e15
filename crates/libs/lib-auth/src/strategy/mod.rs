//! # Authentication Strategies
//!
//! Session bootstrap as an ordered list of strategies composed by a
//! first-success combinator:
//!
//! 1. [`StoredSession`]: a stored, unexpired bearer token checked with `GET /users/me`
//! 2. [`TelegramInitData`]: signed init data exchanged at `POST /auth/telegram`
//! 3. [`UnsafeUserClaim`]: unsigned `hash=debug_hash` claim, only when explicitly enabled
//!
//! A strategy that cannot run returns [`AuthError::Unavailable`]; any failure
//! hands over to the next strategy. When every strategy fails and there is
//! no Telegram context, the chain fails with [`AuthError::NoTelegramContext`].
//!
//! ```rust,ignore
//! let chain = AuthChain::standard(config.allow_unsafe_telegram_auth);
//! let session = chain.run(&api, &store, &telegram).await?;
//! ```

use async_trait::async_trait;
use shared::dto::auth::TelegramAuthResponse;
use shared::dto::user::UserProfile;

use crate::error::{AuthError, Result};
use crate::session::SessionStore;
use crate::telegram::{unsigned_init_data, TelegramContext};
use crate::token::peek_claims;

/// Backend calls the strategies need
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// `GET /users/me` with a bearer token
    async fn current_user(&self, token: &str) -> Result<UserProfile>;

    /// `POST /auth/telegram?init_data=...`
    async fn telegram_auth(&self, init_data: &str) -> Result<TelegramAuthResponse>;
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    /// Name of the strategy that produced the session
    pub via: &'static str,
}

#[async_trait]
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn authenticate(
        &self,
        backend: &dyn SessionBackend,
        store: &dyn SessionStore,
        telegram: &TelegramContext,
    ) -> Result<Session>;
}

/// Reuse a stored bearer token
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredSession;

#[async_trait]
impl AuthStrategy for StoredSession {
    fn name(&self) -> &'static str {
        "stored_session"
    }

    async fn authenticate(
        &self,
        backend: &dyn SessionBackend,
        store: &dyn SessionStore,
        _telegram: &TelegramContext,
    ) -> Result<Session> {
        let token = store
            .load()?
            .ok_or_else(|| AuthError::Unavailable("no stored session".to_string()))?;

        match peek_claims(&token) {
            Ok(claims) if claims.is_expired_at(lib_utils::now_utc()) => {
                tracing::info!(user_id = ?claims.user_id(), "Stored session expired, clearing");
                store.clear()?;
                return Err(AuthError::Unavailable("stored session expired".to_string()));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Stored session token unreadable, clearing");
                store.clear()?;
                return Err(AuthError::Unavailable("stored session unreadable".to_string()));
            }
        }

        match backend.current_user(&token).await {
            Ok(user) => Ok(Session {
                token,
                user,
                via: self.name(),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Stored session rejected, clearing");
                store.clear()?;
                Err(e)
            }
        }
    }
}

/// Exchange Telegram's signed init data for a session
#[derive(Debug, Default, Clone, Copy)]
pub struct TelegramInitData;

#[async_trait]
impl AuthStrategy for TelegramInitData {
    fn name(&self) -> &'static str {
        "telegram_init_data"
    }

    async fn authenticate(
        &self,
        backend: &dyn SessionBackend,
        store: &dyn SessionStore,
        telegram: &TelegramContext,
    ) -> Result<Session> {
        let init_data = telegram
            .init_data
            .as_deref()
            .ok_or_else(|| AuthError::Unavailable("no Telegram init data".to_string()))?;

        let response = backend.telegram_auth(init_data).await?;
        store.save(&response.access_token)?;

        Ok(Session {
            token: response.access_token,
            user: response.user,
            via: self.name(),
        })
    }
}

/// Send the unsigned user claim with `hash=debug_hash`.
///
/// Off unless `enabled`; the backend cannot distinguish it from a forgery.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsafeUserClaim {
    pub enabled: bool,
}

#[async_trait]
impl AuthStrategy for UnsafeUserClaim {
    fn name(&self) -> &'static str {
        "unsafe_user_claim"
    }

    async fn authenticate(
        &self,
        backend: &dyn SessionBackend,
        store: &dyn SessionStore,
        telegram: &TelegramContext,
    ) -> Result<Session> {
        if !self.enabled {
            return Err(AuthError::Unavailable("unsafe Telegram auth disabled".to_string()));
        }
        let user = telegram
            .unsafe_user
            .as_ref()
            .ok_or_else(|| AuthError::Unavailable("no Telegram user claim".to_string()))?;

        tracing::warn!(telegram_id = user.id, "Authenticating with UNSIGNED Telegram user claim");

        let init_data = unsigned_init_data(user)?;
        let response = backend.telegram_auth(&init_data).await?;
        store.save(&response.access_token)?;

        Ok(Session {
            token: response.access_token,
            user: response.user,
            via: self.name(),
        })
    }
}

/// Ordered strategies; the first success wins
pub struct AuthChain {
    strategies: Vec<Box<dyn AuthStrategy>>,
}

impl AuthChain {
    pub fn new(strategies: Vec<Box<dyn AuthStrategy>>) -> Self {
        Self { strategies }
    }

    /// Stored session, then Telegram init data, then (when allowed) the unsigned claim.
    pub fn standard(allow_unsafe: bool) -> Self {
        Self::new(vec![
            Box::new(StoredSession),
            Box::new(TelegramInitData),
            Box::new(UnsafeUserClaim {
                enabled: allow_unsafe,
            }),
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    #[tracing::instrument(skip_all)]
    pub async fn run(
        &self,
        backend: &dyn SessionBackend,
        store: &dyn SessionStore,
        telegram: &TelegramContext,
    ) -> Result<Session> {
        let mut last_failure: Option<AuthError> = None;

        for strategy in &self.strategies {
            match strategy.authenticate(backend, store, telegram).await {
                Ok(session) => {
                    tracing::info!(
                        strategy = strategy.name(),
                        user_id = session.user.id,
                        "Authenticated"
                    );
                    return Ok(session);
                }
                Err(AuthError::Unavailable(reason)) => {
                    tracing::debug!(strategy = strategy.name(), %reason, "Strategy unavailable");
                }
                Err(e) => {
                    tracing::warn!(strategy = strategy.name(), error = %e, "Strategy failed");
                    last_failure = Some(e);
                }
            }
        }

        if !telegram.is_present() {
            tracing::error!("No session and no Telegram context");
            return Err(AuthError::NoTelegramContext);
        }

        Err(last_failure
            .unwrap_or_else(|| AuthError::Rejected("No authentication method succeeded".to_string())))
    }
}

/// Drop the stored session.
pub fn logout(store: &dyn SessionStore) -> Result<()> {
    store.clear()?;
    tracing::info!("Logged out");
    Ok(())
}
