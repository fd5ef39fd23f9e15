//! # Session Handlers
//!
//! Bootstrap, verification and logout.

use lib_auth::{AuthChain, Session, TelegramContext};
use tracing::Instrument;

use crate::app::{App, AppEvent};
use crate::core::{AppError, Result, SessionBridge};
use crate::debug::action_span;

/// Run the strategy chain and record the outcome.
///
/// Failure is terminal for this run: the app lands on the auth-failed view
/// and there is no guest mode.
pub(crate) async fn bootstrap(app: &App, telegram: &TelegramContext) -> Result<Session> {
    async {
        let chain = AuthChain::standard(app.config.allow_unsafe_telegram_auth);
        let backend = SessionBridge(app.api.clone());

        match chain.run(&backend, app.sessions.as_ref(), telegram).await {
            Ok(session) => {
                app.dispatch(AppEvent::SessionEstablished(session.clone()));
                Ok(session)
            }
            Err(e) => {
                tracing::error!(error = %e, strategies = ?chain.names(), "Bootstrap failed");
                app.dispatch(AppEvent::SessionFailed(e.user_message()));
                Err(AppError::Auth(e))
            }
        }
    }
    .instrument(action_span("bootstrap"))
    .await
}

/// `GET /auth/check`; an unauthenticated answer ends the session.
pub(crate) async fn verify_session(app: &App) -> Result<bool> {
    let result = check_session(app)
        .instrument(action_span("verify_session"))
        .await;
    app.report("verify_session", result)
}

async fn check_session(app: &App) -> Result<bool> {
    let (token, _) = app.session()?;
    let check = app.api.auth_check(&token).await?;

    if !check.authenticated {
        tracing::info!("Backend no longer accepts the session");
        app.sessions.clear()?;
        app.dispatch(AppEvent::SessionFailed(
            "Your session has expired. Please reopen the app".to_string(),
        ));
    }
    Ok(check.authenticated)
}

pub(crate) fn logout(app: &App) -> Result<()> {
    lib_auth::strategy::logout(app.sessions.as_ref())?;
    app.dispatch(AppEvent::LoggedOut);
    Ok(())
}
