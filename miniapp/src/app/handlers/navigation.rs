//! # Navigation Handlers

use crate::app::{App, AppEvent, View};
use crate::core::Result;

/// Handle view change with authentication guard
pub(crate) async fn navigate(app: &App, view: View) -> Result<()> {
    let authenticated = app.state.read().is_authenticated();

    if view.requires_auth() && !authenticated {
        tracing::info!(
            "Access denied: {} requires authentication, redirecting",
            view.title()
        );
        app.dispatch(AppEvent::Navigated(View::AuthFailed));
        return Ok(());
    }

    app.dispatch(AppEvent::Navigated(view));

    match view {
        View::Listings => app.load_listings().await,
        View::Profile => app.load_profile().await,
        View::Menu | View::Create | View::AuthFailed => Ok(()),
    }
}
