//! # Profile Handlers

use shared::dto::ListingQuery;
use tracing::Instrument;

use crate::app::{App, AppEvent};
use crate::core::{AppError, Result};
use crate::debug::action_span;
use crate::services::api::users::image_mime;

/// Largest avatar accepted before upload
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Refresh profile, own listings, ledger history and the social panel.
pub(crate) async fn load_profile(app: &App) -> Result<()> {
    let result = fetch_profile(app)
        .instrument(action_span("load_profile"))
        .await;
    app.report("load_profile", result)?;

    app.load_social().await
}

async fn fetch_profile(app: &App) -> Result<()> {
    let (token, me) = app.session()?;
    let own_query = ListingQuery {
        user_id: Some(me.id),
        ..Default::default()
    };

    let (profile, listings, transactions) = tokio::try_join!(
        app.api.current_user(&token),
        app.api.list_listings(&token, &own_query),
        app.api.transactions(&token, me.id),
    )?;

    tracing::debug!(
        balance = profile.balance,
        listings = listings.len(),
        transactions = transactions.len(),
        "Profile loaded"
    );
    app.dispatch(AppEvent::ProfileUpdated(profile));
    app.dispatch(AppEvent::OwnListingsLoaded(listings));
    app.dispatch(AppEvent::TransactionsLoaded(transactions));
    Ok(())
}

pub(crate) async fn upload_avatar(app: &App, file_name: &str, bytes: Vec<u8>) -> Result<String> {
    let result = send_avatar(app, file_name, bytes)
        .instrument(action_span("upload_avatar"))
        .await;
    app.report("upload_avatar", result)
}

async fn send_avatar(app: &App, file_name: &str, bytes: Vec<u8>) -> Result<String> {
    if bytes.is_empty() {
        return Err(AppError::Validation("The selected file is empty".to_string()));
    }
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(AppError::Validation(
            "Avatar images must be 5 MB or smaller".to_string(),
        ));
    }
    if image_mime(file_name).is_none() {
        return Err(AppError::Validation(
            "Avatar must be a JPEG, PNG, GIF or WebP image".to_string(),
        ));
    }

    let (token, me) = app.session()?;
    let response = app.api.upload_avatar(&token, me.id, file_name, bytes).await?;

    tracing::info!(avatar_url = %response.avatar_url, "Avatar uploaded");
    app.dispatch(AppEvent::AvatarUploaded(response.avatar_url.clone()));
    Ok(response.avatar_url)
}
