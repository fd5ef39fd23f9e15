//! # Listing Handlers
//!
//! Feed loading, listing creation and lifecycle transitions.
//!
//! The local lifecycle check is a hint that saves a round trip for actions
//! the UI should not have offered; the backend response is what lands in
//! the store.

use lib_core::model::lifecycle;
use lib_core::model::listing::{balance_warning, validate_new_listing};
use lib_core::Transition;
use shared::dto::{Listing, ListingCreate, ListingQuery};
use tracing::Instrument;

use crate::app::{Alert, App, AppEvent, ListingFilter, ListingForm, View};
use crate::core::{AppError, Result};
use crate::debug::action_span;

fn feed_query(filter: ListingFilter, page_size: u32, skip: u32) -> ListingQuery {
    ListingQuery {
        skip: (skip > 0).then_some(skip),
        limit: Some(page_size),
        status: filter.status,
        listing_type: filter.listing_type,
        user_id: None,
    }
}

/// Fetch the first page of the feed with the current filter.
pub(crate) async fn load_listings(app: &App) -> Result<()> {
    let result = fetch_first_page(app)
        .instrument(action_span("load_listings"))
        .await;
    app.report("load_listings", result)
}

async fn fetch_first_page(app: &App) -> Result<()> {
    let (token, _) = app.session()?;
    let filter = app.state.read().listings.filter;
    let page_size = app.config.listings_page_size;

    let listings = app
        .api
        .list_listings(&token, &feed_query(filter, page_size, 0))
        .await?;

    tracing::debug!(count = listings.len(), "Listings loaded");
    app.dispatch(AppEvent::ListingsLoaded {
        listings,
        page_size,
    });
    Ok(())
}

/// Fetch the page after the ones already shown. No-op once a short page came back.
pub(crate) async fn load_more_listings(app: &App) -> Result<()> {
    let result = fetch_next_page(app)
        .instrument(action_span("load_more_listings"))
        .await;
    app.report("load_more_listings", result)
}

async fn fetch_next_page(app: &App) -> Result<()> {
    let (token, _) = app.session()?;
    let (filter, skip, has_more) = {
        let state = app.state.read();
        (
            state.listings.filter,
            state.listings.items.len() as u32,
            state.listings.has_more,
        )
    };
    if !has_more {
        return Ok(());
    }

    let page_size = app.config.listings_page_size;
    let listings = app
        .api
        .list_listings(&token, &feed_query(filter, page_size, skip))
        .await?;

    app.dispatch(AppEvent::ListingsAppended {
        listings,
        page_size,
    });
    Ok(())
}

pub(crate) async fn set_filter(app: &App, filter: ListingFilter) -> Result<()> {
    app.dispatch(AppEvent::FilterChanged(filter));
    load_listings(app).await
}

/// Validate and submit the new listing form.
///
/// A request for more hours than the cached balance raises a warning but is
/// still sent; the backend decides.
pub(crate) async fn create_listing(app: &App, form: ListingForm) -> Result<Listing> {
    let result = submit_listing(app, form)
        .instrument(action_span("create_listing"))
        .await;
    app.report("create_listing", result)
}

async fn submit_listing(app: &App, form: ListingForm) -> Result<Listing> {
    let (token, me) = app.session()?;

    let create = ListingCreate {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        hours: form.hours,
        listing_type: form.listing_type,
        user_id: me.id,
    };
    validate_new_listing(&create)?;

    if let Some(warning) = balance_warning(&create, me.balance) {
        app.dispatch(AppEvent::AlertRaised(Alert::warning(warning)));
    }

    let listing = app.api.create_listing(&token, &create).await?;
    tracing::info!(
        listing_id = listing.id,
        listing_type = %listing.listing_type,
        hours = listing.hours,
        "Listing created"
    );

    app.dispatch(AppEvent::ListingCreated(listing.clone()));
    app.dispatch(AppEvent::Navigated(View::Listings));
    Ok(listing)
}

/// Send a lifecycle transition for a listing.
///
/// While a request for a listing is in flight, further transitions on it
/// are refused without reaching the backend.
pub(crate) async fn transition(
    app: &App,
    listing_id: i64,
    transition: Transition,
) -> Result<Listing> {
    run_transition(app, listing_id, transition)
        .instrument(action_span("transition"))
        .await
}

async fn run_transition(app: &App, listing_id: i64, transition: Transition) -> Result<Listing> {
    let token = app.report("transition", check_transition(app, listing_id, transition))?;

    // Refused quietly: the first request will raise its own alert if it fails
    if !app.try_begin_transition(listing_id) {
        tracing::debug!(listing_id, %transition, "Transition already in flight, ignoring");
        return Err(AppError::State(
            "An action on this listing is already in progress".to_string(),
        ));
    }

    let result = send_transition(app, &token, listing_id, transition).await;
    app.report("transition", result)
}

/// Local authorization hint against the cached listing, if there is one.
fn check_transition(app: &App, listing_id: i64, transition: Transition) -> Result<String> {
    let (token, me) = app.session()?;
    if let Some(listing) = app.state.read().find_listing(listing_id) {
        lifecycle::authorize(listing, me.id, transition)?;
    }
    Ok(token)
}

async fn send_transition(
    app: &App,
    token: &str,
    listing_id: i64,
    transition: Transition,
) -> Result<Listing> {
    match app
        .api
        .transition_listing(token, listing_id, transition)
        .await
    {
        Ok(listing) => {
            tracing::info!(
                listing_id,
                %transition,
                status = %listing.status,
                "Transition applied"
            );
            app.dispatch(AppEvent::TransitionSucceeded(listing.clone()));

            if matches!(transition, Transition::Pay | Transition::Confirm) {
                refresh_balance(app, token).await;
            }
            Ok(listing)
        }
        Err(e) => {
            app.dispatch(AppEvent::TransitionFailed(listing_id));
            Err(e.into())
        }
    }
}

/// Re-read the profile after hours moved. Failure only costs a stale balance.
async fn refresh_balance(app: &App, token: &str) {
    match app.api.current_user(token).await {
        Ok(profile) => app.dispatch(AppEvent::ProfileUpdated(profile)),
        Err(e) => tracing::warn!(error = %e, "Failed to refresh balance"),
    }
}

pub(crate) fn available_transitions(app: &App, listing_id: i64) -> Vec<Transition> {
    let state = app.state.read();
    if state.in_flight.contains(&listing_id) {
        return Vec::new();
    }
    match (state.find_listing(listing_id), state.current_user()) {
        (Some(listing), Some(me)) => lifecycle::available_transitions(listing, me.id),
        _ => Vec::new(),
    }
}
