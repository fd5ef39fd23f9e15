//! # Social Handlers
//!
//! Friend edges, user search, transaction partners and friends' listings.

use lib_core::model::friends::SendDecision;
use shared::dto::{Friend, FriendStatus, Listing, ListingQuery, UserProfile};
use tracing::Instrument;

use crate::app::{Alert, App, AppEvent};
use crate::core::{AppError, Result};
use crate::debug::action_span;

/// Shortest query sent to user search
pub const MIN_SEARCH_LEN: usize = 2;

/// Refresh friends, pending requests and transaction partners.
pub(crate) async fn load_social(app: &App) -> Result<()> {
    let result = fetch_social(app)
        .instrument(action_span("load_social"))
        .await;
    app.report("load_social", result)
}

async fn fetch_social(app: &App) -> Result<()> {
    let (token, _) = app.session()?;

    let (friends, requests, partners) = tokio::try_join!(
        app.api.friends(&token),
        app.api.friend_requests(&token),
        app.api.transaction_partners(&token),
    )?;

    tracing::debug!(
        friends = friends.len(),
        requests = requests.len(),
        partners = partners.len(),
        "Social data loaded"
    );
    app.dispatch(AppEvent::FriendsLoaded(friends));
    app.dispatch(AppEvent::FriendRequestsLoaded(requests));
    app.dispatch(AppEvent::PartnersLoaded(partners));
    Ok(())
}

pub(crate) async fn search_users(app: &App, query: &str) -> Result<Vec<UserProfile>> {
    let result = run_search(app, query)
        .instrument(action_span("search_users"))
        .await;
    app.report("search_users", result)
}

async fn run_search(app: &App, query: &str) -> Result<Vec<UserProfile>> {
    let query = query.trim();
    if query.chars().count() < MIN_SEARCH_LEN {
        return Err(AppError::Validation(format!(
            "Enter at least {} characters to search",
            MIN_SEARCH_LEN
        )));
    }

    let (token, _) = app.session()?;
    let users = app.api.search_users(&token, query).await?;

    app.dispatch(AppEvent::SearchResults {
        query: query.to_string(),
        users,
    });
    Ok(app.state.read().social.search_results.clone())
}

/// Send a friend request, or return the edge that already connects us.
///
/// Sending twice never creates a second edge.
pub(crate) async fn send_friend_request(app: &App, user_id: i64) -> Result<Friend> {
    let result = run_send(app, user_id)
        .instrument(action_span("send_friend_request"))
        .await;
    app.report("send_friend_request", result)
}

async fn run_send(app: &App, user_id: i64) -> Result<Friend> {
    let (token, _) = app.session()?;
    let decision = app.state.read().social.graph.plan_send(user_id)?;

    match decision {
        SendDecision::Existing(edge) => {
            tracing::info!(user_id, edge_id = edge.id, status = ?edge.status, "Friend edge exists");
            let message = match edge.status {
                FriendStatus::Accepted => "You are already friends",
                FriendStatus::Pending => "A friend request is already pending",
                FriendStatus::Blocked => "This user cannot be added",
            };
            app.dispatch(AppEvent::AlertRaised(Alert::info(message)));
            Ok(edge)
        }
        SendDecision::Send => {
            let edge = app.api.send_friend_request(&token, user_id).await?;
            tracing::info!(user_id, edge_id = edge.id, "Friend request sent");
            app.dispatch(AppEvent::FriendEdgeUpdated(edge.clone()));
            Ok(edge)
        }
    }
}

pub(crate) async fn accept_friend_request(app: &App, request_id: i64) -> Result<Friend> {
    let result = run_accept(app, request_id)
        .instrument(action_span("accept_friend_request"))
        .await;
    app.report("accept_friend_request", result)
}

async fn run_accept(app: &App, request_id: i64) -> Result<Friend> {
    let (token, _) = app.session()?;
    app.state.read().social.graph.check_respond(request_id)?;

    let edge = app.api.accept_friend_request(&token, request_id).await?;
    tracing::info!(request_id, "Friend request accepted");
    app.dispatch(AppEvent::FriendEdgeUpdated(edge.clone()));
    Ok(edge)
}

pub(crate) async fn reject_friend_request(app: &App, request_id: i64) -> Result<()> {
    let result = run_reject(app, request_id)
        .instrument(action_span("reject_friend_request"))
        .await;
    app.report("reject_friend_request", result)
}

async fn run_reject(app: &App, request_id: i64) -> Result<()> {
    let (token, _) = app.session()?;
    app.state.read().social.graph.check_respond(request_id)?;

    let response = app.api.reject_friend_request(&token, request_id).await?;
    tracing::info!(request_id, status = %response.status, "Friend request rejected");
    app.dispatch(AppEvent::FriendEdgeRemoved(request_id));
    Ok(())
}

/// Listing history of another user, shown from the friends panel.
pub(crate) async fn view_friend_listings(app: &App, user_id: i64) -> Result<Vec<Listing>> {
    let result = fetch_friend_listings(app, user_id)
        .instrument(action_span("view_friend_listings"))
        .await;
    app.report("view_friend_listings", result)
}

async fn fetch_friend_listings(app: &App, user_id: i64) -> Result<Vec<Listing>> {
    let (token, _) = app.session()?;
    let query = ListingQuery {
        user_id: Some(user_id),
        ..Default::default()
    };
    let listings = app.api.list_listings(&token, &query).await?;

    app.dispatch(AppEvent::FriendListingsLoaded {
        user_id,
        listings: listings.clone(),
    });
    Ok(listings)
}
