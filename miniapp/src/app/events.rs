//! # Application Events
//!
//! Everything that can change [`AppState`](crate::app::state::AppState).
//! Handlers turn backend responses into events; the reducer applies them.

use lib_auth::Session;
use shared::dto::{Friend, Listing, Transaction, UserProfile};

use crate::app::state::{Alert, ListingFilter, View};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // ----- Session -----
    /// A strategy produced a session
    SessionEstablished(Session),
    /// No strategy succeeded, or the session was revoked
    SessionFailed(String),
    /// User logged out
    LoggedOut,
    /// Fresh profile of the current user (balance changes land here)
    ProfileUpdated(UserProfile),
    AvatarUploaded(String),

    // ----- Navigation -----
    Navigated(View),

    // ----- Listings -----
    FilterChanged(ListingFilter),
    /// First page of the feed, replacing what was there
    ListingsLoaded { listings: Vec<Listing>, page_size: u32 },
    /// Next page of the feed
    ListingsAppended { listings: Vec<Listing>, page_size: u32 },
    ListingCreated(Listing),
    /// Transition request sent for a listing
    TransitionStarted(i64),
    /// Backend returned the updated listing
    TransitionSucceeded(Listing),
    /// Backend refused or the request failed; local listing is untouched
    TransitionFailed(i64),

    // ----- Social -----
    FriendsLoaded(Vec<Friend>),
    FriendRequestsLoaded(Vec<Friend>),
    /// A single edge was created or changed
    FriendEdgeUpdated(Friend),
    FriendEdgeRemoved(i64),
    SearchResults { query: String, users: Vec<UserProfile> },
    PartnersLoaded(Vec<UserProfile>),
    FriendListingsLoaded { user_id: i64, listings: Vec<Listing> },

    // ----- Profile -----
    OwnListingsLoaded(Vec<Listing>),
    TransactionsLoaded(Vec<Transaction>),

    // ----- Alerts -----
    AlertRaised(Alert),
    AlertDismissed,
}
