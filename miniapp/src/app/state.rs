//! # Application State Types
//!
//! The single state value of the Mini App. It is only ever replaced through
//! [`crate::app::reducer::reduce`]; handlers never mutate it field by field.

use std::collections::BTreeSet;

use lib_auth::Session;
use lib_core::model::friends::FriendGraph;
use lib_core::model::listing::ListingCounts;
use shared::dto::{Listing, ListingStatus, ListingType, Transaction, UserProfile};

/// Application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Menu,
    /// Listing feed
    Listings,
    /// New listing form
    Create,
    /// Profile, social panel, history
    Profile,
    /// Terminal screen shown when no session can be established
    AuthFailed,
}

impl View {
    /// Views reachable from the menu, in menu order
    pub fn all() -> &'static [View] {
        &[View::Menu, View::Listings, View::Create, View::Profile]
    }

    /// Get view title for header display
    pub fn title(&self) -> &'static str {
        match self {
            View::Menu => "Time Bank",
            View::Listings => "Listings",
            View::Create => "New Listing",
            View::Profile => "Profile",
            View::AuthFailed => "Open via Telegram",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, View::AuthFailed)
    }
}

/// Session sub-state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Bootstrap has not finished
    #[default]
    Bootstrapping,
    Authenticated {
        token: String,
        user: UserProfile,
        /// Strategy that produced the session
        via: &'static str,
    },
    /// Terminal for this run; no guest mode
    Failed { reason: String },
}

impl From<Session> for SessionState {
    fn from(session: Session) -> Self {
        SessionState::Authenticated {
            token: session.token,
            user: session.user,
            via: session.via,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

/// Blocking message shown to the user until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            message: message.into(),
        }
    }
}

/// Feed filters chosen in the listings view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingFilter {
    pub status: Option<ListingStatus>,
    pub listing_type: Option<ListingType>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingsState {
    pub items: Vec<Listing>,
    pub filter: ListingFilter,
    /// Last page came back full, so another may exist
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SocialState {
    pub graph: FriendGraph,
    pub search_query: String,
    pub search_results: Vec<UserProfile>,
    pub partners: Vec<UserProfile>,
    /// Listing history of the friend being viewed
    pub friend_listings: Option<(i64, Vec<Listing>)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub own_listings: Vec<Listing>,
    pub counts: ListingCounts,
    pub transactions: Vec<Transaction>,
}

/// Main application state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub view: View,
    pub session: SessionState,
    pub listings: ListingsState,
    pub social: SocialState,
    pub profile: ProfileState,
    /// Oldest first; the UI shows the first one
    pub alerts: Vec<Alert>,
    /// Listings with a transition request awaiting its response
    pub in_flight: BTreeSet<i64>,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.session, SessionState::Authenticated { .. })
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        match &self.session {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match &self.session {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Cached copy of a listing from any view
    pub fn find_listing(&self, listing_id: i64) -> Option<&Listing> {
        self.listings
            .items
            .iter()
            .chain(self.profile.own_listings.iter())
            .chain(
                self.social
                    .friend_listings
                    .iter()
                    .flat_map(|(_, listings)| listings.iter()),
            )
            .find(|l| l.id == listing_id)
    }
}
