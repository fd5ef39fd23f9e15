//! # Application Orchestrator
//!
//! [`App`] owns the state store and the backend handles, and exposes one
//! method per user action. The UI layer reads snapshots and calls these
//! methods; it never touches the backend directly.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  UI (views read AppState snapshots)                      │
//! └────────────┬─────────────────────────────────────────────┘
//!              │ App::create_listing(), App::transition(), ...
//! ┌────────────▼─────────────────────────────────────────────┐
//! │  Handlers (async, one module per domain)                 │
//! │  - call ApiService                                       │
//! │  - turn responses into AppEvents                         │
//! └────────────┬─────────────────────────────────────────────┘
//!              │ App::dispatch(event)
//! ┌────────────▼─────────────────────────────────────────────┐
//! │  State: Arc<RwLock<AppState>>                            │
//! │  - replaced wholesale by reducer::reduce                 │
//! │  - lock never held across an .await                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error surfacing
//!
//! Every action returns its `Result` to the caller and also reports
//! failures into the store: a session-fatal error moves the app to
//! [`View::AuthFailed`], anything else raises an [`Alert`].

pub mod events;
pub mod handlers;
pub mod reducer;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use lib_auth::{Session, SessionStore, TelegramContext};
use lib_core::{Config, Transition};
use parking_lot::RwLock;
use shared::dto::{Friend, Listing, ListingType, UserProfile};

use crate::core::{ApiService, AppError, Result};

pub use events::AppEvent;
pub use reducer::reduce;
pub use state::{Alert, AlertLevel, AppState, ListingFilter, SessionState, View};

/// Input of the new listing form
#[derive(Debug, Clone, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub hours: f64,
    pub listing_type: ListingType,
}

/// Main application
pub struct App {
    /// Shared state, read by the UI
    pub state: Arc<RwLock<AppState>>,
    pub(crate) api: Arc<dyn ApiService>,
    pub(crate) sessions: Arc<dyn SessionStore>,
    pub(crate) config: Config,
}

impl App {
    pub fn new(api: Arc<dyn ApiService>, sessions: Arc<dyn SessionStore>, config: Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            api,
            sessions,
            config,
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply an event through the reducer.
    pub(crate) fn dispatch(&self, event: AppEvent) {
        let mut state = self.state.write();
        let current = std::mem::take(&mut *state);
        *state = reduce(current, event);
    }

    /// Mark a listing as having a transition in flight.
    ///
    /// Returns `false` if one already is; check and insert happen under one
    /// write lock.
    pub(crate) fn try_begin_transition(&self, listing_id: i64) -> bool {
        let mut state = self.state.write();
        if state.in_flight.contains(&listing_id) {
            return false;
        }
        let current = std::mem::take(&mut *state);
        *state = reduce(current, AppEvent::TransitionStarted(listing_id));
        true
    }

    /// Token and profile of the signed-in user
    pub(crate) fn session(&self) -> Result<(String, UserProfile)> {
        let state = self.state.read();
        match (state.token(), state.current_user()) {
            (Some(token), Some(user)) => Ok((token.to_string(), user.clone())),
            _ => Err(AppError::State("You are not signed in".to_string())),
        }
    }

    /// Log a failed action and surface it in the store.
    pub(crate) fn report<T>(&self, action: &'static str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_session_fatal() {
                tracing::warn!(action, error = %e, "Session lost");
                if let Err(clear_err) = self.sessions.clear() {
                    tracing::warn!(error = %clear_err, "Failed to clear stored session");
                }
                self.dispatch(AppEvent::SessionFailed(e.user_message()));
            } else {
                tracing::warn!(action, error = %e, "Action failed");
                self.dispatch(AppEvent::AlertRaised(Alert::error(e.user_message())));
            }
        }
        result
    }

    // ----- Session -----

    /// Establish a session, trying each strategy in order.
    pub async fn bootstrap(&self, telegram: &TelegramContext) -> Result<Session> {
        handlers::session::bootstrap(self, telegram).await
    }

    /// Ask the backend whether the current token is still valid.
    pub async fn verify_session(&self) -> Result<bool> {
        handlers::session::verify_session(self).await
    }

    pub fn logout(&self) -> Result<()> {
        handlers::session::logout(self)
    }

    // ----- Navigation -----

    /// Switch views; entering a data view re-fetches its data.
    pub async fn navigate(&self, view: View) -> Result<()> {
        handlers::navigation::navigate(self, view).await
    }

    pub fn dismiss_alert(&self) {
        self.dispatch(AppEvent::AlertDismissed);
    }

    // ----- Listings -----

    pub async fn load_listings(&self) -> Result<()> {
        handlers::listings::load_listings(self).await
    }

    pub async fn load_more_listings(&self) -> Result<()> {
        handlers::listings::load_more_listings(self).await
    }

    pub async fn set_filter(&self, filter: ListingFilter) -> Result<()> {
        handlers::listings::set_filter(self, filter).await
    }

    pub async fn create_listing(&self, form: ListingForm) -> Result<Listing> {
        handlers::listings::create_listing(self, form).await
    }

    pub async fn transition(&self, listing_id: i64, transition: Transition) -> Result<Listing> {
        handlers::listings::transition(self, listing_id, transition).await
    }

    /// Actions the signed-in user may take on a cached listing
    pub fn available_transitions(&self, listing_id: i64) -> Vec<Transition> {
        handlers::listings::available_transitions(self, listing_id)
    }

    // ----- Social -----

    pub async fn load_social(&self) -> Result<()> {
        handlers::social::load_social(self).await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>> {
        handlers::social::search_users(self, query).await
    }

    pub async fn send_friend_request(&self, user_id: i64) -> Result<Friend> {
        handlers::social::send_friend_request(self, user_id).await
    }

    pub async fn accept_friend_request(&self, request_id: i64) -> Result<Friend> {
        handlers::social::accept_friend_request(self, request_id).await
    }

    pub async fn reject_friend_request(&self, request_id: i64) -> Result<()> {
        handlers::social::reject_friend_request(self, request_id).await
    }

    pub async fn view_friend_listings(&self, user_id: i64) -> Result<Vec<Listing>> {
        handlers::social::view_friend_listings(self, user_id).await
    }

    // ----- Profile -----

    pub async fn load_profile(&self) -> Result<()> {
        handlers::profile::load_profile(self).await
    }

    pub async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        handlers::profile::upload_avatar(self, file_name, bytes).await
    }
}
