//! # State Reducer
//!
//! [`reduce`] is the only way [`AppState`] changes. It is pure: the next
//! state depends only on the previous state and the event, so every screen
//! can be reproduced from a recorded event sequence.

use lib_core::model::friends::FriendGraph;
use lib_core::model::listing::count_for_user;
use shared::dto::{FriendStatus, Listing};

use crate::app::events::AppEvent;
use crate::app::state::{AppState, ListingFilter, SessionState, SocialState, View};

pub fn reduce(mut state: AppState, event: AppEvent) -> AppState {
    match event {
        // ----- Session -----
        AppEvent::SessionEstablished(session) => {
            let me = session.user.id;
            AppState {
                view: View::Menu,
                session: session.into(),
                social: SocialState {
                    graph: FriendGraph::new(me),
                    ..Default::default()
                },
                ..Default::default()
            }
        }
        AppEvent::SessionFailed(reason) => AppState {
            view: View::AuthFailed,
            session: SessionState::Failed { reason },
            ..Default::default()
        },
        AppEvent::LoggedOut => AppState {
            view: View::AuthFailed,
            session: SessionState::Failed {
                reason: "You have been logged out".to_string(),
            },
            ..Default::default()
        },
        AppEvent::ProfileUpdated(profile) => {
            if let SessionState::Authenticated { user, .. } = &mut state.session {
                if user.id == profile.id {
                    *user = profile;
                }
            }
            state
        }
        AppEvent::AvatarUploaded(url) => {
            if let SessionState::Authenticated { user, .. } = &mut state.session {
                user.avatar = Some(url);
            }
            state
        }

        // ----- Navigation -----
        AppEvent::Navigated(view) => {
            state.view = if view.requires_auth() && !state.is_authenticated() {
                View::AuthFailed
            } else {
                view
            };
            state
        }

        // ----- Listings -----
        AppEvent::FilterChanged(filter) => {
            state.listings.filter = filter;
            state
        }
        AppEvent::ListingsLoaded {
            listings,
            page_size,
        } => {
            state.listings.has_more = listings.len() >= page_size as usize;
            state.listings.items = listings;
            state
        }
        AppEvent::ListingsAppended {
            listings,
            page_size,
        } => {
            state.listings.has_more = listings.len() >= page_size as usize;
            for listing in listings {
                if !state.listings.items.iter().any(|l| l.id == listing.id) {
                    state.listings.items.push(listing);
                }
            }
            state
        }
        AppEvent::ListingCreated(listing) => {
            if matches_filter(&state.listings.filter, &listing) {
                state.listings.items.insert(0, listing.clone());
            }
            state.profile.own_listings.insert(0, listing);
            recount(&mut state);
            state
        }
        AppEvent::TransitionStarted(listing_id) => {
            state.in_flight.insert(listing_id);
            state
        }
        AppEvent::TransitionSucceeded(listing) => {
            state.in_flight.remove(&listing.id);
            merge_listing(&mut state.listings.items, &listing);
            merge_listing(&mut state.profile.own_listings, &listing);
            if let Some((_, listings)) = &mut state.social.friend_listings {
                merge_listing(listings, &listing);
            }
            recount(&mut state);
            state
        }
        AppEvent::TransitionFailed(listing_id) => {
            state.in_flight.remove(&listing_id);
            state
        }

        // ----- Social -----
        AppEvent::FriendsLoaded(edges) => {
            state.social.graph.replace_status(FriendStatus::Accepted, edges);
            state
        }
        AppEvent::FriendRequestsLoaded(edges) => {
            state.social.graph.replace_incoming(edges);
            state
        }
        AppEvent::FriendEdgeUpdated(edge) => {
            state.social.graph.upsert(edge);
            state
        }
        AppEvent::FriendEdgeRemoved(edge_id) => {
            state.social.graph.remove(edge_id);
            state
        }
        AppEvent::SearchResults { query, users } => {
            let me = state.current_user().map(|u| u.id);
            state.social.search_query = query;
            state.social.search_results = users
                .into_iter()
                .filter(|u| Some(u.id) != me)
                .collect();
            state
        }
        AppEvent::PartnersLoaded(partners) => {
            state.social.partners = partners;
            state
        }
        AppEvent::FriendListingsLoaded { user_id, listings } => {
            state.social.friend_listings = Some((user_id, listings));
            state
        }

        // ----- Profile -----
        AppEvent::OwnListingsLoaded(listings) => {
            state.profile.own_listings = listings;
            recount(&mut state);
            state
        }
        AppEvent::TransactionsLoaded(transactions) => {
            state.profile.transactions = transactions;
            state
        }

        // ----- Alerts -----
        AppEvent::AlertRaised(alert) => {
            state.alerts.push(alert);
            state
        }
        AppEvent::AlertDismissed => {
            if !state.alerts.is_empty() {
                state.alerts.remove(0);
            }
            state
        }
    }
}

fn matches_filter(filter: &ListingFilter, listing: &Listing) -> bool {
    filter.status.is_none_or(|s| s == listing.status)
        && filter.listing_type.is_none_or(|t| t == listing.listing_type)
}

/// Replace the cached copy of `listing`, if there is one.
fn merge_listing(listings: &mut [Listing], listing: &Listing) {
    if let Some(slot) = listings.iter_mut().find(|l| l.id == listing.id) {
        *slot = listing.clone();
    }
}

fn recount(state: &mut AppState) {
    if let Some(me) = state.current_user().map(|u| u.id) {
        state.profile.counts = count_for_user(&state.profile.own_listings, me);
    }
}
