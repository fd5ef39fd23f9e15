//! # Time Bank Mini App
//!
//! Headless entry point: establishes a session from the Telegram launch
//! context, loads the feed and the profile, and prints a summary.
//!
//! Launch context is read from `TELEGRAM_INIT_DATA` (and, for local
//! development with `ALLOW_UNSAFE_TELEGRAM_AUTH=1`, `TELEGRAM_UNSAFE_USER`).

use std::sync::Arc;

use anyhow::Context;
use lib_auth::{FileSessionStore, MemorySessionStore, SessionStore, TelegramContext};
use lib_core::model::friends::{other_profile, other_side};
use lib_core::model::lifecycle::available_transitions;
use miniapp::app::View;
use miniapp::debug::{init_logger, DebugConfig};
use miniapp::services::api::ApiClient;
use miniapp::App;
use shared::utils::{format_hours, format_username};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logger(&DebugConfig::from_env());

    let config = lib_core::config::init_config().context("Invalid configuration")?;
    let telegram = TelegramContext::from_env().context("Invalid Telegram launch context")?;

    let sessions: Arc<dyn SessionStore> = match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => Arc::new(MemorySessionStore::new()),
    };
    let api = Arc::new(ApiClient::from_config(config));

    tracing::info!(base_url = %api.base_url(), "Starting Mini App");

    let app = App::new(api, sessions, config.clone());

    if let Err(e) = app.bootstrap(&telegram).await {
        println!("{}", View::AuthFailed.title());
        println!("{}", e.user_message());
        return Ok(());
    }

    // Failures already land in the state as alerts
    let _ = app.navigate(View::Profile).await;
    let _ = app.navigate(View::Listings).await;

    let state = app.snapshot();
    if let Some(me) = state.current_user() {
        println!(
            "{} | balance {} | earned {} | spent {}",
            format_username(&me.username),
            format_hours(me.balance),
            format_hours(me.earned_hours),
            format_hours(me.spent_hours)
        );
        println!(
            "{} completed, {} active, {} friends, {} pending requests",
            state.profile.counts.completed,
            state.profile.counts.active,
            state.social.graph.friends().len(),
            state.social.graph.incoming().len()
        );

        println!("\n{}", View::Listings.title());
        for listing in &state.listings.items {
            let actions: Vec<&str> = available_transitions(listing, me.id)
                .iter()
                .map(|t| t.label())
                .collect();
            println!(
                "  #{} [{}] {} ({}, {}) {}",
                listing.id,
                listing.listing_type,
                listing.title,
                format_hours(listing.hours),
                listing.status,
                actions.join(" / ")
            );
        }
    }

    if let Some(me) = state.current_user() {
        let friends = state.social.graph.friends();
        if !friends.is_empty() {
            println!("\nFriends");
            for edge in friends {
                let name = match other_profile(edge, me.id) {
                    Some(profile) => format_username(&profile.username),
                    None => format!("user #{}", other_side(edge, me.id)),
                };
                println!("  {}", name);
            }
        }
    }

    if !state.profile.transactions.is_empty() {
        println!("\nHistory");
        for tx in state.profile.transactions.iter().take(10) {
            println!(
                "  {} {:?} {} ({})",
                short_date(&tx.created_at),
                tx.transaction_type,
                format_hours(tx.hours),
                tx.description
            );
        }
    }

    for alert in &state.alerts {
        println!("! {}", alert.message);
    }

    Ok(())
}

/// `YYYY-MM-DD`, or the raw value if the backend sent something unexpected
fn short_date(moment: &str) -> String {
    lib_utils::parse_timestamp(moment)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| moment.to_string())
}
