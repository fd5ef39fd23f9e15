//! # Time Bank Mini App - Library Root
//!
//! Client for an hour-denominated time-banking marketplace that runs as a
//! Telegram Mini App. Users post requests for help and offers of help,
//! priced in hours; the backend moves hours between balances as listings
//! progress through their lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              miniapp (this crate)                      │
//! ├────────────────────────────────────────────────────────┤
//! │  app       - AppState, reducer, action handlers        │
//! │  core      - AppError, ApiService trait                │
//! │  services  - reqwest client for the backend API        │
//! │  debug     - tracing subscriber, trace ids             │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ lib-core                     │ lib-auth
//!          ▼                              ▼
//! ┌─────────────────────────┐  ┌─────────────────────────┐
//! │ lifecycle, settlement,  │  │ stored session, Telegram│
//! │ friend graph, config    │  │ init data, auth chain   │
//! └─────────────────────────┘  └─────────────────────────┘
//! ```
//!
//! The backend is authoritative for every state change. The client checks
//! actions locally only to decide what to offer and to skip requests that
//! are bound to fail.
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = lib_core::config::init_config()?;
//! let api = Arc::new(ApiClient::from_config(config));
//! let app = App::new(api, Arc::new(MemorySessionStore::new()), config.clone());
//!
//! app.bootstrap(&TelegramContext::from_env()?).await?;
//! app.navigate(View::Listings).await?;
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;

pub use app::{App, AppState, View};
pub use core::{AppError, Result};
