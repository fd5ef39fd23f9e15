//! # Backend API Client Module
//!
//! HTTP client for the time-bank backend. Every call takes the bearer token
//! explicitly; the client itself holds no session.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── error.rs        - ApiError and error-body decoding
//! ├── client.rs       - ApiClient struct, response handling, ApiService impl
//! ├── auth.rs         - Telegram exchange, session check, current user
//! ├── listings.rs     - Listing feed, creation and lifecycle transitions
//! ├── friends.rs      - Friend edges and friend requests
//! ├── users.rs        - User search, transaction partners, avatar upload
//! └── transactions.rs - Ledger history
//! ```
//!
//! ## Error Mapping
//!
//! | Outcome | Error |
//! |---|---|
//! | connection refused, timeout | [`ApiError::Network`] |
//! | non-2xx status | [`ApiError::Status`] with the body's `detail` |
//! | 2xx with an unexpected body | [`ApiError::Decode`] |

pub mod auth;
pub mod client;
pub mod error;
pub mod friends;
pub mod listings;
pub mod transactions;
pub mod users;

pub use client::ApiClient;
pub use error::ApiError;
