//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Mini App client and the
//! time-bank backend API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Telegram session exchange
//!   - **[`dto::user`]**: Profiles and avatars
//!   - **[`dto::listing`]**: Listings, statuses and listing types
//!   - **[`dto::friends`]**: Friend edges
//!   - **[`dto::transaction`]**: Ledger history
//! - **[`utils`]**: Display helpers for hours and usernames
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::listing::{Listing, ListingStatus};
//!
//! let body = r#"[{"id": 1, "user_id": 7, "title": "T", "description": "D",
//!     "hours": 3.0, "listing_type": "request", "status": "active",
//!     "created_at": "2024-05-01T10:00:00+00:00"}]"#;
//! let listings: Vec<Listing> = serde_json::from_str(body).unwrap();
//!
//! let open = listings.iter().filter(|l| l.status == ListingStatus::Active).count();
//! assert_eq!(open, 1);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library and everything here is public API
pub use dto::*;
pub use utils::*;
