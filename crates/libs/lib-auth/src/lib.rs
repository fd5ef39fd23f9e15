//! # Authentication Library
//!
//! Session bootstrap for the Mini App: stored bearer tokens, Telegram
//! `initData` exchange, and the ordered strategy chain that tries them.
//!
//! ## Modules
//!
//! - [`token`]: read the claims of a bearer token
//! - [`session`]: where the bearer token lives between runs
//! - [`telegram`]: the data Telegram hands to a Mini App
//! - [`strategy`]: authentication strategies and the first-success chain
//!
//! The client never verifies Telegram signatures or token signatures; both
//! are checked by the backend.

pub mod error;
pub mod session;
pub mod strategy;
pub mod telegram;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, Result};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use strategy::{AuthChain, AuthStrategy, Session, SessionBackend};
pub use telegram::{TelegramContext, TelegramUser};
pub use token::{peek_claims, Claims};
