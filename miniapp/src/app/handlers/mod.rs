//! # Action Handlers
//!
//! Handlers organized by domain. Each one is called through the matching
//! [`crate::app::App`] method, runs inside an action span, and reports its
//! own failures through [`crate::app::App::report`].

pub mod listings;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod social;
