//! # Domain Model
//!
//! Pure rules over the wire types in `shared`. Nothing here performs I/O.

pub mod friends;
pub mod lifecycle;
pub mod listing;
pub mod settlement;
