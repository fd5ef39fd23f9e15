//! # Listing Data Transfer Objects
//!
//! Requests and offers of help, denominated in hours, plus the query and
//! creation payloads used by the listings endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::UserProfile;

/// Which side of the exchange the creator is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    /// Creator needs help and pays for it
    Request,
    /// Creator offers help and gets paid for it
    Offer,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Request => "request",
            ListingType::Offer => "offer",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    PendingWorker,
    PendingPayment,
    InProgress,
    PendingConfirmation,
    Completed,
    Cancelled,
}

impl ListingStatus {
    /// All statuses in lifecycle order
    pub fn all() -> &'static [ListingStatus] {
        &[
            ListingStatus::Active,
            ListingStatus::PendingWorker,
            ListingStatus::PendingPayment,
            ListingStatus::InProgress,
            ListingStatus::PendingConfirmation,
            ListingStatus::Completed,
            ListingStatus::Cancelled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::PendingWorker => "pending_worker",
            ListingStatus::PendingPayment => "pending_payment",
            ListingStatus::InProgress => "in_progress",
            ListingStatus::PendingConfirmation => "pending_confirmation",
            ListingStatus::Completed => "completed",
            ListingStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses are retained but never left again
    pub fn is_terminal(&self) -> bool {
        matches!(self, ListingStatus::Completed | ListingStatus::Cancelled)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub worker_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub hours: f64,
    pub listing_type: ListingType,
    pub status: ListingStatus,
    pub created_at: String,
    #[serde(default)]
    pub prepayment_transaction_id: Option<i64>,
    #[serde(default)]
    pub creator: Option<UserProfile>,
    #[serde(default)]
    pub worker: Option<UserProfile>,
}

impl Listing {
    /// Id of the assigned worker, read from the embedded profile when the
    /// flat column is missing.
    pub fn worker_ref(&self) -> Option<i64> {
        self.worker_id.or_else(|| self.worker.as_ref().map(|w| w.id))
    }
}

/// Payload of `POST /listings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingCreate {
    pub title: String,
    pub description: String,
    pub hours: f64,
    pub listing_type: ListingType,
    pub user_id: i64,
}

/// Filters for `GET /listings`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}
