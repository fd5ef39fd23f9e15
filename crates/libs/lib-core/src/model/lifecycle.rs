//! # Listing Lifecycle
//!
//! Reference state machine for listing transitions. The backend is the
//! authority; the client uses this module to decide which actions to offer
//! a viewer and to describe the expected outcome of a transition.
//!
//! ## States
//!
//! ```text
//!  active ──apply──▶ pending_worker ──accept──▶ pending_payment ──pay──▶ in_progress
//!    ▲                     │                                              │
//!    └──────reject─────────┘                                          complete
//!                                                                         ▼
//!  cancelled ◀──cancel── (active | pending_worker)   completed ◀──confirm── pending_confirmation
//! ```
//!
//! ## Actors
//!
//! | Transition | Allowed actor |
//! |---|---|
//! | `apply` | anyone but the creator |
//! | `accept`, `reject`, `cancel` | creator |
//! | `pay` | assigned worker |
//! | `complete` | fulfilling party: worker on a request, creator on an offer |
//! | `confirm` | receiving party: creator on a request, worker on an offer |
//!
//! `pay` moves the 33% deposit from debtor to creditor, `confirm` moves the
//! remainder. See [`crate::model::settlement`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use lib_core::model::lifecycle::{apply, Transition};
//!
//! let outcome = apply(&listing, worker_id, Transition::Apply)?;
//! assert_eq!(outcome.listing.status, ListingStatus::PendingWorker);
//! ```

use std::fmt;

use shared::dto::listing::{Listing, ListingStatus, ListingType};

use crate::error::{CoreError, Result};
use crate::model::settlement::{deposit_transfer, settlement_transfer, Transfer};

/// A user-triggered lifecycle operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Apply,
    Accept,
    Reject,
    Pay,
    Complete,
    Confirm,
    Cancel,
}

impl Transition {
    pub fn all() -> &'static [Transition] {
        &[
            Transition::Apply,
            Transition::Accept,
            Transition::Reject,
            Transition::Pay,
            Transition::Complete,
            Transition::Confirm,
            Transition::Cancel,
        ]
    }

    /// Final path segment of `POST /listings/{id}/{segment}`
    pub fn path(&self) -> &'static str {
        match self {
            Transition::Apply => "apply",
            Transition::Accept => "accept",
            Transition::Reject => "reject",
            Transition::Pay => "pay",
            Transition::Complete => "complete",
            Transition::Confirm => "confirm",
            Transition::Cancel => "cancel",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Transition::Apply => "Apply",
            Transition::Accept => "Accept worker",
            Transition::Reject => "Reject worker",
            Transition::Pay => "Pay deposit",
            Transition::Complete => "Mark as done",
            Transition::Confirm => "Confirm completion",
            Transition::Cancel => "Cancel listing",
        }
    }

    /// Statuses the listing must be in for this transition
    pub fn required_statuses(&self) -> &'static [ListingStatus] {
        match self {
            Transition::Apply => &[ListingStatus::Active],
            Transition::Accept | Transition::Reject => &[ListingStatus::PendingWorker],
            Transition::Pay => &[ListingStatus::PendingPayment],
            Transition::Complete => &[ListingStatus::InProgress],
            Transition::Confirm => &[ListingStatus::PendingConfirmation],
            Transition::Cancel => &[ListingStatus::Active, ListingStatus::PendingWorker],
        }
    }

    /// Status after a successful transition
    pub fn target(&self) -> ListingStatus {
        match self {
            Transition::Apply => ListingStatus::PendingWorker,
            Transition::Accept => ListingStatus::PendingPayment,
            Transition::Reject => ListingStatus::Active,
            Transition::Pay => ListingStatus::InProgress,
            Transition::Complete => ListingStatus::PendingConfirmation,
            Transition::Confirm => ListingStatus::Completed,
            Transition::Cancel => ListingStatus::Cancelled,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Who may trigger a transition, relative to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Creator,
    Worker,
    /// Anyone except the creator
    Outsider,
}

impl Party {
    fn describe(&self) -> &'static str {
        match self {
            Party::Creator => "the listing creator",
            Party::Worker => "the assigned worker",
            Party::Outsider => "someone other than the creator",
        }
    }
}

/// Party that does the work: the worker on a request, the creator on an offer
pub fn fulfilling_party(listing_type: ListingType) -> Party {
    match listing_type {
        ListingType::Request => Party::Worker,
        ListingType::Offer => Party::Creator,
    }
}

/// Party that receives the work: the creator on a request, the worker on an offer
pub fn receiving_party(listing_type: ListingType) -> Party {
    match listing_type {
        ListingType::Request => Party::Creator,
        ListingType::Offer => Party::Worker,
    }
}

/// Party allowed to trigger `transition` on a listing of `listing_type`
pub fn permitted_party(transition: Transition, listing_type: ListingType) -> Party {
    match transition {
        Transition::Apply => Party::Outsider,
        Transition::Accept | Transition::Reject | Transition::Cancel => Party::Creator,
        Transition::Pay => Party::Worker,
        Transition::Complete => fulfilling_party(listing_type),
        Transition::Confirm => receiving_party(listing_type),
    }
}

fn is_party(listing: &Listing, actor: i64, party: Party) -> bool {
    match party {
        Party::Creator => listing.user_id == actor,
        Party::Worker => listing.worker_ref() == Some(actor),
        Party::Outsider => listing.user_id != actor,
    }
}

/// Check that `actor` may trigger `transition` on `listing` right now.
///
/// The status precondition is checked first, then the actor.
pub fn authorize(listing: &Listing, actor: i64, transition: Transition) -> Result<()> {
    if !transition.required_statuses().contains(&listing.status) {
        return Err(CoreError::InvalidTransition(format!(
            "Cannot {} a listing that is {}",
            transition, listing.status
        )));
    }

    let party = permitted_party(transition, listing.listing_type);
    if !is_party(listing, actor, party) {
        return Err(CoreError::Forbidden(format!(
            "Only {} can {} this listing",
            party.describe(),
            transition
        )));
    }

    Ok(())
}

/// Result of applying a transition
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub listing: Listing,
    /// Hour movements the transition causes, debtor to creditor
    pub transfers: Vec<Transfer>,
}

/// Apply `transition` by `actor` to a copy of `listing`.
///
/// The input is never modified; on error nothing changes.
pub fn apply(listing: &Listing, actor: i64, transition: Transition) -> Result<Outcome> {
    authorize(listing, actor, transition)?;

    let mut next = listing.clone();
    let mut transfers = Vec::new();

    match transition {
        Transition::Apply => {
            next.worker_id = Some(actor);
        }
        Transition::Reject => {
            next.worker_id = None;
            next.worker = None;
        }
        Transition::Pay => {
            let transfer = deposit_transfer(listing).ok_or_else(|| {
                CoreError::InvalidTransition("Listing has no assigned worker".to_string())
            })?;
            transfers.push(transfer);
        }
        Transition::Confirm => {
            let transfer = settlement_transfer(listing).ok_or_else(|| {
                CoreError::InvalidTransition("Listing has no assigned worker".to_string())
            })?;
            transfers.push(transfer);
        }
        Transition::Accept | Transition::Complete | Transition::Cancel => {}
    }

    next.status = transition.target();
    check_invariants(&next)?;

    Ok(Outcome {
        listing: next,
        transfers,
    })
}

/// Transitions `viewer` may trigger on `listing`, in lifecycle order.
pub fn available_transitions(listing: &Listing, viewer: i64) -> Vec<Transition> {
    Transition::all()
        .iter()
        .copied()
        .filter(|t| authorize(listing, viewer, *t).is_ok())
        .collect()
}

/// Structural invariants every listing satisfies.
///
/// - hours are positive
/// - no worker while `active`
/// - a worker once past `active` (except `cancelled`, which may or may not have one)
/// - the worker is never the creator
pub fn check_invariants(listing: &Listing) -> Result<()> {
    if !(listing.hours.is_finite() && listing.hours > 0.0) {
        return Err(CoreError::InvalidInput(format!(
            "Listing {} has non-positive hours",
            listing.id
        )));
    }

    let worker = listing.worker_ref();
    match (listing.status, worker) {
        (ListingStatus::Active, Some(_)) => Err(CoreError::InvalidInput(format!(
            "Active listing {} has a worker",
            listing.id
        ))),
        (ListingStatus::Cancelled, _) | (ListingStatus::Active, None) => Ok(()),
        (status, None) => Err(CoreError::InvalidInput(format!(
            "Listing {} is {} without a worker",
            listing.id, status
        ))),
        (_, Some(worker_id)) if worker_id == listing.user_id => Err(CoreError::InvalidInput(
            format!("Listing {} is assigned to its creator", listing.id),
        )),
        _ => Ok(()),
    }
}
