//! # Settlement
//!
//! Splits a listing's hours into the deposit paid when work starts and the
//! settlement paid on confirmation, and decides who pays whom.
//!
//! Amounts are computed in integer tenths of an hour so that
//! `deposit + settlement == total` holds exactly.
//!
//! | Listing type | Debtor (pays) | Creditor (earns) |
//! |---|---|---|
//! | `request` | creator | worker |
//! | `offer` | worker | creator |

use shared::dto::listing::{Listing, ListingType};
use shared::dto::transaction::TransactionType;

/// Deposit share of the total, in percent
pub const DEPOSIT_PERCENT: i64 = 33;

/// Convert hours to whole tenths, rounding half away from zero.
pub fn hours_to_tenths(hours: f64) -> i64 {
    (hours * 10.0).round() as i64
}

pub fn tenths_to_hours(tenths: i64) -> f64 {
    tenths as f64 / 10.0
}

/// Deposit/settlement split of a listing's hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub total: f64,
    /// Paid when the worker starts (`pay`)
    pub deposit: f64,
    /// Paid when the receiving party confirms (`confirm`)
    pub settlement: f64,
}

impl Settlement {
    /// Split `hours` into a 33% deposit (rounded half-up to one decimal)
    /// and the remainder.
    ///
    /// `hours` is a whole number of tenths; new listings with finer amounts
    /// are refused by [`validate_new_listing`](crate::model::listing::validate_new_listing).
    ///
    /// ```rust
    /// use lib_core::Settlement;
    ///
    /// let split = Settlement::split(10.0);
    /// assert_eq!(split.deposit, 3.3);
    /// assert_eq!(split.settlement, 6.7);
    /// ```
    pub fn split(hours: f64) -> Self {
        let total = hours_to_tenths(hours).max(0);
        let deposit = (total * DEPOSIT_PERCENT + 50) / 100;
        let settlement = total - deposit;

        Self {
            total: tenths_to_hours(total),
            deposit: tenths_to_hours(deposit),
            settlement: tenths_to_hours(settlement),
        }
    }
}

/// A movement of hours between two users.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub hours: f64,
    pub kind: TransactionType,
}

/// User who pays for the work. `None` until a worker is assigned on offers.
pub fn debtor(listing: &Listing) -> Option<i64> {
    match listing.listing_type {
        ListingType::Request => Some(listing.user_id),
        ListingType::Offer => listing.worker_ref(),
    }
}

/// User who earns for the work. `None` until a worker is assigned on requests.
pub fn creditor(listing: &Listing) -> Option<i64> {
    match listing.listing_type {
        ListingType::Request => listing.worker_ref(),
        ListingType::Offer => Some(listing.user_id),
    }
}

/// Deposit transfer emitted by `pay`.
pub fn deposit_transfer(listing: &Listing) -> Option<Transfer> {
    Some(Transfer {
        from_user_id: debtor(listing)?,
        to_user_id: creditor(listing)?,
        hours: Settlement::split(listing.hours).deposit,
        kind: TransactionType::Prepayment,
    })
}

/// Settlement transfer emitted by `confirm`.
pub fn settlement_transfer(listing: &Listing) -> Option<Transfer> {
    Some(Transfer {
        from_user_id: debtor(listing)?,
        to_user_id: creditor(listing)?,
        hours: Settlement::split(listing.hours).settlement,
        kind: TransactionType::Payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::listing::ListingStatus;

    fn listing(listing_type: ListingType, worker_id: Option<i64>) -> Listing {
        Listing {
            id: 1,
            user_id: 10,
            worker_id,
            title: "Garden".to_string(),
            description: "Weeding".to_string(),
            hours: 3.0,
            listing_type,
            status: ListingStatus::InProgress,
            created_at: "2024-05-01T10:00:00".to_string(),
            prepayment_transaction_id: None,
            creator: None,
            worker: None,
        }
    }

    // ========== Split ==========

    #[test]
    fn test_split_three_hours() {
        let split = Settlement::split(3.0);
        assert_eq!(split.deposit, 1.0);
        assert_eq!(split.settlement, 2.0);
    }

    #[test]
    fn test_split_ten_hours() {
        let split = Settlement::split(10.0);
        assert_eq!(split.deposit, 3.3);
        assert_eq!(split.settlement, 6.7);
    }

    #[test]
    fn test_split_parts_sum_to_total() {
        for tenths in 1..=500 {
            let hours = tenths_to_hours(tenths);
            let split = Settlement::split(hours);
            assert_eq!(
                hours_to_tenths(split.deposit) + hours_to_tenths(split.settlement),
                tenths,
                "split of {} h drifted",
                hours
            );
        }
    }

    #[test]
    fn test_split_rounds_half_up() {
        // 1.5 h * 0.33 = 0.495 -> 0.5
        assert_eq!(Settlement::split(1.5).deposit, 0.5);
        // 0.5 h * 0.33 = 0.165 -> 0.2
        assert_eq!(Settlement::split(0.5).deposit, 0.2);
        // 0.1 h * 0.33 = 0.033 -> 0.0
        assert_eq!(Settlement::split(0.1).deposit, 0.0);
    }

    // ========== Direction ==========

    #[test]
    fn test_request_creator_pays_worker() {
        let l = listing(ListingType::Request, Some(20));
        let transfer = deposit_transfer(&l).unwrap();

        assert_eq!(transfer.from_user_id, 10);
        assert_eq!(transfer.to_user_id, 20);
        assert_eq!(transfer.hours, 1.0);
        assert_eq!(transfer.kind, TransactionType::Prepayment);
    }

    #[test]
    fn test_offer_worker_pays_creator() {
        let l = listing(ListingType::Offer, Some(20));
        let transfer = settlement_transfer(&l).unwrap();

        assert_eq!(transfer.from_user_id, 20);
        assert_eq!(transfer.to_user_id, 10);
        assert_eq!(transfer.hours, 2.0);
        assert_eq!(transfer.kind, TransactionType::Payment);
    }

    #[test]
    fn test_no_transfer_without_worker() {
        assert!(deposit_transfer(&listing(ListingType::Request, None)).is_none());
        assert!(deposit_transfer(&listing(ListingType::Offer, None)).is_none());
    }
}
