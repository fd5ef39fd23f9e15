//! # Listing Rules
//!
//! Validation for new listings and summaries over a user's listing history.

use shared::dto::listing::{Listing, ListingCreate, ListingStatus, ListingType};

use lib_utils::validation::{
    validate_max_length, validate_not_empty, validate_positive_hours, validate_tenths,
};

use crate::error::{CoreError, Result};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Validate a listing before it is sent to the backend.
pub fn validate_new_listing(create: &ListingCreate) -> Result<()> {
    validate_not_empty(&create.title, "Title").map_err(CoreError::InvalidInput)?;
    validate_max_length(&create.title, MAX_TITLE_LEN, "Title").map_err(CoreError::InvalidInput)?;
    validate_not_empty(&create.description, "Description").map_err(CoreError::InvalidInput)?;
    validate_max_length(&create.description, MAX_DESCRIPTION_LEN, "Description")
        .map_err(CoreError::InvalidInput)?;
    validate_positive_hours(create.hours).map_err(CoreError::InvalidInput)?;
    // Settlement splits in tenths; anything finer would not add up
    validate_tenths(create.hours).map_err(CoreError::InvalidInput)?;
    Ok(())
}

/// Warning shown when a request asks for more hours than the cached balance.
///
/// Offers never warn: the creator earns on an offer. The backend has the
/// final say either way.
pub fn balance_warning(create: &ListingCreate, balance: f64) -> Option<String> {
    if create.listing_type == ListingType::Request && balance < create.hours {
        Some(format!(
            "Your balance ({}) is lower than the {} requested",
            shared::format_hours(balance),
            shared::format_hours(create.hours)
        ))
    } else {
        None
    }
}

/// Listing counts shown on a profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingCounts {
    pub completed: usize,
    /// Neither completed nor cancelled
    pub active: usize,
}

/// Count completed and still-open listings a user took part in, as creator or worker.
pub fn count_for_user(listings: &[Listing], user_id: i64) -> ListingCounts {
    listings
        .iter()
        .filter(|l| l.user_id == user_id || l.worker_ref() == Some(user_id))
        .fold(ListingCounts::default(), |mut counts, l| {
            match l.status {
                ListingStatus::Completed => counts.completed += 1,
                ListingStatus::Cancelled => {}
                _ => counts.active += 1,
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(hours: f64, listing_type: ListingType) -> ListingCreate {
        ListingCreate {
            title: "T".to_string(),
            description: "D".to_string(),
            hours,
            listing_type,
            user_id: 1,
        }
    }

    fn listing(id: i64, user_id: i64, worker_id: Option<i64>, status: ListingStatus) -> Listing {
        Listing {
            id,
            user_id,
            worker_id,
            title: "T".to_string(),
            description: "D".to_string(),
            hours: 1.0,
            listing_type: ListingType::Request,
            status,
            created_at: "2024-05-01T10:00:00".to_string(),
            prepayment_transaction_id: None,
            creator: None,
            worker: None,
        }
    }

    #[test]
    fn test_validate_new_listing() {
        assert!(validate_new_listing(&create(3.0, ListingType::Request)).is_ok());

        let mut blank = create(3.0, ListingType::Request);
        blank.title = "  ".to_string();
        assert_eq!(
            validate_new_listing(&blank),
            Err(CoreError::InvalidInput("Title cannot be empty".to_string()))
        );

        assert!(validate_new_listing(&create(0.0, ListingType::Offer)).is_err());
        assert!(validate_new_listing(&create(-1.0, ListingType::Offer)).is_err());
    }

    #[test]
    fn test_hours_must_be_whole_tenths() {
        assert!(validate_new_listing(&create(0.1, ListingType::Request)).is_ok());
        assert!(validate_new_listing(&create(2.3, ListingType::Offer)).is_ok());

        for hours in [0.04, 0.25, 1.05] {
            assert_eq!(
                validate_new_listing(&create(hours, ListingType::Request)),
                Err(CoreError::InvalidInput("Hours must be a multiple of 0.1".to_string())),
                "hours = {}",
                hours
            );
        }
    }

    #[test]
    fn test_balance_warning_only_for_requests() {
        assert!(balance_warning(&create(3.0, ListingType::Request), 1.0).is_some());
        assert!(balance_warning(&create(3.0, ListingType::Request), 3.0).is_none());
        assert!(balance_warning(&create(3.0, ListingType::Offer), 0.0).is_none());
    }

    #[test]
    fn test_count_for_user() {
        let listings = vec![
            listing(1, 1, Some(2), ListingStatus::Completed),
            listing(2, 2, Some(1), ListingStatus::InProgress),
            listing(3, 1, None, ListingStatus::Active),
            listing(4, 1, None, ListingStatus::Cancelled),
            listing(5, 3, Some(4), ListingStatus::Completed),
        ];

        let counts = count_for_user(&listings, 1);

        assert_eq!(counts, ListingCounts { completed: 1, active: 2 });
    }
}
