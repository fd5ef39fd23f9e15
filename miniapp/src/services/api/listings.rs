//! # Listing Endpoints
//!
//! Feed, creation, and the lifecycle transition calls. Each transition
//! returns the updated listing, which replaces the cached copy.

use lib_core::Transition;
use shared::dto::{Listing, ListingCreate, ListingQuery};

use super::client::ApiClient;
use super::error::ApiError;

impl ApiClient {
    /// Fetch listings matching `query`.
    #[tracing::instrument(skip(self, token))]
    pub async fn list_listings(
        &self,
        token: &str,
        query: &ListingQuery,
    ) -> Result<Vec<Listing>, ApiError> {
        let request = self
            .client
            .get(self.url("/listings"))
            .bearer_auth(token)
            .query(query);

        let listings: Vec<Listing> = self.send_json("listings", request).await?;
        tracing::debug!(count = listings.len(), "Listings fetched");
        Ok(listings)
    }

    /// Create a listing.
    #[tracing::instrument(skip(self, token, listing), fields(listing_type = %listing.listing_type, hours = listing.hours))]
    pub async fn create_listing(
        &self,
        token: &str,
        listing: &ListingCreate,
    ) -> Result<Listing, ApiError> {
        let request = self
            .client
            .post(self.url("/listings"))
            .bearer_auth(token)
            .json(listing);

        let created: Listing = self.send_json("listings/create", request).await?;
        tracing::info!(listing_id = created.id, "Listing created");
        Ok(created)
    }

    /// `POST /listings/{id}/{apply|accept|reject|pay|complete|confirm|cancel}`
    #[tracing::instrument(skip(self, token), fields(transition = %transition))]
    pub async fn transition_listing(
        &self,
        token: &str,
        listing_id: i64,
        transition: Transition,
    ) -> Result<Listing, ApiError> {
        let path = format!("/listings/{}/{}", listing_id, transition.path());
        let request = self.client.post(self.url(&path)).bearer_auth(token);

        let listing: Listing = self.send_json("listings/transition", request).await?;
        tracing::info!(listing_id, status = %listing.status, "Transition applied");
        Ok(listing)
    }
}
