use crate::domain::model::{Review, VenueId, VenueProfile};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of venue and review data.
///
/// The ranking core never talks to a provider itself; a [`TrendingEngine`]
/// fetches everything up front and then hands plain collections to the core.
/// Swapping the sample fixtures for a real backend only means swapping the
/// implementation of this trait.
///
/// [`TrendingEngine`]: crate::core::engine::TrendingEngine
#[async_trait]
pub trait VenueProvider: Send + Sync {
    async fn venues(&self) -> Result<Vec<VenueProfile>>;

    /// Reviews for one venue in insertion order. Unknown ids yield an empty list.
    async fn reviews_for_venue(&self, id: &VenueId) -> Result<Vec<Review>>;
}

#[async_trait]
impl<P: VenueProvider + ?Sized> VenueProvider for std::sync::Arc<P> {
    async fn venues(&self) -> Result<Vec<VenueProfile>> {
        (**self).venues().await
    }

    async fn reviews_for_venue(&self, id: &VenueId) -> Result<Vec<Review>> {
        (**self).reviews_for_venue(id).await
    }
}
