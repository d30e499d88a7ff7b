use crate::app::search::matches_query;
use crate::core::aggregate::{aggregate, ReviewSummary};
use crate::core::trending::rank_by_trend;
use crate::domain::model::{Venue, VenueId, VenueProfile};
use crate::domain::ports::VenueProvider;
use crate::utils::error::{Result, VenueError};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingEntry {
    pub venue: Venue,
    pub summary: ReviewSummary,
    pub trend_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetails {
    pub venue: Venue,
    pub summary: ReviewSummary,
}

/// Loads venues through a [`VenueProvider`] and runs them through the pure
/// aggregation and ranking functions.
pub struct TrendingEngine<P: VenueProvider> {
    provider: P,
}

impl<P: VenueProvider> TrendingEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches every venue profile and then its reviews.
    pub async fn load_venues(&self) -> Result<Vec<Venue>> {
        let profiles = self.provider.venues().await?;
        tracing::debug!("Fetched {} venue profiles", profiles.len());

        let mut venues = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let reviews = self.provider.reviews_for_venue(&profile.id).await?;
            tracing::debug!("Venue {} has {} reviews", profile.id, reviews.len());
            venues.push(Venue::new(profile, reviews));
        }
        Ok(venues)
    }

    /// All venues ordered by descending trend score as of `now`.
    pub async fn trending(&self, now: DateTime<Utc>) -> Result<Vec<TrendingEntry>> {
        let venues = self.load_venues().await?;
        tracing::info!("Ranking {} venues as of {}", venues.len(), now.to_rfc3339());

        let entries: Vec<TrendingEntry> = rank_by_trend(now, &venues)
            .into_iter()
            .map(|ranked| TrendingEntry {
                venue: ranked.venue.clone(),
                summary: ranked.summary,
                trend_score: ranked.trend_score,
            })
            .collect();

        if let Some(top) = entries.first() {
            tracing::debug!("Top venue: {} ({:.2})", top.venue.name(), top.trend_score);
        }
        Ok(entries)
    }

    pub async fn venue_details(&self, id: &VenueId) -> Result<VenueDetails> {
        let profile = self
            .provider
            .venues()
            .await?
            .into_iter()
            .find(|profile| &profile.id == id)
            .ok_or_else(|| VenueError::VenueNotFound { id: id.to_string() })?;

        let reviews = self.provider.reviews_for_venue(id).await?;
        let summary = aggregate(&reviews);
        Ok(VenueDetails {
            venue: Venue::new(profile, reviews),
            summary,
        })
    }

    /// Profiles whose name contains `query`, ignoring case. A blank query matches all.
    pub async fn search(&self, query: &str) -> Result<Vec<VenueProfile>> {
        let matches: Vec<VenueProfile> = self
            .provider
            .venues()
            .await?
            .into_iter()
            .filter(|profile| matches_query(&profile.name, query))
            .collect();
        tracing::debug!("Search '{}' matched {} venues", query, matches.len());
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Rating, Review};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        profiles: Vec<VenueProfile>,
        reviews: HashMap<VenueId, Vec<Review>>,
        review_calls: AtomicUsize,
    }

    #[async_trait]
    impl VenueProvider for CountingProvider {
        async fn venues(&self) -> Result<Vec<VenueProfile>> {
            Ok(self.profiles.clone())
        }

        async fn reviews_for_venue(&self, id: &VenueId) -> Result<Vec<Review>> {
            self.review_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reviews.get(id).cloned().unwrap_or_default())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl VenueProvider for FailingProvider {
        async fn venues(&self) -> Result<Vec<VenueProfile>> {
            Err(VenueError::ProviderError {
                message: "backend unavailable".to_string(),
            })
        }

        async fn reviews_for_venue(&self, _id: &VenueId) -> Result<Vec<Review>> {
            Ok(Vec::new())
        }
    }

    fn profile(id: &str, name: &str) -> VenueProfile {
        VenueProfile {
            id: id.into(),
            name: name.to_string(),
            maps_url: None,
            dimension_scores: Default::default(),
        }
    }

    fn review(id: &str, venue: &str, rating: f64, day: u32) -> Review {
        Review {
            id: id.to_string(),
            venue_id: venue.into(),
            rating: Rating::new(rating).unwrap(),
            text: "text".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap(),
            username: "user".to_string(),
        }
    }

    fn provider() -> CountingProvider {
        let mut reviews = HashMap::new();
        reviews.insert(VenueId::from("a"), vec![review("r1", "a", 2.0, 1)]);
        reviews.insert(
            VenueId::from("b"),
            vec![review("r2", "b", 5.0, 1), review("r3", "b", 4.0, 2)],
        );
        CountingProvider {
            profiles: vec![profile("a", "Alpha Bar"), profile("b", "Beta Club"), profile("c", "Gamma")],
            reviews,
            review_calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_load_venues_fetches_reviews_per_venue() {
        let engine = TrendingEngine::new(provider());
        let venues = engine.load_venues().await.unwrap();
        assert_eq!(venues.len(), 3);
        assert_eq!(venues[1].reviews.len(), 2);
        assert!(venues[2].reviews.is_empty());
        assert_eq!(engine.provider().review_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_trending_orders_entries() {
        let engine = TrendingEngine::new(provider());
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let entries = engine.trending(now).await.unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.venue.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(entries[0].summary.review_count, 2);
        assert_eq!(entries[2].trend_score, 0.0);
    }

    #[tokio::test]
    async fn test_venue_details_and_not_found() {
        let engine = TrendingEngine::new(provider());
        let details = engine.venue_details(&VenueId::from("b")).await.unwrap();
        assert_eq!(details.venue.name(), "Beta Club");
        assert_eq!(details.summary.average_rating, 4.5);

        let missing = engine.venue_details(&VenueId::from("zzz")).await;
        assert!(matches!(missing, Err(VenueError::VenueNotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let engine = TrendingEngine::new(provider());
        let found = engine.search("CLUB").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, VenueId::from("b"));
        assert_eq!(engine.search("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let engine = TrendingEngine::new(FailingProvider);
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let result = engine.trending(now).await;
        assert!(matches!(result, Err(VenueError::ProviderError { .. })));
    }
}
