use crate::domain::model::{Dataset, Review, VenueId, VenueProfile};
use crate::domain::ports::VenueProvider;
use crate::utils::error::{Result, VenueError};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

const SAMPLE_DATASET: &str = include_str!("../../data/sample_venues.json");

/// The bundled demo dataset: four venues and their reviews from early June 2024.
pub fn sample_dataset() -> Result<Dataset> {
    Dataset::from_json_str(SAMPLE_DATASET)
}

/// Serves a validated [`Dataset`] from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    profiles: Vec<VenueProfile>,
    reviews: HashMap<VenueId, Vec<Review>>,
}

impl InMemoryProvider {
    /// Validates every entity and files each review under its venue.
    ///
    /// Fails on duplicate venue ids, invalid entities, or reviews that point
    /// at a venue the dataset does not contain.
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let mut known = HashSet::new();
        for profile in &dataset.venues {
            profile.validate()?;
            if !known.insert(profile.id.clone()) {
                return Err(VenueError::ValidationError {
                    message: format!("Duplicate venue id '{}'", profile.id),
                });
            }
        }

        let mut reviews: HashMap<VenueId, Vec<Review>> = HashMap::new();
        for review in dataset.reviews {
            review.validate()?;
            if !known.contains(&review.venue_id) {
                return Err(VenueError::ValidationError {
                    message: format!(
                        "Review '{}' refers to unknown venue '{}'",
                        review.id, review.venue_id
                    ),
                });
            }
            reviews.entry(review.venue_id.clone()).or_default().push(review);
        }

        tracing::debug!(
            "Loaded {} venues and {} reviews",
            dataset.venues.len(),
            reviews.values().map(Vec::len).sum::<usize>()
        );

        Ok(Self {
            profiles: dataset.venues,
            reviews,
        })
    }

    pub fn sample() -> Result<Self> {
        Self::from_dataset(sample_dataset()?)
    }

    pub fn venue_count(&self) -> usize {
        self.profiles.len()
    }
}

#[async_trait]
impl VenueProvider for InMemoryProvider {
    async fn venues(&self) -> Result<Vec<VenueProfile>> {
        Ok(self.profiles.clone())
    }

    async fn reviews_for_venue(&self, id: &VenueId) -> Result<Vec<Review>> {
        Ok(self.reviews.get(id).cloned().unwrap_or_default())
    }
}
