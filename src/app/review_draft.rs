use crate::app::star_input::StarInput;
use crate::domain::model::{Review, VenueId};
use crate::utils::error::{Result, VenueError};
use chrono::{DateTime, Utc};

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide a rating and review text.";

/// A review being composed on the add-review form.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub stars: StarInput,
    pub text: String,
}

impl ReviewDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.stars.value().is_some() && !self.text.trim().is_empty()
    }

    /// Turns the draft into a [`Review`] stamped with `now`.
    ///
    /// The draft needs a rating and non-blank text; the author name must be
    /// non-blank as well. Text and username are stored trimmed.
    pub fn submit(
        &self,
        id: impl Into<String>,
        venue_id: VenueId,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<Review> {
        let rating = match self.stars.value() {
            Some(rating) if !self.text.trim().is_empty() => rating,
            _ => {
                return Err(VenueError::ValidationError {
                    message: MISSING_FIELDS_MESSAGE.to_string(),
                })
            }
        };

        let username = username.trim();
        if username.is_empty() {
            return Err(VenueError::ValidationError {
                message: "Please log in with a username before submitting a review.".to_string(),
            });
        }

        let review = Review {
            id: id.into(),
            venue_id,
            rating,
            text: self.text.trim().to_string(),
            timestamp: now,
            username: username.to_string(),
        };
        tracing::debug!("Drafted review {} for venue {}", review.id, review.venue_id);
        Ok(review)
    }
}
