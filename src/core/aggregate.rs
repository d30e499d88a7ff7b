use crate::domain::model::Review;
use serde::Serialize;

/// Summary statistics for one venue's reviews.
///
/// `average_rating` is kept at full precision; rounding for display happens in
/// [`crate::app::display`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub review_count: usize,
}

impl ReviewSummary {
    pub const EMPTY: ReviewSummary = ReviewSummary {
        average_rating: 0.0,
        review_count: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.review_count == 0
    }
}

/// Mean rating and count of `reviews`. An empty slice yields [`ReviewSummary::EMPTY`].
///
/// Every review is counted, including ones sharing an id or timestamp.
pub fn aggregate(reviews: &[Review]) -> ReviewSummary {
    if reviews.is_empty() {
        return ReviewSummary::EMPTY;
    }

    let total: f64 = reviews.iter().map(|review| review.rating.value()).sum();
    ReviewSummary {
        average_rating: total / reviews.len() as f64,
        review_count: reviews.len(),
    }
}
