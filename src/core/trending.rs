use crate::core::aggregate::{aggregate, ReviewSummary};
use crate::domain::model::{Review, Venue};
use chrono::{DateTime, Duration, Utc};

/// Reviews younger than this many days count as recent activity.
pub const RECENCY_WINDOW_DAYS: i64 = 7;
/// Points per recent review. Recent activity dominates the score.
pub const RECENT_WEIGHT: f64 = 2.0;
/// Points per star of average rating.
pub const RATING_WEIGHT: f64 = 3.0;
/// Points per review of any age.
pub const COUNT_WEIGHT: f64 = 1.0;

/// The trend formula's knobs in one place.
///
/// `Default` is the canonical tuning built from the constants above; ranked
/// output is only comparable between runs that use the same weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendWeights {
    pub recency_window: Duration,
    pub recent_weight: f64,
    pub rating_weight: f64,
    pub count_weight: f64,
}

impl Default for TrendWeights {
    fn default() -> Self {
        Self {
            recency_window: Duration::days(RECENCY_WINDOW_DAYS),
            recent_weight: RECENT_WEIGHT,
            rating_weight: RATING_WEIGHT,
            count_weight: COUNT_WEIGHT,
        }
    }
}

impl TrendWeights {
    /// Whether a review written at `timestamp` is recent as of `now`.
    ///
    /// The window is half-open: age must be `>= 0` and strictly below the
    /// window. A review exactly one window old is not recent, and neither is
    /// one stamped after `now`.
    pub fn is_recent(&self, now: DateTime<Utc>, timestamp: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(timestamp);
        age >= Duration::zero() && age < self.recency_window
    }

    pub fn recent_count(&self, now: DateTime<Utc>, reviews: &[Review]) -> usize {
        reviews
            .iter()
            .filter(|review| self.is_recent(now, review.timestamp))
            .count()
    }

    pub fn score(&self, now: DateTime<Utc>, reviews: &[Review], summary: &ReviewSummary) -> f64 {
        let recent = self.recent_count(now, reviews);
        recent as f64 * self.recent_weight
            + summary.average_rating * self.rating_weight
            + summary.review_count as f64 * self.count_weight
    }
}

/// Trend score of one venue's reviews with the default weights.
pub fn trend_score(now: DateTime<Utc>, reviews: &[Review], summary: &ReviewSummary) -> f64 {
    TrendWeights::default().score(now, reviews, summary)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedVenue<'a> {
    pub venue: &'a Venue,
    pub summary: ReviewSummary,
    pub trend_score: f64,
}

/// Ranks `venues` by descending trend score as of `now`.
///
/// The sort is stable: venues with equal scores keep their input order.
pub fn rank_by_trend(now: DateTime<Utc>, venues: &[Venue]) -> Vec<RankedVenue<'_>> {
    rank_by_trend_with(&TrendWeights::default(), now, venues)
}

pub fn rank_by_trend_with<'a>(
    weights: &TrendWeights,
    now: DateTime<Utc>,
    venues: &'a [Venue],
) -> Vec<RankedVenue<'a>> {
    let mut ranked: Vec<RankedVenue<'a>> = venues
        .iter()
        .map(|venue| {
            let summary = aggregate(&venue.reviews);
            let trend_score = weights.score(now, &venue.reviews, &summary);
            tracing::trace!(venue = %venue.id(), trend_score, "scored venue");
            RankedVenue {
                venue,
                summary,
                trend_score,
            }
        })
        .collect();

    // `sort_by` is stable; `total_cmp` keeps the order total.
    ranked.sort_by(|a, b| b.trend_score.total_cmp(&a.trend_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Rating, VenueProfile};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap()
    }

    fn review_at(rating: f64, timestamp: DateTime<Utc>) -> Review {
        Review {
            id: format!("r-{}", timestamp.timestamp_millis()),
            venue_id: "v".into(),
            rating: Rating::new(rating).unwrap(),
            text: "ok".to_string(),
            timestamp,
            username: "tester".to_string(),
        }
    }

    fn venue(id: &str, reviews: Vec<Review>) -> Venue {
        Venue::new(
            VenueProfile {
                id: id.into(),
                name: format!("Venue {}", id),
                maps_url: None,
                dimension_scores: Default::default(),
            },
            reviews,
        )
    }

    #[test]
    fn test_default_weights_match_constants() {
        let weights = TrendWeights::default();
        assert_eq!(weights.recency_window, Duration::days(7));
        assert_eq!(weights.recent_weight, 2.0);
        assert_eq!(weights.rating_weight, 3.0);
        assert_eq!(weights.count_weight, 1.0);
    }

    #[test]
    fn test_review_exactly_one_window_old_is_not_recent() {
        let weights = TrendWeights::default();
        let boundary = now() - Duration::days(7);
        assert!(!weights.is_recent(now(), boundary));
        assert!(weights.is_recent(now(), boundary + Duration::milliseconds(1)));
        assert!(weights.is_recent(now(), boundary + Duration::seconds(1)));
    }

    #[test]
    fn test_review_at_now_is_recent() {
        assert!(TrendWeights::default().is_recent(now(), now()));
    }

    #[test]
    fn test_future_review_is_not_recent_but_still_counted() {
        let reviews = vec![review_at(4.0, now() + Duration::hours(1))];
        let summary = aggregate(&reviews);
        assert_eq!(TrendWeights::default().recent_count(now(), &reviews), 0);
        assert_eq!(summary.review_count, 1);
        // 0 recent + 4 * 3 + 1 * 1
        assert_eq!(trend_score(now(), &reviews, &summary), 13.0);
    }

    #[test]
    fn test_empty_venue_scores_zero_and_sorts_last() {
        let venues = vec![
            venue("empty-1", vec![]),
            venue("old", vec![review_at(0.5, now() - Duration::days(30))]),
            venue("empty-2", vec![]),
        ];
        let ranked = rank_by_trend(now(), &venues);
        let ids: Vec<&str> = ranked.iter().map(|r| r.venue.id().as_str()).collect();
        assert_eq!(ids, vec!["old", "empty-1", "empty-2"]);
        assert_eq!(ranked[1].trend_score, 0.0);
        assert_eq!(ranked[2].trend_score, 0.0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ts = now() - Duration::days(1);
        let venues: Vec<Venue> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| venue(id, vec![review_at(3.0, ts)]))
            .collect();
        let ranked = rank_by_trend(now(), &venues);
        let ids: Vec<&str> = ranked.iter().map(|r| r.venue.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);

        let reversed: Vec<Venue> = venues.iter().rev().cloned().collect();
        let ranked = rank_by_trend(now(), &reversed);
        let ids: Vec<&str> = ranked.iter().map(|r| r.venue.id().as_str()).collect();
        assert_eq!(ids, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_ties_interleaved_with_other_scores() {
        let recent = now() - Duration::days(2);
        let venues = vec![
            venue("tie-1", vec![review_at(2.0, recent)]),
            venue("top", vec![review_at(5.0, recent), review_at(5.0, recent)]),
            venue("tie-2", vec![review_at(2.0, recent)]),
            venue("none", vec![]),
            venue("tie-3", vec![review_at(2.0, recent)]),
        ];
        let ranked = rank_by_trend(now(), &venues);
        let ids: Vec<&str> = ranked.iter().map(|r| r.venue.id().as_str()).collect();
        assert_eq!(ids, vec!["top", "tie-1", "tie-2", "tie-3", "none"]);
    }

    #[test]
    fn test_adding_recent_review_at_current_average_never_lowers_score() {
        let mut reviews = vec![
            review_at(4.5, now() - Duration::days(20)),
            review_at(2.5, now() - Duration::days(3)),
        ];
        let mut previous = trend_score(now(), &reviews, &aggregate(&reviews));

        for day in 0..6 {
            // 3.5 is the running average, so the added review leaves it unchanged.
            reviews.push(review_at(3.5, now() - Duration::days(day)));
            let summary = aggregate(&reviews);
            assert!((summary.average_rating - 3.5).abs() < 1e-9);
            let score = trend_score(now(), &reviews, &summary);
            assert!(score > previous, "score dropped from {} to {}", previous, score);
            previous = score;
        }
    }

    #[test]
    fn test_custom_weights_change_ordering() {
        let venues = vec![
            venue("busy", vec![
                review_at(1.0, now() - Duration::days(1)),
                review_at(1.0, now() - Duration::days(1)),
                review_at(1.0, now() - Duration::days(1)),
            ]),
            venue("great", vec![review_at(3.0, now() - Duration::days(40))]),
        ];

        let default_order = rank_by_trend(now(), &venues);
        assert_eq!(default_order[0].venue.id().as_str(), "busy");

        let quality_first = TrendWeights {
            recent_weight: 0.0,
            count_weight: 0.0,
            ..TrendWeights::default()
        };
        let ranked = rank_by_trend_with(&quality_first, now(), &venues);
        assert_eq!(ranked[0].venue.id().as_str(), "great");
    }

    #[test]
    fn test_ranking_does_not_touch_input() {
        let venues = vec![
            venue("low", vec![review_at(1.0, now() - Duration::days(1))]),
            venue("high", vec![review_at(5.0, now() - Duration::days(1))]),
        ];
        let before = venues.clone();
        let ranked = rank_by_trend(now(), &venues);
        assert_eq!(ranked[0].venue.id().as_str(), "high");
        assert_eq!(venues, before);
    }
}
