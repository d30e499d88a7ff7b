use crate::utils::error::{Result, VenueError};
use crate::utils::validation::{
    validate_half_step, validate_non_empty_string, validate_range, Validate,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VenueId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A star rating on the half-star grid, 0.5 through 5.0 inclusive.
///
/// The only way to obtain one is through [`Rating::new`] (or deserialization,
/// which goes through it), so code holding a `Rating` never re-checks it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self> {
        validate_range("rating", value, Self::MIN, Self::MAX)?;
        validate_half_step("rating", value)?;
        Ok(Self(value))
    }

    /// Builds a rating from a count of half stars (1..=10).
    pub fn from_half_steps(half_steps: u8) -> Result<Self> {
        Self::new(f64::from(half_steps) / 2.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn half_steps(self) -> u8 {
        // Exact: the value is a validated multiple of 0.5 no larger than 5.
        (self.0 * 2.0) as u8
    }
}

impl TryFrom<f64> for Rating {
    type Error = VenueError;

    fn try_from(value: f64) -> Result<Self> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Privacy,
    Availability,
    Cleanliness,
    Vibe,
    Safety,
    Doorman,
    Security,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Privacy,
        Dimension::Availability,
        Dimension::Cleanliness,
        Dimension::Vibe,
        Dimension::Safety,
        Dimension::Doorman,
        Dimension::Security,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Privacy => "Privacy",
            Dimension::Availability => "Availability",
            Dimension::Cleanliness => "Cleanliness",
            Dimension::Vibe => "Vibe",
            Dimension::Safety => "Safety",
            Dimension::Doorman => "Doorman",
            Dimension::Security => "Security",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Venue-level scores per facility dimension, each in `[0, 5]`.
///
/// These are attributes of the venue itself and are never derived from
/// individual reviews. A dimension missing from the map is simply unrated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(BTreeMap<Dimension, f64>);

impl DimensionScores {
    pub const MAX_SCORE: f64 = 5.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: Dimension, score: f64) -> Self {
        self.0.insert(dimension, score);
        self
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    /// Scores in the fixed `Dimension::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(dimension, score)| (*dimension, *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for DimensionScores {
    fn validate(&self) -> Result<()> {
        for (dimension, score) in self.iter() {
            validate_range(
                &format!("dimension_scores.{}", dimension.label().to_lowercase()),
                score,
                0.0,
                Self::MAX_SCORE,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub venue_id: VenueId,
    pub rating: Rating,
    pub text: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub username: String,
}

impl Validate for Review {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("review.id", &self.id)?;
        validate_non_empty_string("review.venue_id", self.venue_id.as_str())?;
        validate_non_empty_string("review.text", &self.text)?;
        validate_non_empty_string("review.username", &self.username)?;
        Ok(())
    }
}

/// Venue metadata as served by a data provider, without its reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueProfile {
    pub id: VenueId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    #[serde(default)]
    pub dimension_scores: DimensionScores,
}

impl Validate for VenueProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("venue.id", self.id.as_str())?;
        validate_non_empty_string("venue.name", &self.name)?;
        if let Some(url) = &self.maps_url {
            validate_non_empty_string("venue.maps_url", url)?;
        }
        self.dimension_scores.validate()
    }
}

/// A venue together with its reviews in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(flatten)]
    pub profile: VenueProfile,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Venue {
    pub fn new(profile: VenueProfile, reviews: Vec<Review>) -> Self {
        Self { profile, reviews }
    }

    pub fn id(&self) -> &VenueId {
        &self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

/// The on-disk shape of a venue fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub venues: Vec<VenueProfile>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Dataset {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        Ok(dataset)
    }
}

/// Parses either an RFC 3339 instant or a bare `YYYY-MM-DD` date.
///
/// A bare date is read as midnight UTC of that day.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&instant.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid timestamp '{}': expected RFC 3339 or YYYY-MM-DD",
                raw
            ))
        })
    }
}
