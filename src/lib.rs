pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{FileProvider, InMemoryProvider};
pub use crate::core::aggregate::{aggregate, ReviewSummary};
pub use crate::core::engine::{TrendingEngine, TrendingEntry, VenueDetails};
pub use crate::core::trending::{rank_by_trend, trend_score, RankedVenue, TrendWeights};
pub use crate::domain::model::{
    Dataset, Dimension, DimensionScores, Rating, Review, Venue, VenueId, VenueProfile,
};
pub use crate::domain::ports::VenueProvider;
pub use crate::utils::error::{Result, VenueError};
