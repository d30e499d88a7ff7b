#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{FileProvider, InMemoryProvider};
use crate::domain::model::{parse_timestamp, Review, VenueId, VenueProfile};
use crate::domain::ports::VenueProvider;
use crate::utils::error::{Result, VenueError};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use toml_config::{SourceKind, TomlConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Sample,
    File(PathBuf),
}

/// Effective settings after merging the config file with command-line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: DataSource,
    /// `None` means "the current time", resolved by the caller.
    pub now: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DataSource::Sample,
            now: None,
            limit: None,
        }
    }
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<String>,
    pub now: Option<String>,
    pub limit: Option<usize>,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let source = match config.source.kind {
            SourceKind::Sample => DataSource::Sample,
            SourceKind::File => match &config.source.path {
                Some(path) => DataSource::File(PathBuf::from(path)),
                None => {
                    return Err(VenueError::MissingConfigError {
                        field: "source.path".to_string(),
                    })
                }
            },
        };

        Ok(Self {
            source,
            now: config.ranking.now.as_deref().and_then(parse_timestamp),
            limit: config.ranking.limit,
        })
    }

    pub fn apply(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(path) = &overrides.data {
            validate_path("--data", path)?;
            self.source = DataSource::File(PathBuf::from(path));
        }
        if let Some(raw) = &overrides.now {
            let now = parse_timestamp(raw).ok_or_else(|| VenueError::InvalidConfigValueError {
                field: "--now".to_string(),
                value: raw.clone(),
                reason: "Expected RFC 3339 or YYYY-MM-DD".to_string(),
            })?;
            self.now = Some(now);
        }
        if let Some(limit) = overrides.limit {
            validate_positive_number("--limit", limit, 1)?;
            self.limit = Some(limit);
        }
        Ok(self)
    }

    pub async fn open_provider(&self) -> Result<Provider> {
        match &self.source {
            DataSource::Sample => {
                tracing::info!("Using bundled sample venues");
                Ok(Provider::Memory(InMemoryProvider::sample()?))
            }
            DataSource::File(path) => Ok(Provider::File(FileProvider::open(path).await?)),
        }
    }
}

/// Whichever provider the settings selected.
#[derive(Debug, Clone)]
pub enum Provider {
    Memory(InMemoryProvider),
    File(FileProvider),
}

#[async_trait]
impl VenueProvider for Provider {
    async fn venues(&self) -> Result<Vec<VenueProfile>> {
        match self {
            Provider::Memory(inner) => inner.venues().await,
            Provider::File(inner) => inner.venues().await,
        }
    }

    async fn reviews_for_venue(&self, id: &VenueId) -> Result<Vec<Review>> {
        match self {
            Provider::Memory(inner) => inner.reviews_for_venue(id).await,
            Provider::File(inner) => inner.reviews_for_venue(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_settings_from_toml() {
        let config = TomlConfig::from_toml_str(
            "[source]\nkind = \"file\"\npath = \"venues.json\"\n[ranking]\nnow = \"2024-06-03\"\n",
        )
        .unwrap();
        let settings = Settings::from_toml(&config).unwrap();
        assert_eq!(settings.source, DataSource::File(PathBuf::from("venues.json")));
        assert_eq!(
            settings.now,
            Some(Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_overrides_win() {
        let config = TomlConfig::from_toml_str("[ranking]\nlimit = 10\n").unwrap();
        let settings = Settings::from_toml(&config)
            .unwrap()
            .apply(&Overrides {
                data: Some("other.json".to_string()),
                now: Some("2024-06-03T10:00:00Z".to_string()),
                limit: Some(2),
            })
            .unwrap();
        assert_eq!(settings.source, DataSource::File(PathBuf::from("other.json")));
        assert_eq!(settings.limit, Some(2));
        assert_eq!(
            settings.now,
            Some(Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        let bad_now = Settings::default().apply(&Overrides {
            now: Some("soon".to_string()),
            ..Default::default()
        });
        assert!(bad_now.is_err());

        let bad_limit = Settings::default().apply(&Overrides {
            limit: Some(0),
            ..Default::default()
        });
        assert!(bad_limit.is_err());
    }

    #[tokio::test]
    async fn test_sample_provider_opens() {
        let provider = Settings::default().open_provider().await.unwrap();
        assert_eq!(provider.venues().await.unwrap().len(), 4);
    }
}
