use crate::utils::error::{Result, VenueError};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sample,
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Reference instant, RFC 3339 or `YYYY-MM-DD`.
    pub now: Option<String>,
    pub limit: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VenueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of environment variable `VAR`.
    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VenueError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.source.kind == SourceKind::File {
            let path = validate_required_field("source.path", &self.source.path)?;
            validate_path("source.path", path)?;
        }

        if let Some(limit) = self.ranking.limit {
            validate_positive_number("ranking.limit", limit, 1)?;
        }

        if let Some(now) = &self.ranking.now {
            if crate::domain::model::parse_timestamp(now).is_none() {
                return Err(VenueError::InvalidConfigValueError {
                    field: "ranking.now".to_string(),
                    value: now.clone(),
                    reason: "Expected RFC 3339 or YYYY-MM-DD".to_string(),
                });
            }
        }

        Ok(())
    }
}
