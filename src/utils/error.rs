use thiserror::Error;

#[derive(Error, Debug)]
pub enum VenueError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Venue not found: {id}")]
    VenueNotFound { id: String },

    #[error("Venue data provider failed: {message}")]
    ProviderError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl VenueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VenueError::IoError(_) => ErrorCategory::Io,
            VenueError::ConfigValidationError { .. }
            | VenueError::MissingConfigError { .. }
            | VenueError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            VenueError::SerializationError(_)
            | VenueError::ProviderError { .. }
            | VenueError::ValidationError { .. } => ErrorCategory::Data,
            VenueError::VenueNotFound { .. } => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VenueError::VenueNotFound { .. } | VenueError::ProviderError { .. } => {
                ErrorSeverity::Medium
            }
            VenueError::SerializationError(_)
            | VenueError::ValidationError { .. }
            | VenueError::ConfigValidationError { .. }
            | VenueError::MissingConfigError { .. }
            | VenueError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            VenueError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            VenueError::IoError(_) => "Check that the data file exists and is readable",
            VenueError::SerializationError(_) => {
                "Make sure the data file is valid JSON with 'venues' and 'reviews' arrays"
            }
            VenueError::ConfigValidationError { .. } => "Check the TOML syntax of the config file",
            VenueError::MissingConfigError { .. } => "Add the missing field to the config file",
            VenueError::InvalidConfigValueError { .. } => {
                "Fix the offending value and run again"
            }
            VenueError::VenueNotFound { .. } => "Use the search command to list known venue ids",
            VenueError::ProviderError { .. } => "Retry later or switch to the sample dataset",
            VenueError::ValidationError { .. } => {
                "Ratings must be half stars between 0.5 and 5 and texts must not be blank"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VenueError::VenueNotFound { .. } => "Venue not found.".to_string(),
            VenueError::ValidationError { message } => message.clone(),
            other => format!("{} error: {}", other.category_label(), other),
        }
    }

    fn category_label(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "File",
            ErrorCategory::Configuration => "Configuration",
            ErrorCategory::Data => "Data",
            ErrorCategory::Lookup => "Lookup",
        }
    }
}

pub type Result<T> = std::result::Result<T, VenueError>;
