use crate::domain::model::Severity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoletinError {
    #[error("Grade must be a valid number, got '{input}'")]
    ValidationError { input: String },

    #[error("Grade must be between {min} and {max}, got {value}")]
    RangeError { value: f64, min: f64, max: f64 },

    #[error("A maximum of {max} grades is allowed")]
    CapacityError { max: usize },

    #[error("No grade at position {index} (list holds {len})")]
    IndexError { index: usize, len: usize },

    #[error("No grades available to compute the {operation}")]
    EmptyInputError { operation: &'static str },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BoletinError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BoletinError::ValidationError { .. } | BoletinError::RangeError { .. } => {
                ErrorCategory::Input
            }
            BoletinError::CapacityError { .. }
            | BoletinError::IndexError { .. }
            | BoletinError::EmptyInputError { .. } => ErrorCategory::Data,
            BoletinError::ConfigError { .. }
            | BoletinError::InvalidConfigValueError { .. }
            | BoletinError::MissingConfigError { .. }
            | BoletinError::ConfigParseError(_) => ErrorCategory::Configuration,
            BoletinError::IoError(_) | BoletinError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BoletinError::CapacityError { .. } | BoletinError::EmptyInputError { .. } => {
                ErrorSeverity::Low
            }
            BoletinError::ValidationError { .. }
            | BoletinError::RangeError { .. }
            | BoletinError::IndexError { .. } => ErrorSeverity::Medium,
            BoletinError::ConfigError { .. }
            | BoletinError::InvalidConfigValueError { .. }
            | BoletinError::MissingConfigError { .. }
            | BoletinError::ConfigParseError(_) => ErrorSeverity::High,
            BoletinError::IoError(_) | BoletinError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// How the failure should be surfaced to the user as a notification.
    pub fn notification_severity(&self) -> Severity {
        match self.severity() {
            ErrorSeverity::Low => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data => self.to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("Unexpected system failure: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BoletinError::ValidationError { .. } => "Enter a number such as 7 or 8.5",
            BoletinError::RangeError { .. } => "Enter a grade inside the allowed range",
            BoletinError::CapacityError { .. } => "Remove a grade before adding another one",
            BoletinError::IndexError { .. } => "Pick one of the listed grade positions",
            BoletinError::EmptyInputError { .. } => "Add at least one grade first",
            BoletinError::ConfigError { .. }
            | BoletinError::InvalidConfigValueError { .. }
            | BoletinError::MissingConfigError { .. } => {
                "Check the values in your configuration file and command line flags"
            }
            BoletinError::ConfigParseError(_) => "Make sure the configuration file is valid TOML",
            BoletinError::IoError(_) => "Check that the file exists and is readable",
            BoletinError::SerializationError(_) => "Report this problem, it should not happen",
        }
    }
}

pub type Result<T> = std::result::Result<T, BoletinError>;
