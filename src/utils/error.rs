use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Bio fetch failed for '{handle}': {reason}")]
    FetchError { handle: String, reason: String },

    #[error("{operation} timed out after {seconds}s")]
    FetchTimeout { operation: String, seconds: u64 },

    #[error("Breach lookup failed: {reason}")]
    LookupError { reason: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Notification error: {message}")]
    NotificationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Notification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GuardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GuardError::HttpError(_)
            | GuardError::FetchError { .. }
            | GuardError::FetchTimeout { .. }
            | GuardError::LookupError { .. } => ErrorCategory::Network,
            GuardError::ConfigError { .. }
            | GuardError::InvalidConfigValueError { .. }
            | GuardError::MissingConfigError { .. }
            | GuardError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            GuardError::IoError(_)
            | GuardError::SerializationError(_)
            | GuardError::StorageError { .. } => ErrorCategory::Storage,
            GuardError::NotificationError { .. } => ErrorCategory::Notification,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 通知失敗不影響分析結果
            ErrorCategory::Notification => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GuardError::HttpError(_) | GuardError::FetchError { .. } => {
                "Check network connectivity and that the profile is public"
            }
            GuardError::FetchTimeout { .. } => "Retry later or raise --fetch-timeout-secs",
            GuardError::LookupError { .. } => "Retry later; the breach service may be unavailable",
            GuardError::ConfigError { .. }
            | GuardError::InvalidConfigValueError { .. }
            | GuardError::ConfigValidationError { .. } => {
                "Review the command line arguments and the TOML configuration file"
            }
            GuardError::MissingConfigError { .. } => {
                "Provide the missing value on the command line or in the configuration file"
            }
            GuardError::IoError(_) | GuardError::StorageError { .. } => {
                "Make sure the output directory exists and is writable"
            }
            GuardError::SerializationError(_) => {
                "The history file may be corrupted; move it aside and retry"
            }
            GuardError::NotificationError { .. } => "Check the outbox directory and sender address",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GuardError::MissingConfigError { field } => {
                format!("Missing required option: {}", field)
            }
            GuardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Option '{}' is invalid: {}", field, reason)
            }
            GuardError::FetchTimeout { operation, seconds } => {
                format!("{} did not answer within {} seconds", operation, seconds)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GuardError>;
