use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unknown category: {key}")]
    UnknownCategory { key: String },

    #[error("Malformed input assignment '{raw}': {reason}")]
    AssignmentError { raw: String, reason: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Rendering error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failed run. Never 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl RatioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RatioError::UnknownCategory { .. } | RatioError::AssignmentError { .. } => {
                ErrorCategory::Input
            }
            RatioError::ConfigValidationError { .. }
            | RatioError::InvalidConfigValueError { .. }
            | RatioError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RatioError::SerializationError(_)
            | RatioError::CsvError(_)
            | RatioError::RenderError { .. } => ErrorCategory::Output,
            RatioError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RatioError::UnknownCategory { .. } => {
                "Run `finratio list` to see the available category keys".to_string()
            }
            RatioError::AssignmentError { .. } => {
                "Pass inputs as --set key=value, e.g. --set marketPrice=50".to_string()
            }
            RatioError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' in your request", field)
            }
            RatioError::ConfigValidationError { .. } => {
                "Make sure the request file is valid TOML and matches the documented layout"
                    .to_string()
            }
            RatioError::MissingConfigError { field } => {
                format!("Add '{}' to the request file or pass it on the command line", field)
            }
            RatioError::IoError(_) => {
                "Check that the file exists and is readable".to_string()
            }
            RatioError::SerializationError(_)
            | RatioError::CsvError(_)
            | RatioError::RenderError { .. } => {
                "Try another output format, e.g. --format table".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RatioError::UnknownCategory { key } => {
                format!("'{}' is not a known ratio category", key)
            }
            RatioError::AssignmentError { raw, .. } => {
                format!("Could not understand the input '{}'", raw)
            }
            RatioError::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RatioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_is_input_error() {
        let err = RatioError::UnknownCategory {
            key: "growth".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("growth"));
        assert!(err.recovery_suggestion().contains("finratio list"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: RatioError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            RatioError::AssignmentError {
                raw: "eps".to_string(),
                reason: "missing '='".to_string(),
            },
            RatioError::MissingConfigError {
                field: "category".to_string(),
            },
            RatioError::RenderError {
                message: "boom".to_string(),
            },
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into(),
        ];
        let codes: Vec<i32> = errors.iter().map(|e| e.severity().exit_code()).collect();
        assert_eq!(codes, vec![1, 1, 2, 3]);
    }
}
