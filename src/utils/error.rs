use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplError {
    #[error("Failed to download REPL JAR from {url}: {reason}")]
    DownloadError { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to launch '{program}': {message}")]
    LaunchError { program: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Download,
    FileSystem,
    Configuration,
    Process,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReplError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReplError::DownloadError { .. } | ReplError::HttpError(_) => ErrorCategory::Download,
            ReplError::IoError(_) | ReplError::SerializationError(_) => ErrorCategory::FileSystem,
            ReplError::ConfigValidationError { .. } | ReplError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ReplError::LaunchError { .. } => ErrorCategory::Process,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路問題通常重試即可
            ErrorCategory::Download => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Process => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReplError::DownloadError { .. } | ReplError::HttpError(_) => {
                "Check repl.jarDownloadUrl and your network connection, then run `legend-repl refresh`"
            }
            ReplError::IoError(_) => {
                "Check that the extension directory exists and is writable"
            }
            ReplError::SerializationError(_) => "This is a bug, please report it",
            ReplError::ConfigValidationError { .. } => {
                "Make sure the config file is valid TOML with a [repl] table"
            }
            ReplError::InvalidConfigValueError { .. } => {
                "Fix the reported key in the config file or pass it on the command line"
            }
            ReplError::LaunchError { .. } => {
                "Install a JDK and make sure `java` is on your PATH"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReplError::DownloadError { url, .. } => {
                format!("Could not download the REPL JAR from {}", url)
            }
            ReplError::HttpError(e) => format!("Network error while downloading the REPL JAR: {}", e),
            ReplError::LaunchError { program, .. } => {
                format!("Could not start the REPL with '{}'", program)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReplError>;
