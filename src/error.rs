use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error("FetchError: {0}")]
    Api(#[from] ApiError),
    #[error("FormatError: {0}")]
    Format(#[from] FormatError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input error: {0}")]
    Input(String),
}

/// Rejected search input. Raised before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one search parameter required")]
    MissingSearchParameter,
    #[error("poemcount needs at least one other search parameter")]
    PoemcountOnly,
    #[error("'{value}' is not a valid {field}: {reason}")]
    InvalidNumber {
        field: String,
        value: String,
        reason: String,
    },
    #[error("unknown field '{name}'")]
    UnknownField { name: String },
    #[error("'{field}' cannot be used to limit returned data")]
    InvalidOutputField { field: String },
    #[error("random poem count must be at least 1")]
    InvalidRandomCount,
}

/// Network, HTTP and decoding failures while talking to PoetryDB.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("Network error on {endpoint}: {message}")]
    Network { endpoint: String, message: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Invalid JSON from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("random poem response was empty")]
    EmptyRandom,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("JSON serialization failed: {0}")]
    Serialize(String),
    #[error("Terminal output error: {0}")]
    TerminalOutput(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Api(api_error) => match api_error {
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Network { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Format(_) => ErrorSeverity::Medium,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    /// True for failures that come from the remote API or the transport.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, AppError::Api(_))
    }

    pub fn display_friendly(&self) -> String {
        match self {
            AppError::Validation(ValidationError::MissingSearchParameter) => {
                "You must include at least one search parameter.".to_string()
            }
            AppError::Validation(e) => e.to_string(),
            AppError::Format(FormatError::EmptyRandom) => {
                "PoetryDB returned no random poem".to_string()
            }
            _ => format!("{}", self),
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Validation(ValidationError::MissingSearchParameter) => Some(
                "pass --author, --title or --lines (or --sample for a sample search)".to_string(),
            ),
            AppError::Api(ApiError::Timeout { .. } | ApiError::Network { .. }) => {
                Some("Check your internet connection or the configured base URL".to_string())
            }
            AppError::Api(ApiError::Decode { .. }) => Some(
                "The server did not answer with PoetryDB JSON; check 'poetrydb config show'"
                    .to_string(),
            ),
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove ~/.config/poetrydb-cli/config.toml".to_string())
            }
            _ => None,
        }
    }
}
