use std::fmt;

// === ApiError ===

/// Errors returned by the backend API client.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS, ...).
    Network(String),
    /// The backend answered with a non-success HTTP status.
    Status(u16),
    /// The response body could not be decoded into the expected payload.
    Decode(String),
    /// A local file needed for the request could not be read.
    Io(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status(code) => write!(f, "HTTP error! status: {}", code),
            ApiError::Decode(msg) => write!(f, "Response decode error: {}", msg),
            ApiError::Io(msg) => write!(f, "File read error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

// === StoreError ===

/// Errors surfaced by application store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backend call failed.
    Api(ApiError),
    /// Deleting the engine would leave the collection empty.
    LastSearchEngine,
    /// A list index was out of bounds.
    InvalidIndex(usize),
    /// An entity with the given ID is not loaded.
    NotFound(String),
    /// Reading or writing a backup file failed.
    Backup(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Api(err) => write!(f, "{}", err),
            StoreError::LastSearchEngine => write!(f, "Cannot delete the last search engine"),
            StoreError::InvalidIndex(index) => write!(f, "Invalid index: {}", index),
            StoreError::NotFound(id) => write!(f, "Not found: {}", id),
            StoreError::Backup(msg) => write!(f, "Backup error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Api(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        StoreError::Api(err)
    }
}

// === ConfigError ===

/// Errors related to loading the application configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    IoError(String),
    /// The config file exists but is not valid JSON for `AppConfig`.
    Parse(String),
    /// An environment override holds an unusable value.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
