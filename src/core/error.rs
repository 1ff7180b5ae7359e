use std::fmt;

/// Error types for speedcheck operations
#[derive(Debug)]
pub enum SpeedcheckError {
    /// IO error (config file reading, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Malformed JSON in an API response
    Json(serde_json::Error),

    /// Analysis response references data that doesn't exist
    Schema(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for SpeedcheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedcheckError::Io(err) => write!(f, "IO error: {err}"),
            SpeedcheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            SpeedcheckError::Http(err) => write!(f, "HTTP error: {err}"),
            SpeedcheckError::Json(err) => write!(f, "JSON error: {err}"),
            SpeedcheckError::Schema(msg) => write!(f, "Schema error: {msg}"),
            SpeedcheckError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            SpeedcheckError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for SpeedcheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpeedcheckError::Io(err) => Some(err),
            SpeedcheckError::Http(err) => Some(err),
            SpeedcheckError::Json(err) => Some(err),
            SpeedcheckError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpeedcheckError {
    fn from(err: std::io::Error) -> Self {
        SpeedcheckError::Io(err)
    }
}

impl From<reqwest::Error> for SpeedcheckError {
    fn from(err: reqwest::Error) -> Self {
        SpeedcheckError::Http(err)
    }
}

impl From<serde_json::Error> for SpeedcheckError {
    fn from(err: serde_json::Error) -> Self {
        SpeedcheckError::Json(err)
    }
}

impl From<toml::de::Error> for SpeedcheckError {
    fn from(err: toml::de::Error) -> Self {
        SpeedcheckError::TomlParsing(err)
    }
}

/// Type alias for Results using SpeedcheckError
pub type Result<T> = std::result::Result<T, SpeedcheckError>;
