//! Error types for the picrip application.

use thiserror::Error;

/// Main error type for the application.
///
/// Resolver stages never surface these past a single item: a failed probe or
/// API call is logged and the item is dropped. Errors here are for the outer
/// collaborators (configuration, submission listing, downloads).
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Listing errors
    #[error("Listing error: {0}")]
    Listing(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// Interrupted by the user.
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_USERS_FAILED: i32 = 6;
}

impl Error {
    /// Exit code reported when this error ends the run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                exit_codes::CONFIG_ERROR
            }
            Error::Listing(_) | Error::UserNotFound(_) | Error::RateLimited(_) => {
                exit_codes::API_ERROR
            }
            Error::Download(_) | Error::InvalidFilename(_) => exit_codes::DOWNLOAD_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}
