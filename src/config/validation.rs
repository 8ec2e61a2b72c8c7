//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Minimum username length.
const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
const MAX_USERNAME_LENGTH: usize = 20;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_usernames(&config.targets.usernames)?;
    validate_user_agent(&config.reddit.user_agent)?;
    validate_client_id(&config.album_host.client_id)?;
    validate_api_base("reddit.api_base", &config.reddit.api_base)?;
    validate_api_base("album_host.api_base", &config.album_host.api_base)?;
    validate_api_base("video_host.api_base", &config.video_host.api_base)?;

    if config.options.request_timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_seconds".to_string(),
            message: "Timeout must be greater than zero".to_string(),
        });
    }

    if config.options.max_concurrency == Some(0) {
        return Err(Error::ConfigValidation {
            field: "max_concurrency".to_string(),
            message: "Concurrency limit must be greater than zero (omit it for no limit)"
                .to_string(),
        });
    }

    if config.reddit.page_size == 0 || config.reddit.page_size > 100 {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Page size must be between 1 and 100 (got {})",
                config.reddit.page_size
            ),
        });
    }

    Ok(())
}

/// Validate the album host client id.
pub fn validate_client_id(client_id: &str) -> Result<()> {
    if client_id.trim().is_empty() {
        return Err(Error::MissingConfig("album_host.client_id".to_string()));
    }

    let lower = client_id.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_client_id") {
        return Err(Error::ConfigValidation {
            field: "client_id".to_string(),
            message: "Client id appears to be a placeholder. Please provide your imgur client id."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Validate that an API base is an absolute http(s) URL.
pub fn validate_api_base(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' must use http or https", value),
        });
    }

    Ok(())
}

/// Validate target usernames.
pub fn validate_usernames<S: AsRef<str>, I: IntoIterator<Item = S>>(usernames: I) -> Result<()> {
    let usernames: Vec<_> = usernames.into_iter().collect();

    if usernames.is_empty() {
        return Err(Error::MissingConfig(
            "usernames (at least one username required)".to_string(),
        ));
    }

    let username_pattern = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();

    for username in usernames {
        let username = username.as_ref();
        let clean_username = strip_user_prefix(username);

        if clean_username.len() < MIN_USERNAME_LENGTH {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' is too short (minimum {} characters)",
                    username, MIN_USERNAME_LENGTH
                ),
            });
        }

        if clean_username.len() > MAX_USERNAME_LENGTH {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' is too long (maximum {} characters)",
                    username, MAX_USERNAME_LENGTH
                ),
            });
        }

        if !username_pattern.is_match(clean_username) {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' contains invalid characters. Only alphanumeric, hyphens, and underscores allowed.",
                    username
                ),
            });
        }

        let lower = clean_username.to_lowercase();
        if lower == "replaceme" || lower == "username" {
            return Err(Error::ConfigValidation {
                field: "usernames".to_string(),
                message: format!(
                    "Username '{}' appears to be a placeholder. Please provide actual usernames.",
                    username
                ),
            });
        }
    }

    Ok(())
}

/// Strip a leading `u/` or `/u/` from a username.
pub fn strip_user_prefix(username: &str) -> &str {
    let trimmed = username.trim();
    trimmed
        .strip_prefix("/u/")
        .or_else(|| trimmed.strip_prefix("u/"))
        .unwrap_or(trimmed)
}
