//! Shared HTTP transport.
//!
//! Two clients are built from one configuration. Resolution requests are
//! short and bounded end to end. Downloads may stream for a long time, so
//! they are only bounded per read.

use std::time::Duration;

use reqwest::Client;

use crate::config::Config;
use crate::error::{Error, Result};

/// Build the client used for listing and resolution.
///
/// The timeout covers connect and the whole exchange; a timed out request
/// surfaces as a transport error like any other connection failure.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Build the client used for media downloads.
///
/// There is no overall deadline: a body may take as long as it needs, but a
/// connection that sends nothing for `stall_timeout` is abandoned.
pub fn build_download_client(user_agent: &str, stall_timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(stall_timeout)
        .read_timeout(stall_timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to create download client: {}", e)))
}

/// Build the resolution client from configuration.
pub fn client_from_config(config: &Config) -> Result<Client> {
    build_client(&config.reddit.user_agent, config.request_timeout())
}

/// Build the download client from configuration.
pub fn download_client_from_config(config: &Config) -> Result<Client> {
    build_download_client(&config.reddit.user_agent, config.request_timeout())
}
