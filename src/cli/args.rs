//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Reddit media resolver CLI.
#[derive(Parser, Debug)]
#[command(
    name = "picrip",
    version,
    about = "Resolve and download media linked from Reddit users' submissions",
    long_about = "A CLI tool that walks a Reddit user's submissions, resolves every link \
                  into direct media URLs and downloads them.\n\n\
                  Supports direct image/video links, imgur albums and gfycat videos."
)]
pub struct Args {
    /// Reddit username(s) to process.
    /// Can specify multiple users separated by spaces.
    #[arg(short, long, value_delimiter = ' ', num_args = 1..)]
    pub user: Option<Vec<String>>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Imgur API client id.
    #[arg(long = "client-id", env = "PICRIP_CLIENT_ID")]
    pub client_id: Option<String>,

    /// User agent sent with every request.
    #[arg(short = 'a', long = "user-agent", env = "PICRIP_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Maximum number of requests in flight per wave.
    #[arg(long = "max-concurrency")]
    pub max_concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Keep duplicate URLs in the resolved output.
    #[arg(long)]
    pub no_dedup: bool,

    /// Resolve and print URLs without downloading anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Write the merged configuration back to the config file.
    #[arg(long)]
    pub save_config: bool,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(users) = self.user {
            config.targets.usernames = users.into_iter().collect();
            config.targets.normalize();
        }

        if let Some(client_id) = self.client_id {
            config.album_host.client_id = client_id;
        }

        if let Some(user_agent) = self.user_agent {
            config.reddit.user_agent = user_agent;
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = Some(dir);
        }

        if let Some(limit) = self.max_concurrency {
            config.options.max_concurrency = Some(limit);
        }

        if let Some(timeout) = self.timeout {
            config.options.request_timeout_seconds = timeout;
        }

        // Boolean flags only override when set
        if self.no_dedup {
            config.options.deduplicate = false;
        }

        if self.dry_run {
            config.options.dry_run = true;
        }

        if self.quiet {
            config.options.show_downloads = false;
        }
    }
}
