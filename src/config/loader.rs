//! Configuration structures and loading logic.

use crate::config::validation::strip_user_prefix;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub reddit: RedditConfig,

    #[serde(default)]
    pub album_host: AlbumHostConfig,

    #[serde(default)]
    pub video_host: VideoHostConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Which users to process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// Reddit usernames whose submissions are resolved.
    #[serde(default)]
    pub usernames: BTreeSet<String>,
}

impl TargetsConfig {
    /// Strip `u/` and `/u/` prefixes and surrounding whitespace, dropping
    /// entries that end up empty.
    pub fn normalize(&mut self) {
        self.usernames = std::mem::take(&mut self.usernames)
            .iter()
            .map(|name| strip_user_prefix(name).to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }
}

/// Submission listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Base URL of the listing API.
    #[serde(default = "default_reddit_api_base")]
    pub api_base: String,

    /// Submissions requested per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Album host (imgur) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumHostConfig {
    /// Value sent verbatim in the `Authorization` header.
    #[serde(default)]
    pub client_id: String,

    /// API base; album listings live at `{api_base}album/{id}/images`.
    #[serde(default = "default_album_api_base")]
    pub api_base: String,

    /// Network locations classified as the album host.
    #[serde(default = "default_album_domains")]
    pub domains: Vec<String>,
}

/// Video host (gfycat) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoHostConfig {
    /// Network location classified as the video host.
    #[serde(default = "default_video_domain")]
    pub domain: String,

    /// API base; the submission path is appended verbatim.
    #[serde(default = "default_video_api_base")]
    pub api_base: String,
}

/// Run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Connect and read timeout for every request.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,

    /// Upper bound on in-flight items per wave. Unbounded when absent.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Whether to drop duplicate URLs from the resolved set.
    #[serde(default = "default_true")]
    pub deduplicate: bool,

    /// Print resolved URLs instead of downloading them.
    #[serde(default)]
    pub dry_run: bool,

    /// Whether to log each completed download.
    #[serde(default = "default_true")]
    pub show_downloads: bool,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            api_base: default_reddit_api_base(),
            page_size: default_page_size(),
        }
    }
}

impl Default for AlbumHostConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            api_base: default_album_api_base(),
            domains: default_album_domains(),
        }
    }
}

impl Default for VideoHostConfig {
    fn default() -> Self {
        Self {
            domain: default_video_domain(),
            api_base: default_video_api_base(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            request_timeout_seconds: default_timeout(),
            max_concurrency: None,
            deduplicate: true,
            dry_run: false,
            show_downloads: true,
        }
    }
}

fn default_user_agent() -> String {
    concat!("picrip/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_reddit_api_base() -> String {
    "https://www.reddit.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_album_api_base() -> String {
    "https://api.imgur.com/3/".to_string()
}

fn default_album_domains() -> Vec<String> {
    vec![
        "i.imgur.com".to_string(),
        "m.imgur.com".to_string(),
        "imgur.com".to_string(),
    ]
}

fn default_video_domain() -> String {
    "gfycat.com".to_string()
}

fn default_video_api_base() -> String {
    "https://api.gfycat.com/v1/gfycats".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let mut config: Config = toml::from_str(&content)?;
        config.targets.normalize();
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Find the config file to use: the given path if it exists, else the
    /// platform config directory.
    pub fn locate(preferred: &Path) -> Option<PathBuf> {
        if preferred.exists() {
            return Some(preferred.to_path_buf());
        }

        let fallback = ProjectDirs::from("", "", "picrip")?
            .config_dir()
            .join("config.toml");
        fallback.exists().then_some(fallback)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Timeout applied to every outbound request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.options.request_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_known_hosts() {
        let config = Config::default();
        assert_eq!(config.video_host.domain, "gfycat.com");
        assert!(config.album_host.domains.contains(&"m.imgur.com".to_string()));
        assert_eq!(config.album_host.api_base, "https://api.imgur.com/3/");
        assert_eq!(config.options.max_concurrency, None);
        assert!(config.options.deduplicate);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [targets]
            usernames = ["someone"]

            [album_host]
            client_id = "Client-ID abc123"

            [options]
            max_concurrency = 8
            "#,
        )
        .unwrap();

        assert!(config.targets.usernames.contains("someone"));
        assert_eq!(config.album_host.client_id, "Client-ID abc123");
        assert_eq!(config.album_host.domains.len(), 3);
        assert_eq!(config.options.max_concurrency, Some(8));
        assert_eq!(config.options.request_timeout_seconds, 30);
        assert_eq!(config.reddit.page_size, 100);
    }

    #[test]
    fn test_load_strips_user_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [targets]
            usernames = ["u/spez", "/u/Other_user", " plain_name ", "u/"]
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let users: Vec<_> = config.targets.usernames.iter().cloned().collect();
        assert_eq!(users, vec!["Other_user", "plain_name", "spez"]);
        assert_eq!(
            crate::fs::get_user_folder(&config, "spez").unwrap(),
            config.download_directory().join("spez")
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.targets.usernames.insert("someone".to_string());
        config.options.dry_run = true;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(loaded.targets.usernames.contains("someone"));
        assert!(loaded.options.dry_run);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
