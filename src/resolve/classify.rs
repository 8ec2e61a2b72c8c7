//! Domain classification of submission URLs.

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::Config;

/// Coarse routing category of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Anything not on a known host; resolved by probing its content type.
    GenericProbe,
    /// The album-oriented image host.
    AlbumHost,
    /// The video host.
    VideoHost,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::GenericProbe => write!(f, "generic"),
            Category::AlbumHost => write!(f, "album host"),
            Category::VideoHost => write!(f, "video host"),
        }
    }
}

/// A URL paired with its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedUrl {
    pub url: String,
    pub category: Category,
}

/// Maps URLs to categories by network location alone.
#[derive(Debug, Clone)]
pub struct Classifier {
    album_hosts: HashSet<String>,
    video_host: String,
}

impl Classifier {
    pub fn new<S: AsRef<str>>(album_hosts: impl IntoIterator<Item = S>, video_host: &str) -> Self {
        Self {
            album_hosts: album_hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .collect(),
            video_host: video_host.trim().to_ascii_lowercase(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.album_host.domains, &config.video_host.domain)
    }

    /// Classify a URL. Unparseable URLs are `GenericProbe` and fail later at
    /// the network stage.
    pub fn classify(&self, url: &str) -> Category {
        let Some(location) = netloc(url) else {
            return Category::GenericProbe;
        };

        if self.album_hosts.contains(&location) {
            Category::AlbumHost
        } else if location == self.video_host {
            Category::VideoHost
        } else {
            Category::GenericProbe
        }
    }

    pub fn classify_url(&self, url: String) -> ClassifiedUrl {
        let category = self.classify(&url);
        ClassifiedUrl { url, category }
    }
}

/// Lower-cased host with the port appended when one is given explicitly.
///
/// Default ports are elided by the parser, so `https://imgur.com:443/x`
/// yields `imgur.com`.
pub fn netloc(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::from_config(&Config::default())
    }

    #[test]
    fn test_album_hosts() {
        let c = classifier();
        assert_eq!(c.classify("https://imgur.com/gallery/x"), Category::AlbumHost);
        assert_eq!(c.classify("https://m.imgur.com/a/AbCdE"), Category::AlbumHost);
        assert_eq!(c.classify("https://i.imgur.com/AbCdEfG"), Category::AlbumHost);
        assert_eq!(c.classify("HTTPS://IMGUR.COM/a/AbCdE"), Category::AlbumHost);
    }

    #[test]
    fn test_video_host() {
        let c = classifier();
        assert_eq!(
            c.classify("https://gfycat.com/SomeLongName"),
            Category::VideoHost
        );
    }

    #[test]
    fn test_other_hosts_are_generic() {
        let c = classifier();
        for url in [
            "https://i.redd.it/abc.jpg",
            "https://www.imgur.com/a/AbCdE",
            "https://thumbs.gfycat.com/Name.mp4",
            "https://example.com/",
            "http://localhost:8080/x",
        ] {
            assert_eq!(c.classify(url), Category::GenericProbe, "{}", url);
        }
    }

    #[test]
    fn test_unparseable_is_generic() {
        let c = classifier();
        assert_eq!(c.classify("not a url"), Category::GenericProbe);
        assert_eq!(c.classify(""), Category::GenericProbe);
        assert_eq!(c.classify("mailto:someone@imgur.com"), Category::GenericProbe);
    }

    #[test]
    fn test_explicit_port_is_part_of_location() {
        let c = Classifier::new(["127.0.0.1:9000"], "127.0.0.1:9001");
        assert_eq!(c.classify("http://127.0.0.1:9000/a/AbCdE"), Category::AlbumHost);
        assert_eq!(c.classify("http://127.0.0.1:9001/Name"), Category::VideoHost);
        assert_eq!(c.classify("http://127.0.0.1/Name"), Category::GenericProbe);
    }

    #[test]
    fn test_netloc() {
        assert_eq!(netloc("https://imgur.com:443/x").as_deref(), Some("imgur.com"));
        assert_eq!(netloc("http://Host:81/").as_deref(), Some("host:81"));
        assert_eq!(netloc("nope"), None);
    }

    #[test]
    fn test_classify_url_keeps_url() {
        let classified = classifier().classify_url("https://gfycat.com/X".to_string());
        assert_eq!(classified.url, "https://gfycat.com/X");
        assert_eq!(classified.category, Category::VideoHost);
    }
}
