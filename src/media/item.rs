//! Resolved media representation.

use std::fmt;

/// Media kinds the pipeline treats as directly downloadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    ImageJpeg,
    ImagePng,
    ImageGif,
    VideoMp4,
    VideoMpeg,
    VideoWebm,
}

impl MediaKind {
    /// Every ready kind, in declaration order.
    pub const ALL: [MediaKind; 6] = [
        MediaKind::ImageJpeg,
        MediaKind::ImagePng,
        MediaKind::ImageGif,
        MediaKind::VideoMp4,
        MediaKind::VideoMpeg,
        MediaKind::VideoWebm,
    ];

    /// The MIME type string for this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaKind::ImageJpeg => "image/jpeg",
            MediaKind::ImagePng => "image/png",
            MediaKind::ImageGif => "image/gif",
            MediaKind::VideoMp4 => "video/mp4",
            MediaKind::VideoMpeg => "video/mpeg",
            MediaKind::VideoWebm => "video/webm",
        }
    }

    /// Look up a kind by exact MIME essence (no parameters).
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.mime_type().eq_ignore_ascii_case(mime))
    }

    /// Preferred file extension (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::ImageJpeg => "jpg",
            MediaKind::ImagePng => "png",
            MediaKind::ImageGif => "gif",
            MediaKind::VideoMp4 => "mp4",
            MediaKind::VideoMpeg => "mpeg",
            MediaKind::VideoWebm => "webm",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(
            self,
            MediaKind::VideoMp4 | MediaKind::VideoMpeg | MediaKind::VideoWebm
        )
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// A final, directly fetchable media URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedMedia {
    /// Download URL.
    pub url: String,

    /// Media kind, either declared by the server or inferred.
    pub kind: MediaKind,
}

impl ResolvedMedia {
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_matches_all_kinds() {
        for kind in MediaKind::ALL {
            assert_eq!(MediaKind::from_mime(kind.mime_type()), Some(kind));
        }
    }

    #[test]
    fn test_from_mime_is_case_insensitive() {
        assert_eq!(MediaKind::from_mime("Image/PNG"), Some(MediaKind::ImagePng));
    }

    #[test]
    fn test_from_mime_rejects_other_types() {
        assert_eq!(MediaKind::from_mime("text/html"), None);
        assert_eq!(MediaKind::from_mime("image/webp"), None);
        assert_eq!(MediaKind::from_mime(""), None);
    }
}
