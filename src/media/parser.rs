//! Media kind inference from response headers and links.

use crate::media::item::MediaKind;

/// MIME essence marking a document that needs another classification pass.
pub const HYPERTEXT_MIME: &str = "text/html";

/// Kind assumed for album links whose kind cannot be inferred.
pub const DEFAULT_ALBUM_KIND: MediaKind = MediaKind::ImageJpeg;

/// Strip parameters from a `Content-Type` value and normalize case.
///
/// `"Image/PNG; charset=binary"` becomes `"image/png"`.
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Whether a content type marks hypertext.
pub fn is_hypertext(content_type: &str) -> bool {
    mime_essence(content_type) == HYPERTEXT_MIME
}

/// Map a declared content type to a ready kind, if it is one.
pub fn kind_from_content_type(content_type: &str) -> Option<MediaKind> {
    MediaKind::from_mime(&mime_essence(content_type))
}

/// Infer a kind from an album link.
///
/// The host-declared type wins when it names a ready kind, then the link's
/// file extension, then [`DEFAULT_ALBUM_KIND`].
pub fn kind_from_link(link: &str, declared: Option<&str>) -> MediaKind {
    if let Some(kind) = declared.and_then(kind_from_content_type) {
        return kind;
    }

    extract_extension_from_url(link)
        .and_then(|ext| {
            mime_guess::from_ext(&ext)
                .iter()
                .find_map(|mime| MediaKind::from_mime(mime.essence_str()))
        })
        .unwrap_or(DEFAULT_ALBUM_KIND)
}

/// Extract extension from URL path.
pub fn extract_extension_from_url(url: &str) -> Option<String> {
    // Remove query string and fragment
    let path = url.split(['?', '#']).next()?;

    // Get the last segment
    let filename = path.rsplit('/').next()?;

    if !filename.contains('.') {
        return None;
    }

    let ext = filename.rsplit('.').next()?;

    // Validate it looks like an extension (1-10 chars, alphanumeric)
    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_essence_strips_parameters() {
        assert_eq!(mime_essence("text/html; charset=utf-8"), "text/html");
        assert_eq!(mime_essence(" IMAGE/JPEG "), "image/jpeg");
        assert_eq!(mime_essence(""), "");
    }

    #[test]
    fn test_kind_from_content_type() {
        assert_eq!(
            kind_from_content_type("image/png"),
            Some(MediaKind::ImagePng)
        );
        assert_eq!(
            kind_from_content_type("video/webm;codecs=vp9"),
            Some(MediaKind::VideoWebm)
        );
        assert_eq!(kind_from_content_type("text/html"), None);
        assert_eq!(kind_from_content_type("application/json"), None);
    }

    #[test]
    fn test_is_hypertext() {
        assert!(is_hypertext("text/html"));
        assert!(is_hypertext("text/html; charset=UTF-8"));
        assert!(!is_hypertext("text/plain"));
    }

    #[test]
    fn test_extract_extension_from_url() {
        assert_eq!(
            extract_extension_from_url("https://i.imgur.com/1.jpg"),
            Some("jpg".to_string())
        );
        assert_eq!(
            extract_extension_from_url("https://i.imgur.com/abc.PNG?x=1"),
            Some("png".to_string())
        );
        assert_eq!(extract_extension_from_url("https://imgur.com/abc"), None);
    }

    #[test]
    fn test_kind_from_link_prefers_declared_type() {
        assert_eq!(
            kind_from_link("https://i.imgur.com/1.jpg", Some("image/gif")),
            MediaKind::ImageGif
        );
    }

    #[test]
    fn test_kind_from_link_uses_extension() {
        assert_eq!(
            kind_from_link("https://i.imgur.com/1.png", None),
            MediaKind::ImagePng
        );
        assert_eq!(
            kind_from_link("https://i.imgur.com/1.mp4", Some("image/webp")),
            MediaKind::VideoMp4
        );
    }

    #[test]
    fn test_kind_from_link_defaults_to_image() {
        assert_eq!(
            kind_from_link("https://i.imgur.com/noext", None),
            DEFAULT_ALBUM_KIND
        );
        assert_eq!(
            kind_from_link("https://i.imgur.com/1.gifv", None),
            DEFAULT_ALBUM_KIND
        );
    }
}
