//! Filename generation and sanitization.

use url::Url;

use crate::error::{Error, Result};
use crate::media::parser::extract_extension_from_url;
use crate::media::ResolvedMedia;

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Sanitize a path component (a username folder) with less strict validation.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Filename for a resolved item: the last URL path segment, with the kind's
/// extension added when the segment has none.
pub fn filename_for(item: &ResolvedMedia) -> Result<String> {
    let url = Url::parse(&item.url)?;
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidFilename(format!("No filename in URL: {}", item.url)))?;

    let decoded = urlencoding::decode(segment).unwrap_or_else(|e| {
        tracing::debug!("Keeping undecodable segment {}: {}", segment, e);
        segment.into()
    });
    let decoded = decoded.replace(['/', '\\'], "_");

    let name = if extract_extension_from_url(&decoded).is_some() {
        decoded
    } else {
        format!("{}.{}", decoded, item.kind.extension())
    };

    sanitize_filename(&name)
}
