//! Media file downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::fs::filename_for;
use crate::media::ResolvedMedia;
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Download a resolved item into `target_dir`.
///
/// Returns `Ok(None)` when the item was skipped as a duplicate.
pub async fn download_media_item(
    client: &Client,
    config: &Config,
    state: &mut DownloadState,
    item: &ResolvedMedia,
    target_dir: &Path,
) -> Result<Option<PathBuf>> {
    if !state.mark_url_seen(&item.url) {
        state.increment_duplicate();
        tracing::debug!("Skipping duplicate URL: {}", item.url);
        return Ok(None);
    }

    let filename = filename_for(item)?;
    let output_path = target_dir.join(&filename);

    if output_path.exists() {
        state.increment_duplicate();
        tracing::debug!("Skipping existing file: {}", output_path.display());
        return Ok(None);
    }

    tokio::fs::create_dir_all(target_dir).await?;

    let downloaded_path = download_direct(client, config, item, &output_path).await?;
    state.record_download(item.kind);

    if config.options.show_downloads {
        tracing::info!("Downloaded: {}", downloaded_path.display());
    }

    Ok(Some(downloaded_path))
}

/// Stream a response body to a temporary file, then move it into place.
async fn download_direct(
    client: &Client,
    config: &Config,
    item: &ResolvedMedia,
    output_path: &Path,
) -> Result<PathBuf> {
    let response = client.get(&item.url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Download(format!(
            "Failed to download {}: HTTP {}",
            item.url,
            response.status()
        )));
    }

    let content_length = response.content_length();
    let show_progress = config.options.show_downloads
        && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false);

    let progress = show_progress.then(|| {
        let label = output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        create_download_bar(content_length.unwrap_or(0), &label)
    });

    let parent = output_path.parent().unwrap_or(Path::new("."));
    let temp_path = parent.join(format!(".{}.part", uuid::Uuid::new_v4()));

    let result = write_stream(response, &temp_path, progress.as_ref()).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if let Err(e) = result {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, output_path).await?;
    Ok(output_path.to_path_buf())
}

async fn write_stream(
    response: reqwest::Response,
    path: &Path,
    progress: Option<&ProgressBar>,
) -> Result<()> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    Ok(())
}
