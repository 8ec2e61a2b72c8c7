//! Downloading a user's resolved media.

use reqwest::Client;

use crate::config::Config;
use crate::download::media::download_media_item;
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::fs::get_user_folder;
use crate::output::create_item_bar;
use crate::resolve::Resolution;

/// Download every resolved item for the user in `state`.
///
/// A failed item is logged and counted; it never stops the batch.
pub async fn download_resolution(
    client: &Client,
    config: &Config,
    state: &mut DownloadState,
    resolution: &Resolution,
) -> Result<()> {
    let target_dir = get_user_folder(config, &state.username)?;

    tracing::info!(
        "Downloading {} items for {} into {}",
        resolution.len(),
        state.username,
        target_dir.display()
    );

    let bar = create_item_bar(resolution.len() as u64, &state.username);

    for item in &resolution.media {
        bar.set_message(item.url.clone());
        if let Err(e) = download_media_item(client, config, state, item, &target_dir).await {
            tracing::warn!("Failed to download {}: {}", item.url, e);
            state.increment_failed();
        }
        bar.inc(1);
    }

    bar.finish_and_clear();

    tracing::info!(
        "Download complete for {}: {} pictures, {} videos",
        state.username,
        state.pic_count,
        state.vid_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::build_client;
    use crate::media::{MediaKind, ResolvedMedia};
    use crate::resolve::ResolutionStats;

    #[tokio::test]
    async fn test_failures_do_not_stop_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"JPG".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/missing.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.options.download_directory = Some(dir.path().to_path_buf());

        let resolution = Resolution {
            media: vec![
                ResolvedMedia::new(format!("{}/missing.jpg", server.uri()), MediaKind::ImageJpeg),
                ResolvedMedia::new(format!("{}/ok.jpg", server.uri()), MediaKind::ImageJpeg),
            ],
            stats: ResolutionStats::default(),
        };

        let client = build_client("picrip-test", Duration::from_secs(5)).unwrap();
        let mut state = DownloadState::new("someone".to_string());
        download_resolution(&client, &config, &mut state, &resolution)
            .await
            .unwrap();

        assert_eq!(state.pic_count, 1);
        assert_eq!(state.failed_count, 1);
        assert!(dir.path().join("someone").join("ok.jpg").exists());
    }
}
