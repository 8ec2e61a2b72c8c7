//! Multi-wave resolution of submission URLs into downloadable media.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::media::ResolvedMedia;
use crate::resolve::album::{extract_album_id, AlbumId, AlbumResolver};
use crate::resolve::classify::{Category, Classifier};
use crate::resolve::probe::{ContentProbe, ProbeOutcome};
use crate::resolve::video::VideoResolver;

/// Passes a submission may take through the pipeline: the direct probe plus
/// one reclassification of a hypertext result.
pub const MAX_PASSES: u8 = 2;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Probe,
    Reclassify,
    ExtractAlbumIds,
    ExpandAlbums,
    ResolveVideos,
}

impl fmt::Display for Wave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wave::Probe => write!(f, "probe"),
            Wave::Reclassify => write!(f, "reclassify"),
            Wave::ExtractAlbumIds => write!(f, "extract album ids"),
            Wave::ExpandAlbums => write!(f, "expand albums"),
            Wave::ResolveVideos => write!(f, "resolve videos"),
        }
    }
}

/// A probed URL that served hypertext, awaiting another classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReprocess {
    pub url: String,
    /// Passes already spent on this URL.
    pub passes: u8,
}

/// Per-wave counters of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub submissions: u64,
    pub probe_ready: u64,
    pub probe_reprocess: u64,
    pub probe_dropped: u64,
    pub reclassify_dropped: u64,
    pub album_urls: u64,
    pub album_ids: u64,
    pub album_calls_failed: u64,
    pub album_items: u64,
    pub video_urls: u64,
    pub video_resolved: u64,
    pub video_failed: u64,
    pub task_failures: u64,
}

/// Output of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Resolved items; order is unspecified and duplicates are kept.
    pub media: Vec<ResolvedMedia>,
    pub stats: ResolutionStats,
}

impl Resolution {
    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    /// Drop items whose URL was already seen, keeping the first occurrence.
    pub fn deduplicated(mut self) -> Self {
        let mut seen = HashSet::new();
        self.media.retain(|item| seen.insert(item.url.clone()));
        self
    }
}

/// The classifier and the three resolvers, shared by every task of a wave.
#[derive(Debug)]
pub struct Resolvers {
    pub classifier: Classifier,
    pub probe: ContentProbe,
    pub album: AlbumResolver,
    pub video: VideoResolver,
}

impl Resolvers {
    pub fn from_config(client: Client, config: &Config) -> Self {
        Self {
            classifier: Classifier::from_config(config),
            probe: ContentProbe::new(client.clone()),
            album: AlbumResolver::from_config(client.clone(), &config.album_host),
            video: VideoResolver::from_config(client, &config.video_host),
        }
    }
}

/// Orchestrates the resolution waves.
///
/// Within a wave every item runs as its own task; a wave completes before the
/// next starts. Results flow back through the join set to the single
/// collecting task, so no output is shared between tasks.
pub struct ResolutionPipeline {
    resolvers: Arc<Resolvers>,
    limiter: Option<Arc<Semaphore>>,
}

impl ResolutionPipeline {
    pub fn new(resolvers: Resolvers, max_concurrency: Option<usize>) -> Self {
        Self {
            resolvers: Arc::new(resolvers),
            limiter: max_concurrency.map(|n| Arc::new(Semaphore::new(n.max(1)))),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            Resolvers::from_config(client, config),
            config.options.max_concurrency,
        )
    }

    /// Resolve submission URLs. Never fails: every error is confined to its
    /// item, and whatever resolved is returned.
    pub async fn run(&self, submissions: Vec<String>) -> Resolution {
        self.run_observed(submissions, |_, _| {}).await
    }

    /// Like [`run`](Self::run), calling `on_wave` with each wave and its
    /// item count just before the wave starts.
    pub async fn run_observed<O>(&self, submissions: Vec<String>, on_wave: O) -> Resolution
    where
        O: Fn(Wave, usize),
    {
        let mut stats = ResolutionStats {
            submissions: submissions.len() as u64,
            ..Default::default()
        };
        let mut media = Vec::new();

        // Wave 1: probe every submission.
        on_wave(Wave::Probe, submissions.len());
        let outcomes = self
            .fan_out(Wave::Probe, &mut stats, submissions, |r, url: String| async move {
                r.probe.probe(&url).await
            })
            .await;

        let mut pending = Vec::new();
        for outcome in outcomes {
            match outcome {
                ProbeOutcome::Ready(item) => {
                    stats.probe_ready += 1;
                    media.push(item);
                }
                ProbeOutcome::Reprocess(url) => {
                    stats.probe_reprocess += 1;
                    pending.push(PendingReprocess { url, passes: 1 });
                }
                ProbeOutcome::Dropped => stats.probe_dropped += 1,
            }
        }
        tracing::info!(
            "Wave {}: {} ready, {} need reclassification, {} dropped",
            Wave::Probe,
            stats.probe_ready,
            stats.probe_reprocess,
            stats.probe_dropped
        );

        // Wave 2: reclassify hypertext results.
        on_wave(Wave::Reclassify, pending.len());
        let (album_urls, video_urls) = self.reclassify(pending, &mut stats);
        stats.album_urls = album_urls.len() as u64;
        stats.video_urls = video_urls.len() as u64;
        tracing::info!(
            "Wave {}: {} album host, {} video host, {} dropped",
            Wave::Reclassify,
            stats.album_urls,
            stats.video_urls,
            stats.reclassify_dropped
        );

        // Wave 3: pull album identifiers out of album host paths.
        on_wave(Wave::ExtractAlbumIds, album_urls.len());
        let album_ids: Vec<AlbumId> = album_urls
            .iter()
            .filter_map(|url| {
                let id = extract_album_id(url);
                if id.is_none() {
                    tracing::debug!("No album identifier in {}", url);
                }
                id
            })
            .collect();
        stats.album_ids = album_ids.len() as u64;
        tracing::info!(
            "Wave {}: {} identifiers from {} URLs",
            Wave::ExtractAlbumIds,
            stats.album_ids,
            stats.album_urls
        );

        // Wave 4: one album listing call per identifier.
        on_wave(Wave::ExpandAlbums, album_ids.len());
        let albums = self
            .fan_out(Wave::ExpandAlbums, &mut stats, album_ids, |r, id: AlbumId| async move {
                r.album.expand(&id).await
            })
            .await;
        for album in albums {
            match album {
                Some(items) => {
                    stats.album_items += items.len() as u64;
                    media.extend(items);
                }
                None => stats.album_calls_failed += 1,
            }
        }
        tracing::info!(
            "Wave {}: {} items, {} calls failed",
            Wave::ExpandAlbums,
            stats.album_items,
            stats.album_calls_failed
        );

        // Wave 5: one lookup per video page.
        on_wave(Wave::ResolveVideos, video_urls.len());
        let videos = self
            .fan_out(Wave::ResolveVideos, &mut stats, video_urls, |r, url: String| async move {
                r.video.resolve(&url).await
            })
            .await;
        for video in videos {
            match video {
                Some(item) => {
                    stats.video_resolved += 1;
                    media.push(item);
                }
                None => stats.video_failed += 1,
            }
        }
        tracing::info!(
            "Wave {}: {} resolved, {} failed",
            Wave::ResolveVideos,
            stats.video_resolved,
            stats.video_failed
        );

        Resolution { media, stats }
    }

    /// Route reprocessed URLs to the album or video host. URLs that classify
    /// as generic again, or that have used up their passes, are dropped.
    fn reclassify(
        &self,
        pending: Vec<PendingReprocess>,
        stats: &mut ResolutionStats,
    ) -> (Vec<String>, Vec<String>) {
        let mut album_urls = Vec::new();
        let mut video_urls = Vec::new();

        for item in pending {
            if item.passes >= MAX_PASSES {
                tracing::debug!("{} exhausted its {} passes", item.url, MAX_PASSES);
                stats.reclassify_dropped += 1;
                continue;
            }

            let classified = self.resolvers.classifier.classify_url(item.url);
            match classified.category {
                Category::AlbumHost => album_urls.push(classified.url),
                Category::VideoHost => video_urls.push(classified.url),
                Category::GenericProbe => {
                    tracing::debug!("{} is not on a known host, dropping", classified.url);
                    stats.reclassify_dropped += 1;
                }
            }
        }

        (album_urls, video_urls)
    }

    /// Run `task` once per item, each on its own tokio task, and wait for all
    /// of them. A panicking task is logged and counted; its siblings run on.
    async fn fan_out<T, R, F, Fut>(
        &self,
        wave: Wave,
        stats: &mut ResolutionStats,
        items: Vec<T>,
        task: F,
    ) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(Arc<Resolvers>, T) -> Fut,
        Fut: Future<Output = R> + Send + 'static,
    {
        let mut set = JoinSet::new();
        for item in items {
            let work = task(Arc::clone(&self.resolvers), item);
            let limiter = self.limiter.clone();

            set.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                work.await
            });
        }

        tracing::debug!("Wave {}: {} tasks started", wave, set.len());

        let mut results = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!("Wave {} task failed: {}", wave, e);
                    stats.task_failures += 1;
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::api::build_client;
    use crate::media::MediaKind;

    fn pipeline() -> ResolutionPipeline {
        let client = build_client("picrip-test", Duration::from_secs(5)).unwrap();
        ResolutionPipeline::from_config(client, &Config::default())
    }

    #[test]
    fn test_empty_input() {
        let resolution = tokio_test::block_on(pipeline().run(Vec::new()));
        assert!(resolution.is_empty());
        assert_eq!(resolution.stats, ResolutionStats::default());
    }

    #[test]
    fn test_observer_sees_every_wave_in_order() {
        use std::sync::Mutex;

        let seen = Mutex::new(Vec::new());
        let resolution = tokio_test::block_on(
            pipeline().run_observed(Vec::new(), |wave, items| {
                seen.lock().unwrap().push((wave, items));
            }),
        );

        assert!(resolution.is_empty());
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                (Wave::Probe, 0),
                (Wave::Reclassify, 0),
                (Wave::ExtractAlbumIds, 0),
                (Wave::ExpandAlbums, 0),
                (Wave::ResolveVideos, 0),
            ]
        );
    }

    #[test]
    fn test_reclassify_routes_by_host() {
        let p = pipeline();
        let mut stats = ResolutionStats::default();
        let pending = [
            "https://m.imgur.com/a/AbCdE",
            "https://gfycat.com/SomeName",
            "https://example.com/page",
        ]
        .into_iter()
        .map(|url| PendingReprocess {
            url: url.to_string(),
            passes: 1,
        })
        .collect();

        let (albums, videos) = p.reclassify(pending, &mut stats);
        assert_eq!(albums, vec!["https://m.imgur.com/a/AbCdE"]);
        assert_eq!(videos, vec!["https://gfycat.com/SomeName"]);
        assert_eq!(stats.reclassify_dropped, 1);
    }

    #[test]
    fn test_reclassify_enforces_pass_limit() {
        let p = pipeline();
        let mut stats = ResolutionStats::default();
        let pending = vec![PendingReprocess {
            url: "https://gfycat.com/SomeName".to_string(),
            passes: MAX_PASSES,
        }];

        let (albums, videos) = p.reclassify(pending, &mut stats);
        assert!(albums.is_empty());
        assert!(videos.is_empty());
        assert_eq!(stats.reclassify_dropped, 1);
    }

    #[test]
    fn test_deduplicated_keeps_first() {
        let resolution = Resolution {
            media: vec![
                ResolvedMedia::new("https://a/1.jpg", MediaKind::ImageJpeg),
                ResolvedMedia::new("https://a/2.png", MediaKind::ImagePng),
                ResolvedMedia::new("https://a/1.jpg", MediaKind::ImageJpeg),
            ],
            stats: ResolutionStats::default(),
        }
        .deduplicated();

        assert_eq!(resolution.len(), 2);
        assert_eq!(resolution.media[0].url, "https://a/1.jpg");
        assert_eq!(resolution.media[1].url, "https://a/2.png");
    }

    #[tokio::test]
    async fn test_fan_out_isolates_panics() {
        let p = pipeline();
        let mut stats = ResolutionStats::default();

        let results = p
            .fan_out(Wave::Probe, &mut stats, vec![1u32, 2, 3, 4], |_, n| async move {
                if n == 3 {
                    panic!("boom");
                }
                n * 10
            })
            .await;

        let mut results = results;
        results.sort_unstable();
        assert_eq!(results, vec![10, 20, 40]);
        assert_eq!(stats.task_failures, 1);
    }

    #[tokio::test]
    async fn test_fan_out_respects_limit() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let client = build_client("picrip-test", Duration::from_secs(5)).unwrap();
        let p = ResolutionPipeline::new(Resolvers::from_config(client, &Config::default()), Some(2));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let mut stats = ResolutionStats::default();

        let results = p
            .fan_out(Wave::Probe, &mut stats, (0..8).collect::<Vec<u32>>(), |_, n| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    n
                }
            })
            .await;

        assert_eq!(results.len(), 8);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }
}
