//! Download state tracking.

use std::collections::HashSet;

use crate::media::MediaKind;
use crate::resolve::ResolutionStats;

/// Per-user download state.
#[derive(Debug, Default)]
pub struct DownloadState {
    pub username: String,

    // URLs already fetched during this run
    pub seen_urls: HashSet<String>,

    // Statistics
    pub submissions: u64,
    pub resolved: u64,
    pub duplicate_count: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub failed_count: u64,
}

impl DownloadState {
    /// Create a new download state for a user.
    pub fn new(username: String) -> Self {
        Self {
            username,
            ..Default::default()
        }
    }

    /// Record the resolution summary that precedes downloading.
    pub fn record_resolution(&mut self, stats: &ResolutionStats, resolved: usize) {
        self.submissions = stats.submissions;
        self.resolved = resolved as u64;
    }

    /// Mark a URL as handled; returns false if it was already seen.
    pub fn mark_url_seen(&mut self, url: &str) -> bool {
        self.seen_urls.insert(url.to_string())
    }

    pub fn increment_duplicate(&mut self) {
        self.duplicate_count += 1;
    }

    pub fn increment_failed(&mut self) {
        self.failed_count += 1;
    }

    /// Count a completed download of the given kind.
    pub fn record_download(&mut self, kind: MediaKind) {
        if kind.is_video() {
            self.vid_count += 1;
        } else {
            self.pic_count += 1;
        }
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}

/// Global statistics across all users.
#[derive(Debug, Default)]
pub struct GlobalState {
    pub duplicate_count: u64,
    pub pic_count: u64,
    pub vid_count: u64,
    pub failed_count: u64,
    pub resolved: u64,
    pub users_processed: u64,
    pub users_failed: u64,
}

impl GlobalState {
    /// Add statistics from a user's download state.
    pub fn add_user_stats(&mut self, state: &DownloadState) {
        self.duplicate_count += state.duplicate_count;
        self.pic_count += state.pic_count;
        self.vid_count += state.vid_count;
        self.failed_count += state.failed_count;
        self.resolved += state.resolved;
        self.users_processed += 1;
    }

    /// Mark a user as failed.
    pub fn mark_user_failed(&mut self) {
        self.users_failed += 1;
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_download_by_kind() {
        let mut state = DownloadState::new("someone".to_string());
        state.record_download(MediaKind::ImageGif);
        state.record_download(MediaKind::VideoMp4);
        state.record_download(MediaKind::VideoWebm);

        assert_eq!(state.pic_count, 1);
        assert_eq!(state.vid_count, 2);
        assert_eq!(state.total_downloaded(), 3);
    }

    #[test]
    fn test_mark_url_seen() {
        let mut state = DownloadState::new("someone".to_string());
        assert!(state.mark_url_seen("https://a/1.jpg"));
        assert!(!state.mark_url_seen("https://a/1.jpg"));
    }

    #[test]
    fn test_global_aggregation() {
        let mut a = DownloadState::new("a_user".to_string());
        a.record_download(MediaKind::ImageJpeg);
        a.increment_duplicate();
        let mut b = DownloadState::new("b_user".to_string());
        b.record_download(MediaKind::VideoMp4);
        b.increment_failed();

        let mut global = GlobalState::default();
        global.add_user_stats(&a);
        global.add_user_stats(&b);
        global.mark_user_failed();

        assert_eq!(global.total_downloaded(), 2);
        assert_eq!(global.duplicate_count, 1);
        assert_eq!(global.failed_count, 1);
        assert_eq!(global.users_processed, 2);
        assert_eq!(global.users_failed, 1);
    }
}
