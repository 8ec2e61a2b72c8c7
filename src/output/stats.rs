//! Statistics reporting.

use console::style;

use crate::download::{DownloadState, GlobalState};
use crate::resolve::ResolutionStats;

/// Print how a user's submissions resolved.
pub fn print_resolution_stats(username: &str, stats: &ResolutionStats, resolved: usize) {
    println!();
    println!("{}", style(format!("Resolution for {}:", username)).bold());
    println!("  Submissions:     {}", stats.submissions);
    println!("  Direct media:    {}", stats.probe_ready);
    println!(
        "  Albums:          {} ids from {} URLs ({} items)",
        stats.album_ids, stats.album_urls, stats.album_items
    );
    println!(
        "  Videos:          {} of {}",
        stats.video_resolved, stats.video_urls
    );
    println!(
        "  Dropped:         {}",
        stats.probe_dropped
            + stats.reclassify_dropped
            + stats.album_urls.saturating_sub(stats.album_ids)
            + stats.album_calls_failed
            + stats.video_failed
    );
    println!("  Ready:           {}", resolved);
}

/// Print statistics for a single user.
pub fn print_user_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", state.username)).bold()
    );
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    println!("  Skipped:  {} (duplicates)", state.duplicate_count);
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());
}

/// Print global statistics across all users.
pub fn print_global_stats(state: &GlobalState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Global Statistics:").bold());
    println!("  Users processed: {}", state.users_processed);
    if state.users_failed > 0 {
        println!("  Users failed:    {}", style(state.users_failed).red());
    }
    println!("  Resolved: {}", state.resolved);
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    println!("  Skipped:  {} (duplicates)", state.duplicate_count);
    if state.failed_count > 0 {
        println!("  Failed:   {}", style(state.failed_count).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());
    println!("{}", style("═".repeat(50)).dim());
}
