//! Progress indicators for resolution and downloads.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::resolve::Wave;

const TICK: Duration = Duration::from_millis(120);

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Spinner shown while a user's submissions are resolved.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style("{spinner:.green} {msg} [{elapsed}]"));
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(TICK);
    spinner
}

/// Spinner message for a wave that is about to run.
pub fn wave_message(username: &str, wave: Wave, items: usize) -> String {
    format!("Resolving {}: {} ({} items)", username, wave, items)
}

/// Byte progress of a single media download, labelled with its filename.
pub fn create_download_bar(total: u64, filename: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(style(
        "  {msg:20!} [{bar:30.cyan/blue}] {binary_bytes}/{binary_total_bytes} {binary_bytes_per_sec}",
    ));
    bar.set_message(filename.to_string());
    bar
}

/// Item progress over a user's resolved media; the message names the
/// current file.
pub fn create_item_bar(total: u64, username: &str) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(style(
        "{spinner:.green} {prefix} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
    ));
    bar.set_prefix(username.to_string());
    bar
}
