//! Console output utilities.

use console::style;

use crate::media::ResolvedMedia;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     picrip                                            ║
║     Resolve and download media from Reddit posts      ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(users: &[String], download_dir: &str, dry_run: bool) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Users: {}", users.join(", "));
    println!("  Directory: {}", download_dir);
    if dry_run {
        println!("  Mode: dry run (list URLs only)");
    }
    println!();
}

/// Print resolved URLs, one per line, tagged with their kind.
pub fn print_resolved(media: &[ResolvedMedia]) {
    for item in media {
        println!("{}  {}", style(format!("{:<10}", item.kind)).dim(), item.url);
    }
}
