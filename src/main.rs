//! picrip - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use reqwest::Client;
use tracing_subscriber::{fmt, EnvFilter};

use picrip::{
    api::{client_from_config, download_client_from_config, RedditClient, SubmissionSource},
    cli::Args,
    config::{validate_config, Config},
    download::{download_resolution, DownloadState, GlobalState},
    error::{exit_codes, Result},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_global_stats,
        print_info, print_resolution_stats, print_resolved, print_user_stats, print_warning,
        wave_message,
    },
    resolve::ResolutionPipeline,
};

#[tokio::main]
async fn main() -> ExitCode {
    let outcome = tokio::select! {
        outcome = run() => outcome,
        _ = tokio::signal::ctrl_c() => {
            print_warning("Interrupted, stopping");
            return ExitCode::from(exit_codes::ABORT as u8);
        }
    };

    match outcome {
        Ok(global_state) if global_state.users_failed > 0 => {
            ExitCode::from(exit_codes::SOME_USERS_FAILED as u8)
        }
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> Result<GlobalState> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = match Config::locate(&args.config) {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            Config::load(&path)?
        }
        None => {
            print_warning(&format!(
                "Configuration file not found: {}",
                args.config.display()
            ));
            print_info("Using default configuration with CLI arguments");
            Config::default()
        }
    };

    let config_path = args.config.clone();
    let save_config = args.save_config;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    if save_config {
        config.save(&config_path)?;
        print_info(&format!("Saved configuration to {}", config_path.display()));
    }

    let users: Vec<String> = config.targets.usernames.iter().cloned().collect();
    print_config_summary(
        &users,
        &config.download_directory().display().to_string(),
        config.options.dry_run,
    );

    let client = client_from_config(&config)?;
    let download_client = download_client_from_config(&config)?;
    let reddit = RedditClient::new(client.clone(), &config.reddit);
    let pipeline = ResolutionPipeline::from_config(client, &config);

    let mut global_state = GlobalState::default();

    for username in &users {
        print_info(&format!("Processing user: {}", username));

        match process_user(&download_client, &reddit, &pipeline, &config, username).await {
            Ok(state) => {
                if !config.options.dry_run {
                    print_user_stats(&state);
                }
                global_state.add_user_stats(&state);
            }
            Err(e) => {
                print_error(&format!("Failed to process {}: {}", username, e));
                global_state.mark_user_failed();
            }
        }
    }

    print_global_stats(&global_state);

    Ok(global_state)
}

/// List, resolve and download (or print) one user's media.
async fn process_user(
    download_client: &Client,
    source: &dyn SubmissionSource,
    pipeline: &ResolutionPipeline,
    config: &Config,
    username: &str,
) -> Result<DownloadState> {
    let mut state = DownloadState::new(username.to_string());

    let submissions = source.submissions(username).await?;
    print_info(&format!(
        "Found {} submissions for {}",
        submissions.len(),
        username
    ));

    let spinner = create_spinner(&format!("Resolving {}...", username));
    let mut resolution = pipeline
        .run_observed(submissions, |wave, items| {
            spinner.set_message(wave_message(username, wave, items));
        })
        .await;
    spinner.finish_and_clear();

    if config.options.deduplicate {
        resolution = resolution.deduplicated();
    }

    print_resolution_stats(username, &resolution.stats, resolution.len());
    state.record_resolution(&resolution.stats, resolution.len());

    if resolution.is_empty() {
        print_warning(&format!("No media resolved for {}", username));
        return Ok(state);
    }

    if config.options.dry_run {
        print_resolved(&resolution.media);
        return Ok(state);
    }

    download_resolution(download_client, config, &mut state, &resolution).await?;

    Ok(state)
}
