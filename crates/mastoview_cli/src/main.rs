//! Command-line entry point for the archive viewer.
//!
//! # Responsibility
//! - Resolve environment, `.env` and flags into core configuration.
//! - Run the attachment URL fix and print data views for page rendering.
//!
//! # Invariants
//! - Every failure reaches `main`, is logged, and exits non-zero.

mod commands;

use clap::{Parser, Subcommand};
use log::error;
use mastoview_core::{default_log_level, init_logging, DEFAULT_ARCHIVE_DIR};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mastoview")]
#[command(about = "Browse and maintain a Mastodon account archive export")]
#[command(version)]
struct Cli {
    /// Directory holding `actor.json` and `outbox.json`
    #[arg(long, env = "MASTOVIEW_ARCHIVE_DIR", default_value = DEFAULT_ARCHIVE_DIR)]
    archive_dir: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "MASTOVIEW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset
    #[arg(long, env = "MASTOVIEW_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Strip server folders from attachment URLs in outbox.json, in place
    FixAttachments,
    /// List visible posts, newest first
    Posts {
        #[arg(long)]
        json: bool,
    },
    /// Show the reply chain leading to a post
    Thread {
        /// Trailing segment of the post's object id
        post_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the profile projection as JSON
    Profile,
    /// List attachments of visible posts with their served URLs
    Media {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // A missing .env is the common case.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match commands::run(&cli.archive_dir, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
