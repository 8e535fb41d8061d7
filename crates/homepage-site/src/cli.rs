use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Mode;

/// Inspect the data behind the homepage widgets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where guestbook and visitor data come from (overrides HOMEPAGE_MODE)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Base URL of the guestbook service (overrides HOMEPAGE_API_URL)
    #[arg(long = "api-url")]
    pub api_url: Option<String>,

    /// Read fixtures from this directory instead of the bundled set
    /// (overrides HOMEPAGE_CONTENT_DIR)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Visitor count, guestbook size and latest posts (default)
    Summary,

    /// List blog posts, newest first
    Posts,

    /// Print a single blog post
    Post {
        slug: String,
    },

    /// Print the slug of every post page to prerender
    Slugs,

    /// List guestbook entries
    Guestbook,

    /// Sign the guestbook (live mode only)
    Sign {
        name: String,
        message: String,
    },

    /// Check whether the guestbook service is up
    Health,
}
