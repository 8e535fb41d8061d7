mod cli;
mod config;
mod source;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::SiteConfig;
use crate::source::SiteData;

/// Posts shown in the summary.
const LATEST_POSTS: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homepage=debug,homepage_client=debug,homepage_content=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SiteConfig::load(&cli);
    let site = SiteData::open(&config)?;

    match cli.command.unwrap_or(Commands::Summary) {
        Commands::Summary => {
            let (visitors, entries) = tokio::join!(site.visitor_count(), site.guestbook_entries());
            println!("Mode:              {}", if site.is_live() { "live" } else { "static" });
            println!("Visitors:          {}", visitors);
            println!("Guestbook entries: {}", entries.len());
            println!("Latest posts:");
            for post in site.posts().iter().take(LATEST_POSTS) {
                println!("  {}  {}", post.date, post.title);
            }
        }
        Commands::Posts => {
            for post in site.posts() {
                println!("{}  {:<28} {}", post.date, post.slug, post.title);
            }
        }
        Commands::Post { slug } => {
            let post = site.post(&slug)?;
            println!("{}", post.title);
            println!("{}", post.date);
            println!();
            println!("{}", post.content);
        }
        Commands::Slugs => {
            for slug in site.content().post_slugs() {
                println!("{}", slug);
            }
        }
        Commands::Guestbook => {
            for entry in site.guestbook_entries().await {
                println!("[{}] {}: {}", entry.date, entry.name, entry.message);
            }
        }
        Commands::Sign { name, message } => {
            let entry = site.sign(&name, &message).await?;
            info!("Guestbook signed (id: {:?})", entry.id);
            println!("[{}] {}: {}", entry.date, entry.name, entry.message);
        }
        Commands::Health => match site.healthy().await {
            Some(true) => println!("ok"),
            Some(false) => anyhow::bail!("Guestbook service is not healthy"),
            None => println!("static mode, no service configured"),
        },
    }

    Ok(())
}
