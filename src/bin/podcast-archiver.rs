//! Podcast archiver CLI
//!
//! Scrapes the podcast page, downloads every episode PDF, and writes one
//! merged PDF whose bookmark tree mirrors the page's topic/episode outline.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use podcast_archiver::download::{download_all, fetch_page};
use podcast_archiver::page::{assign_episodes, extract_page_metadata, PODCAST_PAGE_URL};
use podcast_archiver::pdf::assemble_archive;

/// Podcast Archiver - build one bookmarked PDF from a podcast's episode handouts
#[derive(Parser)]
#[command(name = "podcast-archiver")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Archive the default podcast page
    podcast-archiver

    # Archive a mirror into a custom location
    podcast-archiver --page-url https://mirror.example.com/ -o archive.pdf --download-dir cache")]
struct Cli {
    /// Podcast page to scrape for topics and episode PDF links
    #[arg(long, default_value = PODCAST_PAGE_URL)]
    page_url: String,

    /// Output PDF file path
    #[arg(short, long, default_value = "merged.pdf")]
    output: PathBuf,

    /// Directory for downloaded episode PDFs (reused across runs)
    #[arg(long, default_value = "downloads")]
    download_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let client = Client::new();

    let html = fetch_page(&client, &cli.page_url).await?;
    let metadata = extract_page_metadata(&html)?;
    info!(
        topics = metadata.topics.len(),
        episodes = metadata.episodes.len(),
        "recovered page outline"
    );

    let downloaded = download_all(&client, &metadata.episodes, &cli.download_dir).await?;
    let topics = assign_episodes(metadata.topics, downloaded)?;
    assemble_archive(&topics, &cli.output)?;

    info!(output = %cli.output.display(), "archive written");
    Ok(())
}
