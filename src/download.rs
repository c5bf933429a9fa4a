//! Page fetch and idempotent episode downloads
//!
//! Every episode fetch is independent, so the whole set runs concurrently;
//! the stages after this one only consume the complete set, and any single
//! failure aborts the run (a partial archive is never written).
//!
//! A local file is reused when its byte size equals the remote
//! `Content-Length` from a HEAD probe. Size is a weak identity check, but it
//! matches the server's behavior of replacing episode PDFs wholesale; see
//! DESIGN.md for the tradeoff.

use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::Result;
use crate::page::EpisodeRecord;
use crate::pdf::count_pages;

/// An episode's PDF on local disk, ready for assembly
#[derive(Debug, Clone)]
pub struct DownloadedEpisode {
    pub episode_number: u32,
    pub title: String,
    pub local_path: PathBuf,
    pub page_count: usize,
}

/// Fetch the podcast page's HTML.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(html)
}

/// Download every episode's PDF concurrently into `download_dir`.
pub async fn download_all(
    client: &Client,
    episodes: &[EpisodeRecord],
    download_dir: &Path,
) -> Result<Vec<DownloadedEpisode>> {
    tokio::fs::create_dir_all(download_dir).await?;
    let downloads = episodes
        .iter()
        .map(|episode| download_episode(client, episode, download_dir));
    futures::future::try_join_all(downloads).await
}

/// Download one episode's PDF unless a matching local copy exists, then read
/// its page count.
async fn download_episode(
    client: &Client,
    episode: &EpisodeRecord,
    download_dir: &Path,
) -> Result<DownloadedEpisode> {
    let local_path = download_dir.join(format!("{}.pdf", episode.episode_number));

    if !can_skip_download(client, episode, &local_path).await? {
        let body = client
            .get(&episode.source_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tokio::fs::write(&local_path, &body).await?;
        debug!(
            episode = episode.episode_number,
            bytes = body.len(),
            "episode PDF downloaded"
        );
    }

    let page_count = count_pages(&local_path)?;
    Ok(DownloadedEpisode {
        episode_number: episode.episode_number,
        title: episode.title.clone(),
        local_path,
        page_count,
    })
}

/// A local file whose byte size matches the remote size probe is kept as-is.
async fn can_skip_download(
    client: &Client,
    episode: &EpisodeRecord,
    local_path: &Path,
) -> Result<bool> {
    let local = match tokio::fs::metadata(local_path).await {
        Ok(metadata) => metadata,
        Err(_) => return Ok(false),
    };

    let response = client.head(&episode.source_url).send().await?;
    let remote_size: u64 = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);

    let matches = remote_size > 0 && remote_size == local.len();
    if matches {
        info!(
            episode = episode.episode_number,
            bytes = remote_size,
            "local file matches remote size, skipping download"
        );
    }
    Ok(matches)
}
