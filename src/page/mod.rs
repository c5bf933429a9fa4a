//! Webpage structure recovery
//!
//! The podcast page is a flat document where `<strong>` elements whose text
//! starts with "Topic" or "Episode" act as markers. This module classifies the
//! markers, rebuilds the topic/episode outline, and partitions downloaded
//! episodes into the recovered topic ranges.

pub mod classify;
pub mod extract;
pub mod topics;

// Re-export commonly used items
pub use classify::{classify_marker, MarkerKind};
pub use extract::{extract_page_metadata, EpisodeRecord, PageMetadata};
pub use topics::{assign_episodes, resolve_boundaries, TopicRecord, TopicWithEpisodes};

/// Home page of the podcast; every episode PDF is linked from here.
pub const PODCAST_PAGE_URL: &str = "https://howtoreadchinesepoetry.com/";
