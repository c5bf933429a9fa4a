//! Error types for the podcast archiver

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the podcast archiver
#[derive(Error, Debug)]
pub enum Error {
    /// The podcast page did not match an expected structural pattern
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Episodes could not be partitioned into topics
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// General error
    #[error("{0}")]
    General(String),
}

/// The page structure did not match an expected pattern.
///
/// Every variant carries the raw text of the offending marker so an operator
/// can locate the unexpected formatting on the source page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Episode marker has no digits after the word "Episode"
    #[error("no episode number after \"Episode\" in marker {0:?}")]
    MissingEpisodeNumber(String),

    /// No hyperlink sibling follows the episode marker
    #[error("no download link follows episode marker {0:?}")]
    MissingEpisodeLink(String),

    /// Topic marker text does not match "Topic <number> <title>"
    #[error("topic marker {0:?} does not match \"Topic <number> <title>\"")]
    MalformedTopicMarker(String),

    /// Document ended before an episode marker was found for a topic
    #[error("no episode marker follows topic {0:?}")]
    MissingBoundaryEpisode(String),
}

/// Downloaded episodes could not be partitioned into topics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// The page yielded no topics to hold the episodes
    #[error("page contains no topics to hold the downloaded episodes")]
    NoTopics,

    /// Episodes left over after every topic took its range
    #[error("episodes {0:?} fell outside every topic range")]
    UnclaimedEpisodes(Vec<u32>),
}
