//! Podcast PDF Archiver Library
//!
//! Turns a loosely-marked podcast web page into a single navigable PDF.
//! This library provides functionality to:
//! - Recover a two-level topic/episode outline from the page's flat marker sequence
//! - Download each episode's PDF idempotently (size-probe skip for existing files)
//! - Partition downloaded episodes into resolved topic ranges
//! - Merge the PDFs into one document with a matching two-level bookmark tree
//!
//! # Example
//!
//! ```no_run
//! use podcast_archiver::page::{assign_episodes, extract_page_metadata};
//! use podcast_archiver::pdf::assemble_archive;
//!
//! # async fn run(html: &str) -> podcast_archiver::Result<()> {
//! let metadata = extract_page_metadata(html)?;
//! let client = reqwest::Client::new();
//! let downloaded =
//!     podcast_archiver::download::download_all(&client, &metadata.episodes, "downloads".as_ref())
//!         .await?;
//! let topics = assign_episodes(metadata.topics, downloaded)?;
//! assemble_archive(&topics, "merged.pdf".as_ref())?;
//! # Ok(())
//! # }
//! ```

pub mod download;
pub mod error;
pub mod page;
pub mod pdf;

// Re-export commonly used items
pub use error::{AssignmentError, Error, ParseError, Result};
