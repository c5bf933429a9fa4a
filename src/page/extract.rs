//! Episode and topic record extraction
//!
//! Markers only anchor the outline; the data hangs off their surroundings.
//! An episode marker's title is the text of its following siblings up to the
//! first hyperlink, which in turn carries the PDF URL. A topic marker's first
//! episode is the next episode marker in reading order.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ParseError;
use crate::page::classify::{classify_marker, MarkerKind};
use crate::page::topics::{resolve_boundaries, TopicRecord};

static STRONG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("strong").expect("valid selector"));
static EPISODE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Episode\s+(\d+)").expect("valid regex"));
static TOPIC_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Topic\s+\d+\s+(.+)").expect("valid regex"));

/// One episode's PDF link as recovered from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub episode_number: u32,
    /// May be empty; the page sometimes links an episode without a caption
    pub title: String,
    pub source_url: String,
}

/// Everything the download and assembly stages need from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Episodes in document order
    pub episodes: Vec<EpisodeRecord>,
    /// Topics in document order with resolved range boundaries
    pub topics: Vec<TopicRecord>,
}

/// Recover the full outline from the page HTML.
///
/// A single scan over the page's `<strong>` markers in document order feeds
/// both lists, so `topics` is ordered by `first_episode` by construction.
/// Pure function of the input: any unexpected structure is a hard
/// [`ParseError`], never a partial outline.
pub fn extract_page_metadata(html: &str) -> Result<PageMetadata, ParseError> {
    let document = Html::parse_document(html);
    let markers: Vec<(MarkerKind, ElementRef<'_>)> = document
        .select(&STRONG_SELECTOR)
        .map(|element| (classify_marker(element), element))
        .collect();

    let mut episodes = Vec::new();
    let mut topics = Vec::new();
    for (index, &(kind, element)) in markers.iter().enumerate() {
        match kind {
            MarkerKind::Episode => episodes.push(episode_from_marker(element)?),
            MarkerKind::Topic => topics.push(topic_from_marker(element, &markers[index + 1..])?),
            MarkerKind::Other => {}
        }
    }
    resolve_boundaries(&mut topics);

    Ok(PageMetadata { episodes, topics })
}

/// Build an [`EpisodeRecord`] from an episode marker.
///
/// Folds over the marker's following siblings: text accumulates into the
/// title until the first `<a>` element, which supplies the PDF URL and stops
/// the walk. Non-hyperlink elements contribute their inner text.
fn episode_from_marker(marker: ElementRef<'_>) -> Result<EpisodeRecord, ParseError> {
    let raw = marker_text(marker);
    let episode_number = parse_episode_number(&raw)?;

    let mut title = String::new();
    let mut source_url = None;
    for sibling in marker.next_siblings() {
        match sibling.value() {
            Node::Element(element) if element.name() == "a" => {
                source_url = element.attr("href").map(str::to_string);
                break;
            }
            Node::Text(text) => title.push_str(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(sibling) {
                    title.extend(element.text());
                }
            }
            _ => {}
        }
    }
    let source_url = source_url.ok_or_else(|| ParseError::MissingEpisodeLink(raw.clone()))?;

    Ok(EpisodeRecord {
        episode_number,
        title: clean_title(&title),
        source_url,
    })
}

/// Build a [`TopicRecord`] from a topic marker.
///
/// `following` is the rest of the classified marker sequence in document
/// order; the first episode marker in it fixes the topic's starting boundary.
/// The closing boundary stays open until [`resolve_boundaries`] runs.
fn topic_from_marker(
    marker: ElementRef<'_>,
    following: &[(MarkerKind, ElementRef<'_>)],
) -> Result<TopicRecord, ParseError> {
    let raw = marker_text(marker);
    let title = TOPIC_TITLE_RE
        .captures(&raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ParseError::MalformedTopicMarker(raw.clone()))?;

    let (_, first_marker) = following
        .iter()
        .find(|(kind, _)| *kind == MarkerKind::Episode)
        .ok_or_else(|| ParseError::MissingBoundaryEpisode(raw.clone()))?;
    let first_episode = parse_episode_number(&marker_text(*first_marker))?;

    Ok(TopicRecord {
        first_episode,
        last_episode: None,
        title,
    })
}

fn marker_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_episode_number(raw: &str) -> Result<u32, ParseError> {
    EPISODE_NUMBER_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or_else(|| ParseError::MissingEpisodeNumber(raw.to_string()))
}

/// Normalize NBSPs to spaces, trim, and drop the stray "[" the page leaves
/// before each bracketed download link.
fn clean_title(raw: &str) -> String {
    let normalized = raw.replace('\u{a0}', " ");
    let trimmed = normalized.trim();
    trimmed
        .strip_suffix('[')
        .map(str::trim_end)
        .unwrap_or(trimmed)
        .to_string()
}
