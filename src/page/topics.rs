//! Topic ranges: boundary resolution and episode assignment

use crate::download::DownloadedEpisode;
use crate::error::AssignmentError;

/// One topic's episode range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub first_episode: u32,
    /// `None` means open-ended: the last topic in document order has no upper
    /// bound and absorbs every otherwise-unclaimed episode. Builders create
    /// records with `None`; [`resolve_boundaries`] writes `Some` into every
    /// topic except the last.
    pub last_episode: Option<u32>,
    pub title: String,
}

/// A resolved topic together with the downloaded episodes it claims
#[derive(Debug, Clone)]
pub struct TopicWithEpisodes {
    pub topic: TopicRecord,
    /// Ordered by episode number ascending
    pub episodes: Vec<DownloadedEpisode>,
}

/// Infer each topic's closing boundary from the next topic's start.
///
/// Topics must be in document order (ascending `first_episode`). One backward
/// pass: the last topic stays open-ended, every earlier topic closes at
/// `next.first_episode - 1`. An empty slice is a no-op; the degenerate
/// zero-topic case surfaces later as [`AssignmentError::NoTopics`].
pub fn resolve_boundaries(topics: &mut [TopicRecord]) {
    for index in (0..topics.len().saturating_sub(1)).rev() {
        topics[index].last_episode = Some(topics[index + 1].first_episode.saturating_sub(1));
    }
}

/// Partition downloaded episodes into topic buckets.
///
/// Bounded topics claim episodes in `[first_episode, last_episode]` inclusive
/// from the working set; the open-ended topic takes whatever remains, so no
/// episode is dropped even when its number falls outside every bounded range.
/// Each bucket comes back sorted by episode number.
pub fn assign_episodes(
    topics: Vec<TopicRecord>,
    episodes: Vec<DownloadedEpisode>,
) -> Result<Vec<TopicWithEpisodes>, AssignmentError> {
    if topics.is_empty() {
        return Err(AssignmentError::NoTopics);
    }

    let mut remaining = episodes;
    let mut assigned = Vec::with_capacity(topics.len());
    for topic in topics {
        let mut claimed = match topic.last_episode {
            Some(last) => {
                let (claimed, rest) = remaining.into_iter().partition(|episode| {
                    topic.first_episode <= episode.episode_number
                        && episode.episode_number <= last
                });
                remaining = rest;
                claimed
            }
            None => std::mem::take(&mut remaining),
        };
        claimed.sort_by_key(|episode| episode.episode_number);
        assigned.push(TopicWithEpisodes {
            topic,
            episodes: claimed,
        });
    }

    // Unreachable when the last topic is open-ended, but a leftover episode
    // here would otherwise vanish from the archive silently.
    if !remaining.is_empty() {
        return Err(AssignmentError::UnclaimedEpisodes(
            remaining.iter().map(|episode| episode.episode_number).collect(),
        ));
    }

    Ok(assigned)
}
