//! Archive assembly: PDF merging with a two-level bookmark tree
//!
//! Merging follows the lopdf merge example: renumber each source document's
//! objects, collect pages and objects into one map, then rebuild the catalog
//! and page tree. The outline is planned first as pure data (page offsets are
//! a running sum over episode page counts) and only then anchored onto the
//! merged page ids, so the plan can be tested without touching a PDF.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Bookmark, Dictionary, Document, Object, ObjectId};
use tracing::info;

use crate::download::DownloadedEpisode;
use crate::error::{Error, Result};
use crate::page::topics::{TopicRecord, TopicWithEpisodes};

/// One planned bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Zero-based index of the page this bookmark anchors to
    pub page_offset: usize,
    pub label: String,
    /// Index of the parent entry within the plan, if any
    pub parent: Option<usize>,
}

/// The full bookmark plan for an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlinePlan {
    pub entries: Vec<OutlineEntry>,
    /// Sum of all episodes' page counts; must equal the merged page total
    pub total_pages: usize,
}

/// Compute every bookmark's label and page anchor.
///
/// Walks topics and their episodes in the order the PDFs will be appended,
/// maintaining a running page counter. Both a topic's bookmark and its first
/// episode's bookmark anchor to the counter value before that episode's pages
/// are appended.
pub fn plan_outline(topics: &[TopicWithEpisodes]) -> OutlinePlan {
    let mut entries = Vec::new();
    // Page indices are zero-based; starting at 1 mis-anchors every bookmark.
    let mut current_page = 0;
    for topic in topics {
        let topic_index = entries.len();
        entries.push(OutlineEntry {
            page_offset: current_page,
            label: topic_label(&topic.topic),
            parent: None,
        });
        for episode in &topic.episodes {
            entries.push(OutlineEntry {
                page_offset: current_page,
                label: episode_label(episode),
                parent: Some(topic_index),
            });
            current_page += episode.page_count;
        }
    }
    OutlinePlan {
        entries,
        total_pages: current_page,
    }
}

fn topic_label(topic: &TopicRecord) -> String {
    let last = topic
        .last_episode
        .map(|n| n.to_string())
        .unwrap_or_default();
    // A colon inside the title would read as a second range separator.
    let title = topic.title.replace(':', " –");
    format!("{}-{}: {}", topic.first_episode, last, title)
}

fn episode_label(episode: &DownloadedEpisode) -> String {
    format!("Episode {} – {}", episode.episode_number, episode.title)
}

/// Merge every episode PDF into one document and write it with the planned
/// two-level outline.
///
/// Topics must arrive in ascending `first_episode` order with their episode
/// lists sorted; appends happen strictly in that order because the planned
/// page offsets are a running sum over it.
pub fn assemble_archive(topics: &[TopicWithEpisodes], output_path: &Path) -> Result<()> {
    let plan = plan_outline(topics);

    // Load every episode document in append order
    let mut documents = Vec::new();
    for topic in topics {
        for episode in &topic.episodes {
            let doc = Document::load(&episode.local_path)?;
            if doc.get_pages().is_empty() {
                return Err(Error::EmptyPdf(episode.local_path.clone()));
            }
            documents.push(doc);
        }
    }
    if documents.is_empty() {
        return Err(Error::General("no episode PDFs to assemble".to_string()));
    }

    // Renumber objects per document to avoid id conflicts, collecting page
    // ids in append order
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;
        page_ids.extend(doc.get_pages().into_values());
        objects.extend(doc.objects);
    }

    // A mismatch means the recorded page counts are stale and every bookmark
    // past the first bad offset would point at the wrong page.
    if page_ids.len() != plan.total_pages {
        return Err(Error::General(format!(
            "merged document has {} pages but episode metadata sums to {}",
            page_ids.len(),
            plan.total_pages
        )));
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);
    // Keep new_object_id() above every id we just inserted
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(page_ids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));

    let catalog_id = merged.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.objects.insert(pages_id, Object::Dictionary(pages_dict));
    merged.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    // Anchor the planned outline onto the merged page ids
    let mut node_ids: Vec<u32> = Vec::with_capacity(plan.entries.len());
    for entry in &plan.entries {
        let page_id = *page_ids.get(entry.page_offset).ok_or_else(|| {
            Error::General(format!(
                "bookmark {:?} points past the last page",
                entry.label
            ))
        })?;
        let parent = entry.parent.map(|index| node_ids[index]);
        let node = merged.add_bookmark(
            Bookmark::new(entry.label.clone(), [0.0; 3], 0, page_id),
            parent,
        );
        node_ids.push(node);
    }

    merged.adjust_zero_pages();
    if let Some(outline_id) = merged.build_outline() {
        if let Ok(Object::Dictionary(catalog)) = merged.get_object_mut(catalog_id) {
            catalog.set("Outlines", Object::Reference(outline_id));
        }
    }

    merged.compress();
    merged.save(output_path)?;

    info!(
        pages = page_ids.len(),
        bookmarks = plan.entries.len(),
        output = %output_path.display(),
        "archive assembled"
    );
    Ok(())
}
