//! Integration tests for archive assembly
//!
//! Episode fixtures are generated on the fly as minimal blank PDFs so the
//! tests exercise the real lopdf merge and outline paths end to end.

use std::path::Path;

use lopdf::{Dictionary, Document, Object};
use tempfile::TempDir;

use podcast_archiver::download::DownloadedEpisode;
use podcast_archiver::page::{TopicRecord, TopicWithEpisodes};
use podcast_archiver::pdf::{assemble_archive, count_pages};

/// Write a minimal valid PDF with the given number of blank pages.
fn write_blank_pdf(path: &Path, pages: usize) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            );
            Object::Reference(doc.add_object(page))
        })
        .collect();

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(pages as i64));
    pages_dict.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).expect("failed to write fixture PDF");
}

fn episode_fixture(dir: &Path, number: u32, title: &str, pages: usize) -> DownloadedEpisode {
    let local_path = dir.join(format!("{number}.pdf"));
    write_blank_pdf(&local_path, pages);
    DownloadedEpisode {
        episode_number: number,
        title: title.to_string(),
        local_path,
        page_count: pages,
    }
}

fn topic(first: u32, last: Option<u32>, title: &str) -> TopicRecord {
    TopicRecord {
        first_episode: first,
        last_episode: last,
        title: title.to_string(),
    }
}

#[test]
fn test_fixture_pdfs_report_their_page_count() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("three.pdf");
    write_blank_pdf(&path, 3);

    assert_eq!(count_pages(&path).unwrap(), 3);
}

#[test]
fn test_assemble_merges_all_pages_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let topics = vec![
        TopicWithEpisodes {
            topic: topic(1, Some(2), "Intro"),
            episodes: vec![
                episode_fixture(temp_dir.path(), 1, "One", 2),
                episode_fixture(temp_dir.path(), 2, "Two", 1),
            ],
        },
        TopicWithEpisodes {
            topic: topic(3, None, "Mid"),
            episodes: vec![episode_fixture(temp_dir.path(), 3, "Three", 3)],
        },
    ];

    let output = temp_dir.path().join("merged.pdf");
    assemble_archive(&topics, &output).expect("Failed to assemble archive");

    assert!(output.exists(), "Merged PDF was not created");
    assert_eq!(
        count_pages(&output).unwrap(),
        6,
        "Merged PDF should have the sum of all episode pages"
    );
}

#[test]
fn test_assemble_writes_two_level_outline() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let topics = vec![
        TopicWithEpisodes {
            topic: topic(1, Some(2), "Intro"),
            episodes: vec![
                episode_fixture(temp_dir.path(), 1, "One", 2),
                episode_fixture(temp_dir.path(), 2, "Two", 1),
            ],
        },
        TopicWithEpisodes {
            topic: topic(3, None, "Mid"),
            episodes: vec![episode_fixture(temp_dir.path(), 3, "Three", 3)],
        },
    ];

    let output = temp_dir.path().join("merged.pdf");
    assemble_archive(&topics, &output).expect("Failed to assemble archive");

    let doc = Document::load(&output).expect("Failed to load merged PDF");
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let catalog = doc.get_object(catalog_id).unwrap().as_dict().unwrap();
    let outlines_id = catalog.get(b"Outlines").unwrap().as_reference().unwrap();
    let outlines = doc.get_object(outlines_id).unwrap().as_dict().unwrap();

    // First top-level node is the first topic, labeled with its range
    let first_id = outlines.get(b"First").unwrap().as_reference().unwrap();
    let first = doc.get_object(first_id).unwrap().as_dict().unwrap();
    let title = first.get(b"Title").unwrap().as_str().unwrap();
    assert_eq!(String::from_utf8_lossy(title), "1-2: Intro");

    // The topic node parents its episode bookmarks
    let child_id = first.get(b"First").unwrap().as_reference().unwrap();
    let child = doc.get_object(child_id).unwrap().as_dict().unwrap();
    let child_title = child.get(b"Title").unwrap().as_str().unwrap();
    assert_eq!(String::from_utf8_lossy(child_title), "Episode 1 – One");
}

#[test]
fn test_assemble_rejects_missing_episode_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let topics = vec![TopicWithEpisodes {
        topic: topic(1, None, "Intro"),
        episodes: vec![DownloadedEpisode {
            episode_number: 1,
            title: "One".to_string(),
            local_path: temp_dir.path().join("nonexistent.pdf"),
            page_count: 1,
        }],
    }];

    let output = temp_dir.path().join("merged.pdf");
    let result = assemble_archive(&topics, &output);
    assert!(result.is_err(), "Should fail when an episode PDF is missing");
    assert!(!output.exists(), "No partial archive may be written");
}

#[test]
fn test_assemble_rejects_empty_topic_list() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = temp_dir.path().join("merged.pdf");

    let result = assemble_archive(&[], &output);
    assert!(result.is_err(), "Should fail with nothing to assemble");
}

#[test]
fn test_assemble_rejects_stale_page_counts() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let mut episode = episode_fixture(temp_dir.path(), 1, "One", 2);
    // Recorded metadata disagrees with the actual file
    episode.page_count = 5;

    let topics = vec![TopicWithEpisodes {
        topic: topic(1, None, "Intro"),
        episodes: vec![episode],
    }];

    let output = temp_dir.path().join("merged.pdf");
    let result = assemble_archive(&topics, &output);
    assert!(result.is_err(), "Stale page counts must not produce an archive");

    if let Err(e) = result {
        assert!(
            e.to_string().contains("pages"),
            "Error should mention the page mismatch: {}",
            e
        );
    }
}
