//! Marker classification
//!
//! A page element is a marker when its own leading text content starts with
//! the literal word "Topic" or "Episode". Nested element children do not
//! count: the first child node must itself be text.

use scraper::ElementRef;

/// What role a page element plays in the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Topic,
    Episode,
    Other,
}

/// Classify a page element by its leading text content.
///
/// Total and side-effect free: an element with no leading text node is
/// `Other`, never an error.
pub fn classify_marker(element: ElementRef<'_>) -> MarkerKind {
    let leading_text = element
        .children()
        .next()
        .and_then(|node| node.value().as_text());

    match leading_text {
        Some(text) if text.trim_start().starts_with("Episode") => MarkerKind::Episode,
        Some(text) if text.trim_start().starts_with("Topic") => MarkerKind::Topic,
        _ => MarkerKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn classify_fragment(html: &str) -> MarkerKind {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("strong").unwrap();
        let element = fragment.select(&selector).next().expect("strong element");
        classify_marker(element)
    }

    #[test]
    fn test_episode_marker() {
        assert_eq!(
            classify_fragment("<strong>Episode 12 </strong>"),
            MarkerKind::Episode
        );
    }

    #[test]
    fn test_episode_marker_with_leading_whitespace() {
        assert_eq!(
            classify_fragment("<strong>\n  Episode 3</strong>"),
            MarkerKind::Episode
        );
    }

    #[test]
    fn test_topic_marker() {
        assert_eq!(
            classify_fragment("<strong>Topic 1 Introduction</strong>"),
            MarkerKind::Topic
        );
    }

    #[test]
    fn test_unrelated_text_is_other() {
        assert_eq!(
            classify_fragment("<strong>Subscribe here</strong>"),
            MarkerKind::Other
        );
    }

    #[test]
    fn test_nested_leading_element_is_other() {
        // "Episode" buried in a nested child is not leading text content
        assert_eq!(
            classify_fragment("<strong><em>Episode 5</em></strong>"),
            MarkerKind::Other
        );
    }

    #[test]
    fn test_empty_element_is_other() {
        assert_eq!(classify_fragment("<strong></strong>"), MarkerKind::Other);
    }
}
