use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html};
use timeline_core::Post;
use timeline_logging::{timeline_debug, timeline_info};

use crate::select::{document_scope, first_match, matches, SelectorError, StructuralSelector};
use crate::text::element_text;

pub const AUTHOR_ATTR: &str = "data-screen-name";
pub const ID_ATTR: &str = "data-item-id";
pub const TIME_ATTR: &str = "data-time";

pub const DEFAULT_POST_SELECTOR: &str = "div.GridTimeline .ProfileTweet";
pub const DEFAULT_TIMESTAMP_SELECTOR: &str = "a.ProfileTweet-timestamp span";
pub const DEFAULT_BODY_SELECTOR: &str = ".ProfileTweet-text";

/// Pulls post records out of a parsed profile page.
pub trait Extractor: Send + Sync {
    fn extract(&self, document: &Html) -> Vec<Post>;
}

/// The three selectors that describe where posts live in the page.
#[derive(Debug, Clone)]
pub struct PostSelectors {
    /// One match per post fragment, searched over the whole document.
    pub post: StructuralSelector,
    /// Searched inside each fragment; the first match carries `data-time`.
    pub timestamp: StructuralSelector,
    /// Searched inside each fragment; the first match is the body text.
    pub body: StructuralSelector,
}

impl PostSelectors {
    pub fn parse(post: &str, timestamp: &str, body: &str) -> Result<Self, SelectorError> {
        Ok(Self {
            post: StructuralSelector::parse(post)?,
            timestamp: StructuralSelector::parse(timestamp)?,
            body: StructuralSelector::parse(body)?,
        })
    }
}

impl Default for PostSelectors {
    fn default() -> Self {
        Self::parse(
            DEFAULT_POST_SELECTOR,
            DEFAULT_TIMESTAMP_SELECTOR,
            DEFAULT_BODY_SELECTOR,
        )
        .expect("built-in selectors parse")
    }
}

/// Extractor driven by [`PostSelectors`].
///
/// - author and id come from the fragment's own attributes, empty if absent
/// - a fragment without a parseable timestamp is dropped whole
/// - a fragment without a body match keeps an empty body
#[derive(Debug, Clone, Default)]
pub struct SelectorExtractor {
    selectors: PostSelectors,
}

impl SelectorExtractor {
    pub fn new(selectors: PostSelectors) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &PostSelectors {
        &self.selectors
    }

    fn extract_post(&self, fragment: ElementRef<'_>) -> Option<Post> {
        let attrs = fragment.value();
        let author = attrs.attr(AUTHOR_ATTR).unwrap_or_default().to_string();
        let id = attrs.attr(ID_ATTR).unwrap_or_default().to_string();

        let raw_time = first_match(fragment, &self.selectors.timestamp)
            .and_then(|node| node.value().attr(TIME_ATTR));
        let Some(timestamp) = raw_time.and_then(parse_epoch_seconds) else {
            timeline_debug!(
                "Dropping post {:?} by {:?}: no usable timestamp ({:?})",
                id,
                author,
                raw_time
            );
            return None;
        };

        let body = first_match(fragment, &self.selectors.body)
            .map(element_text)
            .unwrap_or_default();

        Some(Post {
            author,
            id,
            body,
            timestamp,
        })
    }
}

impl Extractor for SelectorExtractor {
    fn extract(&self, document: &Html) -> Vec<Post> {
        let mut posts = Vec::new();
        let mut fragments = 0usize;
        for fragment in matches(document_scope(document), &self.selectors.post) {
            fragments += 1;
            if let Some(post) = self.extract_post(fragment) {
                posts.push(post);
            }
        }
        timeline_info!(
            "Extracted {} posts from {} fragments matching {}",
            posts.len(),
            fragments,
            self.selectors.post
        );
        posts
    }
}

/// Base-10 Unix seconds. Out-of-range values count as unparseable.
pub fn parse_epoch_seconds(raw: &str) -> Option<DateTime<Utc>> {
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}
