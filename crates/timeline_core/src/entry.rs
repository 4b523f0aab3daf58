use chrono::{DateTime, Utc};

use crate::{Post, Site};

/// Maximum title length in Unicode scalar values, marker included.
pub const TITLE_LIMIT: usize = 80;
/// Appended to truncated titles. Two chars: a space and an ellipsis.
pub const TITLE_ELLIPSIS: &str = " …";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub uri: String,
}

/// One feed entry, derived from exactly one [`Post`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub permalink: String,
    pub title: String,
    /// Plain text, untruncated.
    pub summary: String,
    /// Plain text, untruncated.
    pub content: String,
    pub author: Person,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Maps a post onto its feed entry. Total: every input yields an entry.
pub fn to_entry(site: &Site, post: &Post) -> FeedEntry {
    let permalink = site.permalink(&post.author, &post.id);
    let title = truncate_title(&format!("@{}: {}", post.author, post.body));

    FeedEntry {
        id: permalink.clone(),
        permalink,
        title,
        summary: post.body.clone(),
        content: post.body.clone(),
        author: Person {
            name: format!("@{}", post.author),
            uri: site.profile_url(&post.author),
        },
        published: post.timestamp,
        updated: post.timestamp,
    }
}

/// Caps `title` at [`TITLE_LIMIT`] chars, ending in [`TITLE_ELLIPSIS`] when cut.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_LIMIT {
        return title.to_string();
    }

    let keep = TITLE_LIMIT - TITLE_ELLIPSIS.chars().count();
    let mut truncated: String = title.chars().take(keep).collect();
    truncated.push_str(TITLE_ELLIPSIS);
    truncated
}
