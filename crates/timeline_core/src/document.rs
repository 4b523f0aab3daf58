use chrono::{DateTime, Utc};

use crate::{FeedEntry, Person, Site};

/// In-memory feed for one profile, ready to hand to an encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub id: String,
    pub link: String,
    pub author: Person,
    /// Latest entry timestamp, or the Unix epoch for an empty feed.
    pub updated: DateTime<Utc>,
    /// In document order of the scraped page, not sorted by time.
    pub entries: Vec<FeedEntry>,
}

pub fn to_document(site: &Site, handle: &str, entries: Vec<FeedEntry>) -> FeedDocument {
    let profile = site.profile_url(handle);
    let updated = entries
        .iter()
        .map(|entry| entry.published)
        .max()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    FeedDocument {
        title: format!("Tweets from @{handle}"),
        id: profile.clone(),
        link: profile.clone(),
        author: Person {
            name: format!("@{handle}"),
            uri: profile,
        },
        updated,
        entries,
    }
}
