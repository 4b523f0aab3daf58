use chrono::{DateTime, Utc};

/// One post scraped from a profile timeline.
///
/// A `Post` only exists once its timestamp is known; fragments without one
/// never become records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Screen name of the author, without the leading `@`. May be empty.
    pub author: String,
    /// Post id, unique within the author's timeline. May be empty.
    pub id: String,
    /// Flattened plain text of the post body.
    pub body: String,
    pub timestamp: DateTime<Utc>,
}
