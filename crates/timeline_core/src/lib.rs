//! Timeline core: post records and the pure mapping into feed documents.
mod document;
mod entry;
mod post;
mod site;

pub use document::{to_document, FeedDocument};
pub use entry::{to_entry, truncate_title, FeedEntry, Person, TITLE_ELLIPSIS, TITLE_LIMIT};
pub use post::Post;
pub use site::{Site, SiteError, DEFAULT_SITE};
