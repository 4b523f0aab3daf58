use timeline_core::{to_document, to_entry, FeedDocument, Post, Site};
use timeline_logging::timeline_info;

use crate::decode::decode_html;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::select::parse_document;
use crate::FetchError;

/// The only way a run fails once the page is in hand is never reaching it.
/// Decoding replaces bad bytes and html5ever accepts any markup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("couldn't download @{handle}'s stream")]
    Fetch {
        handle: String,
        #[source]
        source: FetchError,
    },
}

/// Page in, feed out: fetch, decode, extract, map.
pub struct FeedEngine {
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    site: Site,
}

impl FeedEngine {
    pub fn new(fetcher: Box<dyn Fetcher>, extractor: Box<dyn Extractor>, site: Site) -> Self {
        Self {
            fetcher,
            extractor,
            site,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Downloads `<site>/<handle>` once and builds its feed.
    pub async fn fetch_feed(&self, handle: &str) -> Result<FeedDocument, EngineError> {
        let url = self.site.profile_url(handle);
        let output = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|source| EngineError::Fetch {
                handle: handle.to_string(),
                source,
            })?;
        Ok(self.feed_from_bytes(handle, &output.bytes, output.metadata.content_type.as_deref()))
    }

    /// Builds the feed from an already obtained page.
    pub fn feed_from_bytes(
        &self,
        handle: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> FeedDocument {
        let decoded = decode_html(bytes, content_type);
        let document = parse_document(&decoded.html);
        let posts = self.extractor.extract(&document);
        self.build_document(handle, &posts)
    }

    pub fn build_document(&self, handle: &str, posts: &[Post]) -> FeedDocument {
        let entries = posts.iter().map(|post| to_entry(&self.site, post)).collect();
        let document = to_document(&self.site, handle, entries);
        timeline_info!(
            "Built feed {} with {} entries, updated {}",
            document.id,
            document.entries.len(),
            document.updated.to_rfc3339()
        );
        document
    }
}
