//! Timeline engine: page fetching, DOM extraction and feed encoding.
mod atom;
mod decode;
mod engine;
mod extract;
mod fetch;
mod select;
mod text;
mod types;

pub use atom::{encode_atom, to_atom_feed, write_atom, EncodeError};
pub use decode::{decode_html, DecodedHtml};
pub use engine::{EngineError, FeedEngine};
pub use extract::{
    parse_epoch_seconds, Extractor, PostSelectors, SelectorExtractor, AUTHOR_ATTR,
    DEFAULT_BODY_SELECTOR, DEFAULT_POST_SELECTOR, DEFAULT_TIMESTAMP_SELECTOR, ID_ATTR, TIME_ATTR,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use select::{
    apply, document_scope, first_match, matches, parse_document, Matches, SelectorError,
    StructuralSelector,
};
pub use text::{element_text, text_of};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
