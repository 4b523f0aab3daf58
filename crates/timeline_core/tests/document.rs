use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use timeline_core::{to_document, to_entry, Person, Post, Site};

fn init_logging() {
    timeline_logging::initialize_for_tests();
}

fn post(id: &str, body: &str, secs: i64) -> Post {
    Post {
        author: "alice".to_string(),
        id: id.to_string(),
        body: body.to_string(),
        timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
    }
}

#[test]
fn two_posts_end_to_end() {
    init_logging();
    let site = Site::default();
    let entries = [post("1", "hi", 1000), post("2", "bye", 2000)]
        .iter()
        .map(|p| to_entry(&site, p))
        .collect();

    let doc = to_document(&site, "alice", entries);

    assert_eq!(doc.title, "Tweets from @alice");
    assert_eq!(doc.id, "https://twitter.com/alice");
    assert_eq!(doc.link, "https://twitter.com/alice");
    assert_eq!(
        doc.author,
        Person {
            name: "@alice".into(),
            uri: "https://twitter.com/alice".into(),
        }
    );
    assert_eq!(doc.updated, DateTime::from_timestamp(2000, 0).unwrap());

    let permalinks: Vec<_> = doc.entries.iter().map(|e| e.permalink.as_str()).collect();
    assert_eq!(
        permalinks,
        vec![
            "https://twitter.com/alice/status/1",
            "https://twitter.com/alice/status/2"
        ]
    );
    let titles: Vec<_> = doc.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["@alice: hi", "@alice: bye"]);
}

#[test]
fn empty_feed_is_dated_at_epoch() {
    let doc = to_document(&Site::default(), "nobody", Vec::new());
    assert!(doc.entries.is_empty());
    assert_eq!(doc.updated, DateTime::<Utc>::UNIX_EPOCH);
}

#[test]
fn entries_keep_page_order() {
    let site = Site::default();
    let entries = vec![
        to_entry(&site, &post("new", "a", 3000)),
        to_entry(&site, &post("old", "b", 10)),
        to_entry(&site, &post("mid", "c", 500)),
    ];
    let doc = to_document(&site, "alice", entries);

    let ids: Vec<_> = doc.entries.iter().map(|e| e.id.rsplit('/').next().unwrap()).collect();
    assert_eq!(ids, vec!["new", "old", "mid"]);
    assert_eq!(doc.updated, DateTime::from_timestamp(3000, 0).unwrap());
}

proptest! {
    #[test]
    fn updated_is_max_of_entries(stamps in proptest::collection::vec(0i64..4_000_000_000, 1..20)) {
        let site = Site::default();
        let entries = stamps
            .iter()
            .enumerate()
            .map(|(i, secs)| to_entry(&site, &post(&i.to_string(), "x", *secs)))
            .collect();
        let doc = to_document(&site, "alice", entries);

        let max = *stamps.iter().max().unwrap();
        prop_assert_eq!(doc.updated, DateTime::from_timestamp(max, 0).unwrap());
    }
}
