use std::io::Write;

use atom_syndication::{Content, Entry, Feed, Link, Person as AtomPerson, Text, WriteConfig};
use timeline_core::{FeedDocument, FeedEntry, Person};

const TEXT_TYPE: &str = "text";

#[derive(Debug, thiserror::Error)]
#[error("could not encode feed")]
pub struct EncodeError(#[from] atom_syndication::Error);

/// Converts the in-memory document into an Atom feed.
pub fn to_atom_feed(document: &FeedDocument) -> Feed {
    Feed {
        title: Text::plain(document.title.clone()),
        id: document.id.clone(),
        updated: document.updated.fixed_offset(),
        authors: vec![to_atom_person(&document.author)],
        links: vec![alternate_link(&document.link)],
        entries: document.entries.iter().map(to_atom_entry).collect(),
        ..Default::default()
    }
}

fn to_atom_entry(entry: &FeedEntry) -> Entry {
    Entry {
        title: Text::plain(entry.title.clone()),
        id: entry.id.clone(),
        updated: entry.updated.fixed_offset(),
        published: Some(entry.published.fixed_offset()),
        authors: vec![to_atom_person(&entry.author)],
        links: vec![alternate_link(&entry.permalink)],
        summary: Some(Text::plain(entry.summary.clone())),
        content: Some(Content {
            value: Some(entry.content.clone()),
            content_type: Some(TEXT_TYPE.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn to_atom_person(person: &Person) -> AtomPerson {
    AtomPerson {
        name: person.name.clone(),
        uri: Some(person.uri.clone()),
        ..Default::default()
    }
}

fn alternate_link(href: &str) -> Link {
    Link {
        href: href.to_string(),
        rel: "alternate".to_string(),
        ..Default::default()
    }
}

/// Writes the document as Atom XML, with an XML declaration.
pub fn write_atom<W: Write>(document: &FeedDocument, writer: W, pretty: bool) -> Result<W, EncodeError> {
    let config = WriteConfig {
        write_document_declaration: true,
        indent_size: pretty.then_some(2),
    };
    Ok(to_atom_feed(document).write_with_config(writer, config)?)
}

/// Encodes into a buffer, so callers never emit half a document.
pub fn encode_atom(document: &FeedDocument, pretty: bool) -> Result<Vec<u8>, EncodeError> {
    write_atom(document, Vec::new(), pretty)
}
