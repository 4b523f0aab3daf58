//! Structural selector matching over a parsed page.
//!
//! Matching is a pure function of a scope element and a parsed selector:
//! running a selector against an element only ever yields that element's
//! descendants, which is what makes nested (scoped) queries work.

use std::fmt;
use std::str::FromStr;

use ego_tree::iter::Descendants;
use scraper::{ElementRef, Html, Node, Selector};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid selector {selector:?}: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

/// A parsed structural selector (`div.GridTimeline .ProfileTweet`, `#main`, `a span`).
///
/// Compound steps joined by whitespace. Each step is matched with `scraper`;
/// the descendant combinator between steps is resolved here so that every
/// step of a scoped query has to land inside the scope.
#[derive(Debug, Clone)]
pub struct StructuralSelector {
    source: String,
    steps: Vec<Selector>,
}

impl StructuralSelector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let error = |message: String| SelectorError {
            selector: source.to_string(),
            message,
        };
        let steps = split_steps(source)
            .map_err(error)?
            .into_iter()
            .map(|step| Selector::parse(step).map_err(|err| error(err.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        if steps.is_empty() {
            return Err(error("empty selector".into()));
        }
        Ok(Self {
            source: source.to_string(),
            steps,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when `element` matches the last step and the earlier steps match
    /// ancestors, in order, without climbing above `scope`.
    fn matches_within(&self, element: ElementRef<'_>, scope: ElementRef<'_>) -> bool {
        let Some((last, ancestors)) = self.steps.split_last() else {
            return false;
        };
        if !last.matches(&element) {
            return false;
        }
        let mut pending = ancestors.iter().rev().peekable();
        for node in element.ancestors() {
            let Some(step) = pending.peek() else {
                break;
            };
            if let Some(ancestor) = ElementRef::wrap(node) {
                if step.matches(&ancestor) {
                    pending.next();
                }
            }
            if node.id() == scope.id() {
                break;
            }
        }
        pending.peek().is_none()
    }
}

/// Splits on whitespace outside brackets, parentheses and quotes. Any other
/// combinator or a selector list is refused.
fn split_steps(source: &str) -> Result<Vec<&str>, String> {
    let mut steps = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = None;
    for (at, ch) in source.char_indices() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, '>' | '+' | '~' | ',') if depth == 0 => {
                return Err(format!(
                    "only descendant combinators are supported, found {ch:?}"
                ));
            }
            (None, c) if depth == 0 && c.is_whitespace() => {
                if let Some(from) = start.take() {
                    steps.push(&source[from..at]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(at);
    }
    if let Some(from) = start {
        steps.push(&source[from..]);
    }
    Ok(steps)
}

impl FromStr for StructuralSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StructuralSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses a whole page. html5ever recovers from any markup, so this cannot fail.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// The element every whole-document query is scoped to.
pub fn document_scope(document: &Html) -> ElementRef<'_> {
    document.root_element()
}

/// Lazy iterator returned by [`matches`].
pub struct Matches<'a, 's> {
    scope: ElementRef<'a>,
    inner: Descendants<'a, Node>,
    selector: &'s StructuralSelector,
}

impl<'a> Iterator for Matches<'a, '_> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for node in self.inner.by_ref() {
            let Some(element) = ElementRef::wrap(node) else {
                continue;
            };
            if element.id() != self.scope.id() && self.selector.matches_within(element, self.scope) {
                return Some(element);
            }
        }
        None
    }
}

/// Descendants of `scope` matching `selector`, lazily, in document order.
/// Every step of the selector must match at or below `scope`.
pub fn matches<'a, 's>(scope: ElementRef<'a>, selector: &'s StructuralSelector) -> Matches<'a, 's> {
    Matches {
        scope,
        inner: scope.descendants(),
        selector,
    }
}

pub fn first_match<'a>(scope: ElementRef<'a>, selector: &StructuralSelector) -> Option<ElementRef<'a>> {
    matches(scope, selector).next()
}

/// Runs `visitor` once per match. No match means no call.
pub fn apply<'a, F>(scope: ElementRef<'a>, selector: &StructuralSelector, visitor: F)
where
    F: FnMut(ElementRef<'a>),
{
    matches(scope, selector).for_each(visitor);
}
