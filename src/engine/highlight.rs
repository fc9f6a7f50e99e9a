use std::sync::OnceLock;

use regex::{Captures, Regex, RegexBuilder};

use crate::dom::{Document, NodeId, Selector};
use crate::error::Error;

static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
static MARK_SPAN: OnceLock<Regex> = OnceLock::new();
static TAG_RUN: OnceLock<Regex> = OnceLock::new();
static MARK_TAG: OnceLock<Regex> = OnceLock::new();

fn whitespace_run() -> &'static Regex {
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

fn mark_span() -> &'static Regex {
    MARK_SPAN.get_or_init(|| Regex::new(r"(?s)<mark>(.*?)</mark>").expect("static pattern"))
}

fn tag_run() -> &'static Regex {
    TAG_RUN.get_or_init(|| Regex::new(r"(?:<[^>]+>)+").expect("static pattern"))
}

fn mark_tag() -> &'static Regex {
    MARK_TAG.get_or_init(|| Regex::new(r"</?mark>").expect("static pattern"))
}

/// Wraps matched substrings of a candidate's serialized markup in
/// `<mark>` boundaries.
///
/// Matching is case-insensitive and tag-tolerant: every whitespace run in
/// the query also accepts runs of intervening tags, so a multi-word query
/// still matches text broken up by inline markup like `<b>`. A repair pass
/// then splits any marker that ended up spanning a tag boundary, so no
/// emitted marker ever wraps structural markup.
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// Compile the highlight pattern for one search pass.
    ///
    /// Like the matcher, the query is used raw; malformed syntax fails with
    /// [`Error::InvalidPattern`].
    pub fn new(query: &str) -> Result<Self, Error> {
        let tolerant = whitespace_run().replace_all(query, r"(?:<[^>]+>)*${0}(?:<[^>]+>)*");
        let pattern = RegexBuilder::new(&format!("({tolerant})"))
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                query: query.to_string(),
                source,
            })?;
        Ok(Self { pattern })
    }

    /// Rewrite a candidate's markup with every match wrapped in markers.
    pub fn apply(&self, markup: &str) -> String {
        // Patterns that can match the empty string (an empty query with a
        // zero threshold, for one) match at every position; wrapping those
        // would litter the markup with empty markers
        let wrapped = self.pattern.replace_all(markup, |caps: &Captures| {
            let matched = &caps[1];
            if matched.is_empty() {
                String::new()
            } else {
                format!("<mark>{matched}</mark>")
            }
        });
        repair(&wrapped)
    }
}

/// Split every marker whose span contains structural tags.
///
/// `<mark>TEXT1 TAGS TEXT2</mark>` becomes
/// `<mark>TEXT1</mark> TAGS <mark>TEXT2</mark>`, for any number of tag
/// runs; text chunks that come out empty are dropped rather than emitted
/// as empty `<mark></mark>` pairs.
fn repair(markup: &str) -> String {
    mark_span()
        .replace_all(markup, |caps: &Captures| {
            let inner = &caps[1];
            if !inner.contains('<') {
                return caps[0].to_string();
            }
            let mut out = String::with_capacity(inner.len() + 32);
            let mut last = 0;
            for tags in tag_run().find_iter(inner) {
                push_marked(&mut out, &inner[last..tags.start()]);
                out.push_str(tags.as_str());
                last = tags.end();
            }
            push_marked(&mut out, &inner[last..]);
            out
        })
        .into_owned()
}

fn push_marked(out: &mut String, text: &str) {
    if !text.is_empty() {
        out.push_str("<mark>");
        out.push_str(text);
        out.push_str("</mark>");
    }
}

/// Remove every highlight marker under `container`, restoring each
/// element's pre-highlight markup. A no-op when no markers exist, so
/// running it twice in a row is the same as running it once.
pub fn clean(doc: &mut dyn Document, container: NodeId) {
    for node in doc.query(container, &Selector::universal()) {
        let markup = doc.markup(node);
        if !markup.contains("<mark>") && !markup.contains("</mark>") {
            continue;
        }
        let restored = mark_tag().replace_all(markup, "").into_owned();
        doc.set_markup(node, restored);
    }
}
