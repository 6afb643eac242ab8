//! Classification of raw Oracle of Bacon payloads.
//!
//! The service answers every query with a small XML document whose root
//! element tells the client what happened:
//!
//! ```text
//! <error>...</error>                                  -> Response::Error
//! <link><actor/>..<movie/>..</link>                   -> Response::Graph
//! <spellcheck><match/>..</spellcheck>                 -> Response::Spellcheck
//! anything else                                       -> Response::Unknown
//! ```
//!
//! The checks run in that order and the first match wins. A payload that is
//! not well-formed XML is a [`ParseError`], never a [`Response`].

use roxmltree::{Document, Node, ParsingOptions};

use crate::response::Response;

/// The payload could not be read as an XML document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("response body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed XML in response body: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Classify a response body into exactly one [`Response`] variant.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is not UTF-8 or not well-formed XML.
pub fn classify(body: &[u8]) -> Result<Response, ParseError> {
    let text = std::str::from_utf8(body)?;

    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options)?;

    Ok(classify_document(&doc))
}

fn classify_document(doc: &Document<'_>) -> Response {
    let root = doc.root_element().tag_name().name();

    if root == "error" {
        Response::unauthorized()
    } else if root == "link" {
        let actors = texts_of(doc, "actor");
        let movies = texts_of(doc, "movie");
        Response::Graph(interleave(actors, movies))
    } else if root == "spellcheck" {
        Response::Spellcheck(texts_of(doc, "match"))
    } else {
        Response::unknown()
    }
}

/// Text content of every element named `tag`, in document order, at any depth.
fn texts_of(doc: &Document<'_>, tag: &str) -> Vec<String> {
    doc.descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == tag)
        .map(text_content)
        .collect()
}

/// Concatenated text of all descendant text nodes.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect()
}

/// `[a0, m0, a1, m1, ..., an]`: every actor, each followed by the movie at
/// the same position if there is one. Movies past the last actor are
/// dropped, as are empty names.
fn interleave(actors: Vec<String>, movies: Vec<String>) -> Vec<String> {
    let mut movies = movies.into_iter();
    actors
        .into_iter()
        .flat_map(|actor| std::iter::once(actor).chain(movies.next()))
        .filter(|name| !name.is_empty())
        .collect()
}
