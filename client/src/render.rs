//! Plain-text rendering of a [`Response`] for terminal output.

use crate::response::Response;

/// Render a response the way the CLI prints it.
///
/// A graph becomes a single `A -> movie -> B` chain followed by its degree
/// (the number of movies crossed). Suggestions are listed one per line.
#[must_use]
pub fn render_text(response: &Response) -> String {
    match response {
        Response::Graph(names) if names.is_empty() => "No connection found".to_string(),
        Response::Graph(names) => {
            let degree = names.len() / 2;
            format!("{}\nBacon number: {degree}", names.join(" -> "))
        }
        Response::Spellcheck(names) if names.is_empty() => {
            "Name not recognized and no suggestions offered".to_string()
        }
        Response::Spellcheck(names) => {
            let mut out = String::from("Did you mean:");
            for name in names {
                out.push_str("\n  ");
                out.push_str(name);
            }
            out
        }
        Response::Error(message) | Response::Unknown(message) => message.clone(),
    }
}
