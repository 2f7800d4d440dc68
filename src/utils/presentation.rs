// src/utils/presentation.rs

use crate::{models::author::Author, utils::html::escape_html};

pub const PRETTY_AMPERSAND: &str = " <span class=\"ampersand\">&amp;</span> ";

/// Replaces a spaced "and" or "&" with a styled ampersand span.
///
/// With `autoescape` the value is HTML-escaped first, so only the escaped form
/// `" &amp; "` is matched; without it a bare `" & "` is matched too.
pub fn ampersands(value: &str, autoescape: bool) -> String {
    let value = if autoescape {
        escape_html(value)
    } else {
        value.to_string()
    };

    let value = value
        .replace(" and ", PRETTY_AMPERSAND)
        .replace(" &amp; ", PRETTY_AMPERSAND);

    if autoescape {
        value
    } else {
        value.replace(" & ", PRETTY_AMPERSAND)
    }
}

/// Renders one author: a link to their page when indexable, plain text otherwise.
pub fn render_author(author: &Author) -> String {
    let name = escape_html(&author.display_name());
    if author.indexable {
        format!("<a href=\"{}\">{}</a>", author.absolute_url(), name)
    } else {
        name
    }
}

/// "A", "A and B", "A, B and C". Empty input renders as an empty string.
pub fn format_authors(authors: &[Author]) -> String {
    match authors {
        [] => String::new(),
        [only] => render_author(only),
        [init @ .., last] => {
            let head = init.iter().map(render_author).collect::<Vec<_>>().join(", ");
            format!("{} and {}", head, render_author(last))
        }
    }
}
